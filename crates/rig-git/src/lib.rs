//! # rig-git
//!
//! Local mirrors of remote repositories.
//!
//! Clone and checkout go through the `git` CLI; read-only inspection
//! (current branch, HEAD commit) goes through gix.

mod command;
mod error;
pub mod mirror;
pub mod repo;

pub use error::GitError;
pub use mirror::{MirrorOutcome, checkout_branch, clone_branch, ensure_mirror};
pub use repo::{current_branch, head_commit, is_repository};

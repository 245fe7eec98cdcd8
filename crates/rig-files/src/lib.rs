//! # rig-files
//!
//! Filesystem access for mirrored repositories.
//!
//! Every client-supplied path goes through [`Confinement`], which rejects
//! escapes and hidden segments before touching the disk. [`Mirrors`] serves
//! directory listings, file content, and live metadata; [`SuiteStore`] saves
//! suite manifests with generated Robot Framework runners.

pub mod browse;
pub mod confine;
mod error;
pub mod runner;
pub mod suite;

pub use browse::Mirrors;
pub use confine::Confinement;
pub use error::FilesError;
pub use suite::{SuiteScope, SuiteStore};

//! # rig-server
//!
//! The `rigd` binary: an axum HTTP API over the rig crates plus the
//! operator commands (`sync`, `backfill`, `create-admin`, `migrate`).

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod context;
pub mod http;

pub use context::{AppContext, SharedContext};

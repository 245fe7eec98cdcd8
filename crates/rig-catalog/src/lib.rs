//! # rig-catalog
//!
//! Keeps the script catalog in step with mirrored repositories.
//!
//! [`MirrorManager::sync_repository`] clones or checks out a mirror, records
//! it, and hands it to the [`Scanner`], which extracts metadata from every
//! tracked file and upserts one catalog row per file.
//! [`backfill_fields`] re-derives header fields from stored docs.

pub mod backfill;
mod error;
pub mod mirror;
pub mod scanner;
pub mod walk;

pub use backfill::backfill_fields;
pub use error::CatalogError;
pub use mirror::{MirrorManager, SyncOutcome};
pub use scanner::Scanner;

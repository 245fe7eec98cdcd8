//! # rig-core
//!
//! Core types shared across the rig crates:
//! - Entity structs for mirrored repositories, the script catalog, users,
//!   and the equipment inventory
//! - Enums for roles, sync actions, and suite scopes
//! - ID prefix constants
//! - Field validation and PATCH-body helpers
//! - Cross-cutting error types
//! - API response shapes

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod patch;
pub mod responses;
pub mod validate;

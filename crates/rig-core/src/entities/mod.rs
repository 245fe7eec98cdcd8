//! Entity structs for rig domain objects.
//!
//! Database-backed entities map one-to-one to tables created by the `rig-db`
//! migrations. Suite manifests live on disk and are owned by `rig-files`.

mod credential;
mod equipment;
mod inventory;
mod metadata;
mod network;
mod repo;
mod script;
mod suite;
mod user;

pub use credential::{Credential, NewCredential};
pub use equipment::{Equipment, NewEquipment};
pub use inventory::{
    Brand, CredentialType, EquipmentType, Library, Location, NewEquipmentType, NewLocation, Scope,
};
pub use metadata::{FunctionDoc, ScriptMetadata};
pub use network::{Network, NewNetwork};
pub use repo::MirroredRepo;
pub use script::CatalogedScript;
pub use suite::{SuiteManifest, SuiteSummary};
pub use user::User;

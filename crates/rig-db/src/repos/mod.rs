//! Repository methods, one module per table family.

pub mod brand;
pub mod credential;
pub mod credential_type;
pub mod equipment;
pub mod equipment_type;
pub mod library;
pub mod location;
pub mod network;
pub mod repo;
pub mod scope;
pub mod script;
pub mod user;

pub use script::ScriptFilter;
pub use user::UserRecord;

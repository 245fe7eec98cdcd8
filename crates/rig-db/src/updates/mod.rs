//! Partial-update types for inventory mutations.
//!
//! Every field is optional: `None` leaves the column alone. Nullable columns
//! use `Option<Option<T>>`, where `Some(None)` clears the value. The types
//! deserialize straight from PATCH bodies and reject unknown keys.

pub mod credential;
pub mod equipment;
pub mod lookup;
pub mod network;

pub use credential::{CredentialUpdate, CredentialUpdateBuilder};
pub use equipment::{EquipmentUpdate, EquipmentUpdateBuilder};
pub use lookup::{
    BrandUpdate, CredentialTypeUpdate, EquipmentTypeUpdate, LibraryUpdate, LocationUpdate,
    ScopeUpdate,
};
pub use network::{NetworkUpdate, NetworkUpdateBuilder};

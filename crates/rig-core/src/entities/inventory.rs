//! Lookup tables referenced by equipment rows.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
}

/// Kind of equipment (router, switch, traffic generator, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentType {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub family: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewEquipmentType {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub family: String,
}

/// Test library an equipment is driven by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub id: String,
    pub name: String,
    pub to_be_used: bool,
}

/// Physical placement in the lab. Every coordinate is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub site: Option<String>,
    pub room: Option<String>,
    pub row: Option<String>,
    pub rack: Option<String>,
    pub pos: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewLocation {
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub row: Option<String>,
    #[serde(default)]
    pub rack: Option<String>,
    #[serde(default)]
    pub pos: Option<i64>,
}

/// Test scope an equipment is reserved for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialType {
    pub id: String,
    pub name: String,
}

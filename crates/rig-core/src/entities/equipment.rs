use serde::{Deserialize, Serialize};

/// A piece of lab equipment and its bindings.
///
/// `net_id` is unique: a network binding belongs to at most one equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub type_id: String,
    pub net_id: String,
    pub virtual_id: i64,
    pub location_id: String,
    pub scope_id: String,
    pub lib_id: String,
    pub brand_id: Option<String>,
    pub owner: Option<String>,
    pub in_use: Option<bool>,
    pub description: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewEquipment {
    pub name: String,
    pub type_id: String,
    pub net_id: String,
    #[serde(default)]
    pub virtual_id: i64,
    pub location_id: String,
    pub scope_id: String,
    pub lib_id: String,
    #[serde(default)]
    pub brand_id: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub in_use: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

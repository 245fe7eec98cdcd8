use serde::{Deserialize, Serialize};

/// An IP binding. `ip` is unique across the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub in_use: bool,
    pub description: Option<String>,
    pub protocol: String,
    pub ip: String,
    pub netmask: Option<String>,
    pub gateway: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewNetwork {
    #[serde(default)]
    pub in_use: bool,
    #[serde(default)]
    pub description: Option<String>,
    pub protocol: String,
    pub ip: String,
    #[serde(default)]
    pub netmask: Option<String>,
    #[serde(default)]
    pub gateway: Option<String>,
}

use serde::{Deserialize, Serialize};

/// Login material for one equipment. Always bound to exactly one equipment
/// row and one credential type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub id: String,
    pub cred_type_id: String,
    pub equipment_id: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub port: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCredential {
    pub cred_type_id: String,
    pub equipment_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub port: Option<i64>,
}

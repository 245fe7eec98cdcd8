//! Credential update builder.

use rig_core::patch::double_option;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cred_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub username: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub password: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub port: Option<Option<i64>>,
}

pub struct CredentialUpdateBuilder(CredentialUpdate);

impl CredentialUpdateBuilder {
    pub fn new() -> Self {
        Self(CredentialUpdate::default())
    }

    pub fn username(mut self, val: Option<String>) -> Self {
        self.0.username = Some(val);
        self
    }

    pub fn password(mut self, val: Option<String>) -> Self {
        self.0.password = Some(val);
        self
    }

    pub fn port(mut self, val: Option<i64>) -> Self {
        self.0.port = Some(val);
        self
    }

    pub fn build(self) -> CredentialUpdate {
        self.0
    }
}

impl Default for CredentialUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

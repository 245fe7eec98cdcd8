//! Network update builder.

use rig_core::patch::double_option;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_use: Option<bool>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub netmask: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub gateway: Option<Option<String>>,
}

pub struct NetworkUpdateBuilder(NetworkUpdate);

impl NetworkUpdateBuilder {
    pub fn new() -> Self {
        Self(NetworkUpdate::default())
    }

    pub fn in_use(mut self, val: bool) -> Self {
        self.0.in_use = Some(val);
        self
    }

    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    pub fn protocol(mut self, val: impl Into<String>) -> Self {
        self.0.protocol = Some(val.into());
        self
    }

    pub fn ip(mut self, val: impl Into<String>) -> Self {
        self.0.ip = Some(val.into());
        self
    }

    pub fn netmask(mut self, val: Option<String>) -> Self {
        self.0.netmask = Some(val);
        self
    }

    pub fn gateway(mut self, val: Option<String>) -> Self {
        self.0.gateway = Some(val);
        self
    }

    pub fn build(self) -> NetworkUpdate {
        self.0
    }
}

impl Default for NetworkUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

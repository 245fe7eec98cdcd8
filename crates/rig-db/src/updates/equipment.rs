//! Equipment update builder.

use rig_core::patch::double_option;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EquipmentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub brand_id: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub in_use: Option<Option<bool>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<Option<String>>,
}

pub struct EquipmentUpdateBuilder(EquipmentUpdate);

impl EquipmentUpdateBuilder {
    pub fn new() -> Self {
        Self(EquipmentUpdate::default())
    }

    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    pub fn net_id(mut self, val: impl Into<String>) -> Self {
        self.0.net_id = Some(val.into());
        self
    }

    pub fn virtual_id(mut self, val: i64) -> Self {
        self.0.virtual_id = Some(val);
        self
    }

    pub fn brand_id(mut self, val: Option<String>) -> Self {
        self.0.brand_id = Some(val);
        self
    }

    pub fn owner(mut self, val: Option<String>) -> Self {
        self.0.owner = Some(val);
        self
    }

    pub fn in_use(mut self, val: Option<bool>) -> Self {
        self.0.in_use = Some(val);
        self
    }

    pub fn note(mut self, val: Option<String>) -> Self {
        self.0.note = Some(val);
        self
    }

    pub fn build(self) -> EquipmentUpdate {
        self.0
    }
}

impl Default for EquipmentUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

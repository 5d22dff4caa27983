//! Control tables copied verbatim from the control document.
//!
//! Each table maps a user-chosen name to an arbitrary JSON value; nothing
//! is interpreted here.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub type ControlTable = BTreeMap<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlTables {
    #[serde(rename = "Material", default, deserialize_with = "null_as_empty")]
    pub materials: ControlTable,
    #[serde(rename = "CrossSection", default, deserialize_with = "null_as_empty")]
    pub cross_sections: ControlTable,
    #[serde(rename = "PartProperty", default, deserialize_with = "null_as_empty")]
    pub part_properties: ControlTable,
    #[serde(rename = "Contact", default, deserialize_with = "null_as_empty")]
    pub contacts: ControlTable,
    #[serde(rename = "Constraint", default, deserialize_with = "null_as_empty")]
    pub constraints: ControlTable,
    #[serde(rename = "Load", default, deserialize_with = "null_as_empty")]
    pub loads: ControlTable,
    #[serde(rename = "InitialCondition", default, deserialize_with = "null_as_empty")]
    pub initial_conditions: ControlTable,
}

impl ControlTables {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
            && self.cross_sections.is_empty()
            && self.part_properties.is_empty()
            && self.contacts.is_empty()
            && self.constraints.is_empty()
            && self.loads.is_empty()
            && self.initial_conditions.is_empty()
    }

    /// Element-set name a part property refers to through `EleSet`.
    pub fn part_element_set(&self, part: &str) -> Option<&str> {
        self.part_properties.get(part)?.get("EleSet")?.as_str()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<ControlTable, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ControlTable>::deserialize(deserializer)?.unwrap_or_default())
}

use derive_builder::Builder;
use serde::Serialize;

use crate::error::{QuirkError, Result};
use crate::quirk::ReportingConfig;
use crate::zcl::EnumValueSet;

/// Where the hub places an entity in its UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    #[default]
    Standard,
    Config,
    Diagnostic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityKind {
    /// Boolean toggle. When inverted, `true` on the wire means off.
    Switch { inverted: bool },
    /// Selector over a closed set of labels.
    Enum { value_set: EnumValueSet },
}

/// Binds one endpoint attribute to a user-facing control entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Builder)]
#[builder(pattern = "owned")]
pub struct EntityBinding {
    pub endpoint_id: u8,
    pub cluster_id: u16,
    #[builder(setter(into))]
    pub attribute_name: String,
    pub kind: EntityKind,
    #[builder(setter(strip_option), default)]
    pub reporting: Option<ReportingConfig>,
    #[builder(default)]
    pub entity_type: EntityType,
    #[builder(setter(into))]
    pub translation_key: String,
    #[builder(setter(into))]
    pub fallback_name: String,
}

impl EntityBinding {
    pub fn switch() -> EntityBindingBuilder {
        EntityBindingBuilder::default().kind(EntityKind::Switch { inverted: false })
    }

    pub fn enumeration(value_set: EnumValueSet) -> EntityBindingBuilder {
        EntityBindingBuilder::default().kind(EntityKind::Enum { value_set })
    }

    pub(crate) fn from_builder(builder: EntityBindingBuilder) -> Result<Self> {
        builder
            .build()
            .map_err(|e| QuirkError::IncompleteBinding(e.to_string()))
    }
}

/// Decoded view of a reported attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EntityValue {
    Switch(bool),
    Enum(&'static str),
}

impl std::fmt::Display for EntityValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityValue::Switch(true) => f.write_str("on"),
            EntityValue::Switch(false) => f.write_str("off"),
            EntityValue::Enum(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityState {
    pub translation_key: String,
    pub fallback_name: String,
    pub value: EntityValue,
}

/// Command issued from the hub UI against a bound entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityCommand {
    Turn(bool),
    Select(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_builder_defaults() {
        let binding = EntityBinding::from_builder(
            EntityBinding::switch()
                .endpoint_id(3)
                .cluster_id(0x0006)
                .attribute_name("on_off")
                .translation_key("light")
                .fallback_name("Light"),
        )
        .unwrap();
        assert_eq!(binding.kind, EntityKind::Switch { inverted: false });
        assert_eq!(binding.entity_type, EntityType::Standard);
        assert_eq!(binding.reporting, None);
    }

    #[test]
    fn test_missing_field_is_reported() {
        let err = EntityBinding::from_builder(EntityBinding::switch().endpoint_id(3)).unwrap_err();
        assert!(matches!(err, QuirkError::IncompleteBinding(_)));
    }

    #[test]
    fn test_entity_value_display() {
        assert_eq!(EntityValue::Switch(true).to_string(), "on");
        assert_eq!(EntityValue::Switch(false).to_string(), "off");
        assert_eq!(EntityValue::Enum("Heat").to_string(), "Heat");
    }
}

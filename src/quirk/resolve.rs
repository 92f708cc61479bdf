use serde::Serialize;
use tracing::debug;

use crate::error::{QuirkError, Result};
use crate::quirk::{EntityBinding, EntityCommand, EntityKind, EntityState, EntityValue, Quirk};
use crate::zcl::{AttributeValue, ClusterSchema};

/// Attribute write handed to the protocol stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteAttribute {
    pub endpoint_id: u8,
    pub cluster_id: u16,
    pub attribute_id: u16,
    pub value: AttributeValue,
}

impl Quirk {
    fn replaced_cluster(&self, endpoint_id: u8, cluster_id: u16) -> Result<&ClusterSchema> {
        self.cluster(endpoint_id, cluster_id)
            .ok_or(QuirkError::ClusterNotFound {
                endpoint: endpoint_id,
                cluster: cluster_id,
            })
    }

    fn bound_entity(
        &self,
        endpoint_id: u8,
        cluster_id: u16,
        attribute_name: &str,
    ) -> Result<&EntityBinding> {
        self.entity(endpoint_id, cluster_id, attribute_name)
            .ok_or_else(|| QuirkError::BindingNotFound {
                endpoint: endpoint_id,
                cluster: cluster_id,
                attribute: attribute_name.to_string(),
            })
    }

    /// Decodes a reported attribute value into the state of its bound entity.
    pub fn resolve(
        &self,
        endpoint_id: u8,
        cluster_id: u16,
        attribute_id: u16,
        value: &AttributeValue,
    ) -> Result<EntityState> {
        let cluster = self.replaced_cluster(endpoint_id, cluster_id)?;
        let attribute = cluster.check_read(attribute_id)?;
        let binding = self.bound_entity(endpoint_id, cluster_id, attribute.name)?;

        if !attribute.attribute_type.accepts(value) {
            return Err(QuirkError::TypeMismatch {
                attribute: attribute.name,
                expected: attribute.attribute_type,
                actual: value.attribute_type(),
            });
        }

        let entity_value = match &binding.kind {
            EntityKind::Switch { inverted } => {
                let on = value.as_bool().unwrap_or_default();
                EntityValue::Switch(on != *inverted)
            }
            EntityKind::Enum { value_set } => {
                let code = value.as_enum_code().ok_or(QuirkError::TypeMismatch {
                    attribute: attribute.name,
                    expected: attribute.attribute_type,
                    actual: value.attribute_type(),
                })?;
                EntityValue::Enum(value_set.label(code)?)
            }
        };

        debug!(
            "Resolved {} on endpoint {} to {}",
            attribute.name, endpoint_id, entity_value
        );

        Ok(EntityState {
            translation_key: binding.translation_key.clone(),
            fallback_name: binding.fallback_name.clone(),
            value: entity_value,
        })
    }

    /// Encodes a UI command against a bound entity as an attribute write.
    pub fn command(
        &self,
        endpoint_id: u8,
        cluster_id: u16,
        attribute_name: &str,
        command: &EntityCommand,
    ) -> Result<WriteAttribute> {
        let cluster = self.replaced_cluster(endpoint_id, cluster_id)?;
        let binding = self.bound_entity(endpoint_id, cluster_id, attribute_name)?;
        let attribute = cluster
            .attribute_by_name(attribute_name)
            .ok_or_else(|| QuirkError::AttributeNotFound {
                cluster: cluster_id,
                attribute: attribute_name.to_string(),
            })?;

        let value = match (&binding.kind, command) {
            (EntityKind::Switch { inverted }, EntityCommand::Turn(on)) => {
                AttributeValue::Bool(*on != *inverted)
            }
            (EntityKind::Enum { value_set }, EntityCommand::Select(label)) => {
                let code = value_set.code(label)?;
                AttributeValue::from_enum_code(code, attribute.attribute_type).ok_or_else(
                    || {
                        QuirkError::InvalidCommand(format!(
                            "code {code:#06x} does not fit attribute {}",
                            attribute.name
                        ))
                    },
                )?
            }
            (EntityKind::Switch { .. }, other) => {
                return Err(QuirkError::InvalidCommand(format!(
                    "{other:?} sent to switch {}",
                    binding.translation_key
                )));
            }
            (EntityKind::Enum { .. }, other) => {
                return Err(QuirkError::InvalidCommand(format!(
                    "{other:?} sent to selector {}",
                    binding.translation_key
                )));
            }
        };

        cluster.check_write(attribute.id, &value)?;

        Ok(WriteAttribute {
            endpoint_id,
            cluster_id,
            attribute_id: attribute.id,
            value,
        })
    }
}

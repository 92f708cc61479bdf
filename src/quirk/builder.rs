use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{QuirkError, Result};
use crate::quirk::{DeviceRegistry, EntityBinding, EntityBindingBuilder, EntityKind};
use crate::zcl::{AttributeType, AttributeValue, ClusterSchema};

/// Replaces the device's own cluster on an endpoint with a schema from this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClusterReplacement {
    pub endpoint_id: u8,
    pub cluster: ClusterSchema,
}

/// A validated device profile, immutable once built.
///
/// [`QuirkBuilder::build`] is the only way to obtain one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quirk {
    manufacturer: String,
    model: String,
    replacements: Vec<ClusterReplacement>,
    entities: Vec<EntityBinding>,
}

impl Quirk {
    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn replacements(&self) -> &[ClusterReplacement] {
        &self.replacements
    }

    pub fn entities(&self) -> &[EntityBinding] {
        &self.entities
    }

    pub fn cluster(&self, endpoint_id: u8, cluster_id: u16) -> Option<&ClusterSchema> {
        self.replacements
            .iter()
            .find(|r| r.endpoint_id == endpoint_id && r.cluster.id == cluster_id)
            .map(|r| &r.cluster)
    }

    pub fn entity(
        &self,
        endpoint_id: u8,
        cluster_id: u16,
        attribute_name: &str,
    ) -> Option<&EntityBinding> {
        self.entities.iter().find(|e| {
            e.endpoint_id == endpoint_id
                && e.cluster_id == cluster_id
                && e.attribute_name == attribute_name
        })
    }
}

/// Chained declaration of a [`Quirk`]. Nothing is checked until [`QuirkBuilder::build`].
pub struct QuirkBuilder {
    manufacturer: String,
    model: String,
    replacements: Vec<ClusterReplacement>,
    entities: Vec<EntityBindingBuilder>,
    allow_unverified: bool,
}

impl QuirkBuilder {
    pub fn new(manufacturer: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            model: model.into(),
            replacements: Vec::new(),
            entities: Vec::new(),
            allow_unverified: true,
        }
    }

    pub fn replaces(mut self, cluster: ClusterSchema, endpoint_id: u8) -> Self {
        self.replacements.push(ClusterReplacement {
            endpoint_id,
            cluster,
        });
        self
    }

    pub fn entity(mut self, binding: EntityBindingBuilder) -> Self {
        self.entities.push(binding);
        self
    }

    /// Whether attributes flagged unverified may be bound to entities.
    pub fn allow_unverified(mut self, allow: bool) -> Self {
        self.allow_unverified = allow;
        self
    }

    pub fn build(mut self) -> Result<Quirk> {
        let mut replaced = HashSet::new();
        for replacement in &self.replacements {
            replacement.cluster.validate()?;
            if !replaced.insert((replacement.endpoint_id, replacement.cluster.id)) {
                return Err(QuirkError::BindingConflict {
                    endpoint: replacement.endpoint_id,
                    cluster: replacement.cluster.id,
                    reason: "cluster replaced more than once".to_string(),
                });
            }
        }

        let mut bound = HashSet::new();
        let mut entities = Vec::new();
        for builder in std::mem::take(&mut self.entities) {
            let binding = EntityBinding::from_builder(builder)?;
            self.check_binding(&binding)?;
            if !bound.insert((
                binding.endpoint_id,
                binding.cluster_id,
                binding.attribute_name.clone(),
            )) {
                return Err(QuirkError::BindingConflict {
                    endpoint: binding.endpoint_id,
                    cluster: binding.cluster_id,
                    reason: format!("attribute {} bound more than once", binding.attribute_name),
                });
            }
            entities.push(binding);
        }

        debug!(
            "Built quirk for {} / {} with {} replacements and {} entities",
            self.manufacturer,
            self.model,
            self.replacements.len(),
            entities.len()
        );

        Ok(Quirk {
            manufacturer: self.manufacturer,
            model: self.model,
            replacements: self.replacements,
            entities,
        })
    }

    /// Builds the quirk and registers it, returning the registered instance.
    pub fn add_to_registry(self, registry: &DeviceRegistry) -> Result<Arc<Quirk>> {
        registry.register(self.build()?)
    }

    fn check_binding(&self, binding: &EntityBinding) -> Result<()> {
        let cluster = self
            .replacements
            .iter()
            .find(|r| r.endpoint_id == binding.endpoint_id && r.cluster.id == binding.cluster_id)
            .map(|r| r.cluster)
            .ok_or(QuirkError::ClusterNotFound {
                endpoint: binding.endpoint_id,
                cluster: binding.cluster_id,
            })?;

        let attribute = cluster
            .attribute_by_name(&binding.attribute_name)
            .ok_or_else(|| QuirkError::AttributeNotFound {
                cluster: cluster.id,
                attribute: binding.attribute_name.clone(),
            })?;

        if attribute.unverified {
            if !self.allow_unverified {
                return Err(QuirkError::UnverifiedAttribute {
                    cluster: cluster.id,
                    attribute: attribute.name,
                });
            }
            warn!(
                "Binding unverified attribute {} on cluster {:#06x}",
                attribute.name, cluster.id
            );
        }

        match &binding.kind {
            EntityKind::Switch { .. } => {
                if attribute.attribute_type != AttributeType::Bool {
                    return Err(QuirkError::TypeMismatch {
                        attribute: attribute.name,
                        expected: AttributeType::Bool,
                        actual: attribute.attribute_type,
                    });
                }
            }
            EntityKind::Enum { value_set } => {
                if !attribute.attribute_type.holds_enum_code() {
                    return Err(QuirkError::TypeMismatch {
                        attribute: attribute.name,
                        expected: AttributeType::Enum16,
                        actual: attribute.attribute_type,
                    });
                }
                value_set.validate()?;
                if let Some(&(label, code)) = value_set.members.iter().find(|(_, code)| {
                    AttributeValue::from_enum_code(*code, attribute.attribute_type).is_none()
                }) {
                    return Err(QuirkError::BindingConflict {
                        endpoint: binding.endpoint_id,
                        cluster: cluster.id,
                        reason: format!(
                            "{}::{label} ({code:#06x}) does not fit {:?} attribute {}",
                            value_set.name, attribute.attribute_type, attribute.name
                        ),
                    });
                }
            }
        }

        if let Some(reporting) = &binding.reporting {
            reporting.validate()?;
            if !attribute.access.is_reportable() {
                return Err(QuirkError::InvalidReportingConfig(format!(
                    "attribute {} on cluster {:#06x} is not reportable",
                    attribute.name, cluster.id
                )));
            }
            if reporting.reportable_change != 0 && !attribute.attribute_type.is_numeric() {
                debug!(
                    "Reportable change {} ignored for non-numeric attribute {}",
                    reporting.reportable_change, attribute.name
                );
            }
        }

        Ok(())
    }
}

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::error::{QuirkError, Result};
use crate::zcl::{AttributeDef, AttributeValue};

/// A fixed set of attributes exposed under one cluster code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClusterSchema {
    pub id: u16,
    pub name: &'static str,
    /// Name under which the hub exposes this cluster on an endpoint.
    pub ep_attribute: &'static str,
    pub manufacturer_specific: bool,
    pub attributes: &'static [AttributeDef],
}

impl ClusterSchema {
    pub fn attribute(&self, id: u16) -> Option<&'static AttributeDef> {
        self.attributes.iter().find(|a| a.id == id)
    }

    pub fn attribute_by_name(&self, name: &str) -> Option<&'static AttributeDef> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn mandatory_attributes(&self) -> impl Iterator<Item = &'static AttributeDef> {
        self.attributes.iter().filter(|a| a.mandatory)
    }

    pub fn unverified_attributes(&self) -> impl Iterator<Item = &'static AttributeDef> {
        self.attributes.iter().filter(|a| a.unverified)
    }

    /// Checks that attribute ids and names are unique.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for attribute in self.attributes {
            if !ids.insert(attribute.id) {
                return Err(QuirkError::DuplicateAttributeId {
                    cluster: self.id,
                    attribute: attribute.id,
                });
            }
            if !names.insert(attribute.name) {
                return Err(QuirkError::DuplicateAttributeName {
                    cluster: self.id,
                    name: attribute.name,
                });
            }
        }
        Ok(())
    }

    fn lookup(&self, id: u16) -> Result<&'static AttributeDef> {
        self.attribute(id).ok_or_else(|| QuirkError::AttributeNotFound {
            cluster: self.id,
            attribute: format!("{id:#06x}"),
        })
    }

    pub fn check_read(&self, id: u16) -> Result<&'static AttributeDef> {
        let attribute = self.lookup(id)?;
        if !attribute.access.is_readable() {
            return Err(QuirkError::PermissionDenied {
                cluster: self.id,
                attribute: attribute.name,
                operation: "read",
            });
        }
        Ok(attribute)
    }

    /// Validates an attribute write before it is handed to the protocol stack.
    pub fn check_write(&self, id: u16, value: &AttributeValue) -> Result<&'static AttributeDef> {
        let attribute = self.lookup(id)?;
        if !attribute.access.is_writable() {
            debug!(
                "Rejecting write to read-only attribute {} on cluster {:#06x}",
                attribute.name, self.id
            );
            return Err(QuirkError::PermissionDenied {
                cluster: self.id,
                attribute: attribute.name,
                operation: "write",
            });
        }
        if !attribute.attribute_type.accepts(value) {
            return Err(QuirkError::TypeMismatch {
                attribute: attribute.name,
                expected: attribute.attribute_type,
                actual: value.attribute_type(),
            });
        }
        Ok(attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zcl::{AccessMode, AttributeType};

    const ATTRS: &[AttributeDef] = &[
        AttributeDef::new(0x0001, "level", AttributeType::Uint8, AccessMode::RWP).mandatory(),
        AttributeDef::new(0x0002, "status", AttributeType::Bitmap8, AccessMode::R),
        AttributeDef::new(0x0003, "units", AttributeType::Enum16, AccessMode::R).unverified(),
    ];

    const TEST_CLUSTER: ClusterSchema = ClusterSchema {
        id: 0xFC00,
        name: "TestCluster",
        ep_attribute: "test_cluster",
        manufacturer_specific: true,
        attributes: ATTRS,
    };

    #[test]
    fn test_validate_unique() {
        assert!(TEST_CLUSTER.validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_id() {
        const DUP: &[AttributeDef] = &[
            AttributeDef::new(0x0001, "a", AttributeType::Bool, AccessMode::R),
            AttributeDef::new(0x0001, "b", AttributeType::Bool, AccessMode::R),
        ];
        let cluster = ClusterSchema {
            attributes: DUP,
            ..TEST_CLUSTER
        };
        assert_eq!(
            cluster.validate(),
            Err(QuirkError::DuplicateAttributeId {
                cluster: 0xFC00,
                attribute: 0x0001
            })
        );
    }

    #[test]
    fn test_validate_duplicate_name() {
        const DUP: &[AttributeDef] = &[
            AttributeDef::new(0x0001, "a", AttributeType::Bool, AccessMode::R),
            AttributeDef::new(0x0002, "a", AttributeType::Bool, AccessMode::R),
        ];
        let cluster = ClusterSchema {
            attributes: DUP,
            ..TEST_CLUSTER
        };
        assert!(matches!(
            cluster.validate(),
            Err(QuirkError::DuplicateAttributeName { name: "a", .. })
        ));
    }

    #[test]
    fn test_check_write() {
        assert!(TEST_CLUSTER
            .check_write(0x0001, &AttributeValue::Uint8(3))
            .is_ok());
        assert!(matches!(
            TEST_CLUSTER.check_write(0x0002, &AttributeValue::Bitmap8(0)),
            Err(QuirkError::PermissionDenied {
                operation: "write",
                ..
            })
        ));
        assert!(matches!(
            TEST_CLUSTER.check_write(0x0001, &AttributeValue::Bool(true)),
            Err(QuirkError::TypeMismatch { .. })
        ));
        assert!(matches!(
            TEST_CLUSTER.check_write(0x0042, &AttributeValue::Uint8(1)),
            Err(QuirkError::AttributeNotFound { .. })
        ));
    }

    #[test]
    fn test_listings() {
        let mandatory: Vec<_> = TEST_CLUSTER.mandatory_attributes().map(|a| a.name).collect();
        assert_eq!(mandatory, vec!["level"]);
        let unverified: Vec<_> = TEST_CLUSTER.unverified_attributes().map(|a| a.name).collect();
        assert_eq!(unverified, vec!["units"]);
        assert_eq!(TEST_CLUSTER.check_read(0x0002).unwrap().name, "status");
    }
}

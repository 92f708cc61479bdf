use serde::Serialize;

use crate::zcl::{AccessMode, AttributeType};

/// Immutable definition of a single attribute within a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeDef {
    pub id: u16,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub access: AccessMode,
    pub mandatory: bool,
    /// Declared by the cluster model but not confirmed to exist on real devices.
    pub unverified: bool,
}

impl AttributeDef {
    pub const fn new(
        id: u16,
        name: &'static str,
        attribute_type: AttributeType,
        access: AccessMode,
    ) -> Self {
        Self {
            id,
            name,
            attribute_type,
            access,
            mandatory: false,
            unverified: false,
        }
    }

    pub const fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub const fn unverified(mut self) -> Self {
        self.unverified = true;
        self
    }
}

/// Global attribute present on every cluster.
pub const CLUSTER_REVISION: AttributeDef =
    AttributeDef::new(0xFFFD, "cluster_revision", AttributeType::Uint16, AccessMode::R);

/// Global attribute present on every cluster.
pub const REPORTING_STATUS: AttributeDef =
    AttributeDef::new(0xFFFE, "reporting_status", AttributeType::Enum8, AccessMode::R);

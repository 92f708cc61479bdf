//! Attribute and cluster model shared by every device profile.

mod access;
mod attribute;
mod cluster;
mod enums;
mod types;

pub use access::AccessMode;
pub use attribute::{AttributeDef, CLUSTER_REVISION, REPORTING_STATUS};
pub use cluster::ClusterSchema;
pub use enums::{EnumValueSet, ZclEnum};
pub use types::{AttributeType, AttributeValue};

use thiserror::Error;

use crate::zcl::AttributeType;

pub type Result<T> = std::result::Result<T, QuirkError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuirkError {
    #[error("Unknown value {code:#06x} for enum {set}")]
    UnknownEnumValue { set: &'static str, code: u16 },
    #[error("Unknown label '{label}' for enum {set}")]
    UnknownEnumLabel { set: &'static str, label: String },
    #[error("Enum {set} declares code {code:#06x} more than once")]
    DuplicateEnumCode { set: &'static str, code: u16 },
    #[error("Enum {set} declares label '{label}' more than once")]
    DuplicateEnumLabel { set: &'static str, label: &'static str },
    #[error("Cluster {cluster:#06x} declares attribute id {attribute:#06x} more than once")]
    DuplicateAttributeId { cluster: u16, attribute: u16 },
    #[error("Cluster {cluster:#06x} declares attribute '{name}' more than once")]
    DuplicateAttributeName { cluster: u16, name: &'static str },
    #[error("Invalid access mode '{0}'")]
    InvalidAccessMode(String),
    #[error("Attribute {attribute} not found on cluster {cluster:#06x}")]
    AttributeNotFound { cluster: u16, attribute: String },
    #[error("Attribute {attribute} on cluster {cluster:#06x} does not permit {operation}")]
    PermissionDenied {
        cluster: u16,
        attribute: &'static str,
        operation: &'static str,
    },
    #[error("Attribute {attribute} expects a value of type {expected:?}, got {actual:?}")]
    TypeMismatch {
        attribute: &'static str,
        expected: AttributeType,
        actual: AttributeType,
    },
    #[error("Cannot parse '{input}' as {expected:?}")]
    InvalidValue {
        input: String,
        expected: AttributeType,
    },
    #[error("No cluster {cluster:#06x} on endpoint {endpoint}")]
    ClusterNotFound { endpoint: u8, cluster: u16 },
    #[error("No entity bound to endpoint {endpoint}, cluster {cluster:#06x}, attribute {attribute}")]
    BindingNotFound {
        endpoint: u8,
        cluster: u16,
        attribute: String,
    },
    #[error("Conflicting configuration on endpoint {endpoint}, cluster {cluster:#06x}: {reason}")]
    BindingConflict {
        endpoint: u8,
        cluster: u16,
        reason: String,
    },
    #[error("Attribute {attribute} on cluster {cluster:#06x} is unverified and cannot be bound")]
    UnverifiedAttribute { cluster: u16, attribute: &'static str },
    #[error("Incomplete entity binding: {0}")]
    IncompleteBinding(String),
    #[error("Invalid reporting configuration: {0}")]
    InvalidReportingConfig(String),
    #[error("Invalid entity command: {0}")]
    InvalidCommand(String),
    #[error("A different quirk is already registered for {manufacturer} / {model}")]
    RegistrationConflict { manufacturer: String, model: String },
}

//! Device quirks: cluster replacements and entity bindings keyed by device identity.

mod builder;
mod entity;
mod registry;
mod reporting;
mod resolve;

pub use builder::{ClusterReplacement, Quirk, QuirkBuilder};
pub use entity::{
    EntityBinding, EntityBindingBuilder, EntityCommand, EntityKind, EntityState, EntityType,
    EntityValue,
};
pub use registry::DeviceRegistry;
pub use reporting::ReportingConfig;
pub use resolve::WriteAttribute;

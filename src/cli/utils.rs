use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use zcl_quirks_rs::{DeviceRegistry, Quirk};
use zcl_quirks_rs::zcl::{AttributeDef, ClusterSchema};

#[derive(Args, Debug, Clone)]
pub struct Target {
    #[arg(long)]
    pub manufacturer: String,
    #[arg(long)]
    pub model: String,
    #[arg(long)]
    pub endpoint: u8,
    /// Cluster id, decimal or 0x-prefixed
    #[arg(long, value_parser = parse_u16)]
    pub cluster: u16,
}

pub fn parse_u16(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("Invalid 16-bit id '{s}': {e}"))
}

pub fn find_quirk(
    registry: &DeviceRegistry,
    manufacturer: &str,
    model: &str,
) -> Result<Arc<Quirk>> {
    registry
        .get(manufacturer, model)
        .with_context(|| format!("No quirk registered for {manufacturer} / {model}"))
}

pub fn find_cluster<'a>(quirk: &'a Quirk, target: &Target) -> Result<&'a ClusterSchema> {
    quirk.cluster(target.endpoint, target.cluster).ok_or_else(|| {
        anyhow!(
            "No cluster {:#06x} on endpoint {}",
            target.cluster,
            target.endpoint
        )
    })
}

/// Looks an attribute up by name, falling back to its numeric id.
pub fn find_attribute(cluster: &ClusterSchema, attribute: &str) -> Result<&'static AttributeDef> {
    cluster
        .attribute_by_name(attribute)
        .or_else(|| parse_u16(attribute).ok().and_then(|id| cluster.attribute(id)))
        .with_context(|| format!("Unknown attribute '{attribute}' on {}", cluster.name))
}

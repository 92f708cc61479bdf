use anyhow::Result;
use zcl_quirks_rs::DeviceRegistry;

use crate::utils::{Target, find_attribute, find_cluster, find_quirk};

pub fn resolve(
    registry: &DeviceRegistry,
    target: &Target,
    attribute: &str,
    value: &str,
) -> Result<()> {
    let quirk = find_quirk(registry, &target.manufacturer, &target.model)?;
    let cluster = find_cluster(&quirk, target)?;
    let attribute = find_attribute(cluster, attribute)?;
    let value = attribute.attribute_type.parse_value(value)?;

    let state = quirk.resolve(target.endpoint, target.cluster, attribute.id, &value)?;
    println!("{} ({}): {}", state.fallback_name, state.translation_key, state.value);
    Ok(())
}

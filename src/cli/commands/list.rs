use anyhow::Result;
use zcl_quirks_rs::DeviceRegistry;

use crate::utils::find_quirk;

pub fn list(registry: &DeviceRegistry) -> Result<()> {
    for (manufacturer, model) in registry.identities() {
        let Some(quirk) = registry.get(&manufacturer, &model) else {
            continue;
        };
        println!(
            "{manufacturer} / {model}: {} replaced clusters, {} entities",
            quirk.replacements().len(),
            quirk.entities().len()
        );
    }
    Ok(())
}

pub fn show(registry: &DeviceRegistry, manufacturer: &str, model: &str) -> Result<()> {
    let quirk = find_quirk(registry, manufacturer, model)?;
    println!("{}", serde_json::to_string_pretty(quirk.as_ref())?);
    Ok(())
}

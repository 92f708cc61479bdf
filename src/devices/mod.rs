pub mod ac_controller;

use tracing::info;

use crate::error::Result;
use crate::quirk::DeviceRegistry;
use crate::settings::Settings;

/// Registers every device profile enabled in `settings`, returning how many were mounted.
pub fn register_builtin(registry: &DeviceRegistry, settings: &Settings) -> Result<usize> {
    let mut mounted = 0;
    if settings.mount_ac_controller.unwrap_or(true) {
        ac_controller::register(registry, settings)?;
        mounted += 1;
    } else {
        info!("Skipping {} {}", ac_controller::MANUFACTURER, ac_controller::MODEL);
    }
    Ok(mounted)
}

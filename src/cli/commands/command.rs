use anyhow::{Result, bail};
use zcl_quirks_rs::DeviceRegistry;
use zcl_quirks_rs::quirk::EntityCommand;
use zcl_quirks_rs::zcl::{AttributeType, AttributeValue};

use crate::utils::{Target, find_quirk};

pub fn command(
    registry: &DeviceRegistry,
    target: &Target,
    attribute: &str,
    select: Option<String>,
    turn: Option<String>,
) -> Result<()> {
    let entity_command = match (select, turn) {
        (Some(label), None) => EntityCommand::Select(label),
        (None, Some(state)) => match AttributeType::Bool.parse_value(&state)? {
            AttributeValue::Bool(on) => EntityCommand::Turn(on),
            _ => bail!("Invalid switch state '{state}'"),
        },
        _ => bail!("Exactly one of --select or --turn is required"),
    };

    let quirk = find_quirk(registry, &target.manufacturer, &target.model)?;
    let write = quirk.command(target.endpoint, target.cluster, attribute, &entity_command)?;
    println!("{}", serde_json::to_string_pretty(&write)?);
    Ok(())
}

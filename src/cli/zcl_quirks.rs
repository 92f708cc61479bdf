mod commands;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use zcl_quirks_rs::DeviceRegistry;
use zcl_quirks_rs::devices::register_builtin;
use zcl_quirks_rs::logging::{self, LogConfig, RotationPeriod};
use zcl_quirks_rs::settings::Settings;

use crate::utils::Target;

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// List registered device identities
    List,
    /// Print a registered quirk as JSON
    Show {
        #[arg(long)]
        manufacturer: String,
        #[arg(long)]
        model: String,
    },
    /// Decode a reported attribute value into its entity state
    Resolve {
        #[command(flatten)]
        target: Target,
        /// Attribute name or id (e.g. present_value or 0x0055)
        #[arg(long)]
        attribute: String,
        #[arg(long)]
        value: String,
    },
    /// Encode an entity command as an attribute write
    Command {
        #[command(flatten)]
        target: Target,
        #[arg(long, default_value = "present_value")]
        attribute: String,
        /// Label to select on an enum entity
        #[arg(long, conflicts_with = "turn")]
        select: Option<String>,
        /// on or off, for switch entities
        #[arg(long)]
        turn: Option<String>,
    },
}

#[derive(Parser, Debug)]
struct Params {
    /// Settings file path (if not set, built-in defaults are used)
    #[clap(long, env = "ZCL_QUIRKS_SETTINGS")]
    settings: Option<PathBuf>,
    /// Directory for rolling log files (if not set, logs go to stdout only)
    #[clap(long)]
    log_dir: Option<PathBuf>,
    /// Log rotation period: hourly, daily or never
    #[clap(long, default_value = "daily")]
    log_rotation: RotationPeriod,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let params = Params::parse();

    let log_config = params.log_dir.as_ref().map(|dir| LogConfig {
        rotation: params.log_rotation,
        ..LogConfig::in_dir(dir)
    });
    let _log_guard = logging::init(log_config.as_ref()).context("Failed to set up logging")?;

    let settings = Settings::load_or_default(params.settings.as_deref());
    debug!("Using settings {settings:?}");

    let registry = DeviceRegistry::global();
    register_builtin(registry, &settings).context("Failed to register device profiles")?;

    match params.command {
        Commands::List => commands::list(registry),
        Commands::Show {
            manufacturer,
            model,
        } => commands::show(registry, &manufacturer, &model),
        Commands::Resolve {
            target,
            attribute,
            value,
        } => commands::resolve(registry, &target, &attribute, &value),
        Commands::Command {
            target,
            attribute,
            select,
            turn,
        } => commands::command(registry, &target, &attribute, select, turn),
    }
}

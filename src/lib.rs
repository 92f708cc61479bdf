//! Device quirks mapping vendor-specific Zigbee endpoints onto standard
//! attribute clusters and hub entities.

pub mod devices;
pub mod error;
pub mod logging;
pub mod quirk;
pub mod settings;
pub mod zcl;

pub use error::{QuirkError, Result};
pub use quirk::{DeviceRegistry, Quirk, QuirkBuilder};

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use tracing::{debug, info};

use crate::error::{QuirkError, Result};
use crate::quirk::Quirk;

type DeviceIdentity = (String, String);

static GLOBAL_REGISTRY: LazyLock<DeviceRegistry> = LazyLock::new(DeviceRegistry::new);

/// Quirks keyed by the (manufacturer, model) identity a device advertises.
#[derive(Default)]
pub struct DeviceRegistry {
    quirks: DashMap<DeviceIdentity, Arc<Quirk>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            quirks: DashMap::new(),
        }
    }

    /// Process-wide registry consulted on device discovery.
    pub fn global() -> &'static DeviceRegistry {
        &GLOBAL_REGISTRY
    }

    /// Registers a quirk. Registering an identical quirk again returns the
    /// existing instance; a different quirk for the same identity is rejected.
    pub fn register(&self, quirk: Quirk) -> Result<Arc<Quirk>> {
        let key = (quirk.manufacturer().to_string(), quirk.model().to_string());
        let quirk = Arc::new(quirk);
        let entry = self
            .quirks
            .entry(key)
            .or_insert_with(|| Arc::clone(&quirk));
        let registered = Arc::clone(entry.value());
        drop(entry);

        if Arc::ptr_eq(&registered, &quirk) {
            info!(
                "Registered quirk for {} / {} ({} entities)",
                quirk.manufacturer(),
                quirk.model(),
                quirk.entities().len()
            );
            Ok(registered)
        } else if *registered == *quirk {
            debug!(
                "Quirk for {} / {} already registered",
                quirk.manufacturer(),
                quirk.model()
            );
            Ok(registered)
        } else {
            Err(QuirkError::RegistrationConflict {
                manufacturer: quirk.manufacturer().to_string(),
                model: quirk.model().to_string(),
            })
        }
    }

    pub fn get(&self, manufacturer: &str, model: &str) -> Option<Arc<Quirk>> {
        self.quirks
            .get(&(manufacturer.to_string(), model.to_string()))
            .map(|q| Arc::clone(q.value()))
    }

    pub fn len(&self) -> usize {
        self.quirks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quirks.is_empty()
    }

    /// Registered identities, sorted.
    pub fn identities(&self) -> Vec<DeviceIdentity> {
        let mut identities: Vec<_> = self.quirks.iter().map(|q| q.key().clone()).collect();
        identities.sort();
        identities
    }
}

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub mount_ac_controller: Option<bool>,
    pub allow_unverified_bindings: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mount_ac_controller: Some(true),
            allow_unverified_bindings: Some(true),
        }
    }
}

impl Settings {
    pub fn allow_unverified_bindings(&self) -> bool {
        self.allow_unverified_bindings.unwrap_or(true)
    }

    /// Reads settings from a JSON file, falling back to defaults when the file
    /// is missing or malformed.
    pub fn load_or_default(path: Option<&Path>) -> Settings {
        let Some(path) = path else {
            return Settings::default();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Invalid settings file {}: {e}, using defaults", path.display());
                Settings::default()
            }),
            Err(e) => {
                warn!("Failed to read settings file {}: {e}, using defaults", path.display());
                Settings::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"mount_ac_controller": false, "allow_unverified_bindings": null}"#,
        )
        .unwrap();
        let settings = Settings::load_or_default(Some(&path));
        assert_eq!(settings.mount_ac_controller, Some(false));
        assert!(settings.allow_unverified_bindings());
    }

    #[test]
    fn test_missing_or_invalid_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(Settings::load_or_default(Some(&missing)), Settings::default());

        let invalid = dir.path().join("invalid.json");
        std::fs::write(&invalid, "not json").unwrap();
        assert_eq!(Settings::load_or_default(Some(&invalid)), Settings::default());
        assert_eq!(Settings::load_or_default(None), Settings::default());
    }
}

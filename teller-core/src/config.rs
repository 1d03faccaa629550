//! Configuration management
//!
//! Settings live in settings.json in the teller directory:
//! ```json
//! {
//!   "branch": { "bankName": "SBI", "branchCode": "SBI001", "branchAddress": "700 Olive Way" },
//!   "atm": { "location": "Redmond" },
//!   "logging": { "enabled": true }
//! }
//! ```
//! Fields the CLI does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::Branch;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    branch: Option<Branch>,
    #[serde(default)]
    atm: AtmSettings,
    #[serde(default)]
    logging: LoggingSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AtmSettings {
    #[serde(default)]
    location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoggingSettings {
    #[serde(default)]
    enabled: Option<bool>,
}

pub const DEFAULT_ATM_LOCATION: &str = "Redmond";

/// Teller configuration (resolved view of settings)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub branch: Branch,
    pub atm_location: String,
    /// Effective for this run, including any TELLER_LOGGING override
    pub logging_enabled: bool,
    /// As stored in settings.json; the only logging value `save` writes
    #[serde(skip)]
    stored_logging: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            branch: Branch::default(),
            atm_location: DEFAULT_ATM_LOCATION.to_string(),
            logging_enabled: true,
            stored_logging: None,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "true" | "1" | "yes" | "TRUE" | "YES" => Some(true),
        "false" | "0" | "no" | "FALSE" | "NO" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load config from the teller directory
    ///
    /// Event logging can be toggled with the TELLER_LOGGING environment
    /// variable, which wins over the settings file.
    pub fn load(teller_dir: &Path) -> Result<Self> {
        let logging_override = std::env::var("TELLER_LOGGING")
            .ok()
            .as_deref()
            .and_then(parse_flag);
        Ok(Self::resolve(read_settings(teller_dir)?, logging_override))
    }

    fn resolve(raw: SettingsFile, logging_override: Option<bool>) -> Self {
        let defaults = Config::default();
        Self {
            branch: raw.branch.unwrap_or(defaults.branch),
            atm_location: raw.atm.location.unwrap_or(defaults.atm_location),
            logging_enabled: logging_override
                .or(raw.logging.enabled)
                .unwrap_or(defaults.logging_enabled),
            stored_logging: raw.logging.enabled,
        }
    }

    /// Turn the event log on or off, for this run and in settings.json
    pub fn set_logging(&mut self, enabled: bool) {
        self.logging_enabled = enabled;
        self.stored_logging = Some(enabled);
    }

    /// Whether TELLER_LOGGING changed the stored setting for this run
    pub fn logging_overridden(&self) -> bool {
        self.logging_enabled != self.stored_logging.unwrap_or(true)
    }

    /// Save config to the teller directory
    pub fn save(&self, teller_dir: &Path) -> Result<()> {
        let settings_path = teller_dir.join("settings.json");

        let mut settings = read_settings(teller_dir)?;
        settings.branch = Some(self.branch.clone());
        settings.atm.location = Some(self.atm_location.clone());
        settings.logging.enabled = self.stored_logging;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }
}

/// Read settings.json, falling back to defaults when missing or unreadable
fn read_settings(teller_dir: &Path) -> Result<SettingsFile> {
    let settings_path = teller_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.branch, Branch::default());
        assert_eq!(config.atm_location, "Redmond");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut config = Config {
            branch: Branch::new("Teller Bank", "TB001", "1 Bank St"),
            atm_location: "Seattle".to_string(),
            ..Config::default()
        };
        config.set_logging(false);
        config.save(dir.path()).unwrap();

        let loaded = Config::resolve(read_settings(dir.path()).unwrap(), None);
        assert_eq!(loaded.branch.branch_code, "TB001");
        assert_eq!(loaded.atm_location, "Seattle");
        assert!(!loaded.logging_enabled);
    }

    #[test]
    fn test_env_override_lasts_one_run() {
        let dir = tempdir().unwrap();

        let mut config = Config::resolve(read_settings(dir.path()).unwrap(), Some(false));
        assert!(!config.logging_enabled);
        assert!(config.logging_overridden());
        config.atm_location = "Kirkland".to_string();
        config.save(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(json["logging"]["enabled"].is_null());

        let next_run = Config::resolve(read_settings(dir.path()).unwrap(), None);
        assert!(next_run.logging_enabled);
        assert!(!next_run.logging_overridden());
        assert_eq!(next_run.atm_location, "Kirkland");
    }

    #[test]
    fn test_env_override_wins_over_settings_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"logging": {"enabled": false}}"#,
        )
        .unwrap();

        let config = Config::resolve(read_settings(dir.path()).unwrap(), Some(true));
        assert!(config.logging_enabled);
        config.save(dir.path()).unwrap();

        let stored = Config::resolve(read_settings(dir.path()).unwrap(), None);
        assert!(!stored.logging_enabled);
    }

    #[test]
    fn test_save_preserves_unknown_fields() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"atm": {"location": "Bellevue"}, "theme": "dark"}"#,
        )
        .unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        assert_eq!(config.atm_location, "Bellevue");
        config.atm_location = "Kirkland".to_string();
        config.save(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["atm"]["location"], "Kirkland");
        assert_eq!(json["branch"]["branchCode"], "SBI001");
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.atm_location, DEFAULT_ATM_LOCATION);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("yes"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}

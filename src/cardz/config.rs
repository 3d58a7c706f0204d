//! # Configuration
//!
//! Settings live in `config.json` inside the data directory. A missing file, or
//! a missing field, falls back to the defaults below.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `import_mode` | `ask` | What `cardz import` does without `--merge`/`--replace` |
//! | `card_order` | `position` | Card order for `ls` and `study` |
//! | `shuffle_study` | `false` | Shuffle the deck when studying |

use crate::error::{CardzError, Result};
use crate::merge::ImportMode;
use crate::model::CardOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const KEYS: &[&str] = &["import_mode", "card_order", "shuffle_study"];

/// Default behaviour of an import that names no mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPreference {
    #[default]
    Ask,
    Merge,
    Replace,
}

impl ImportPreference {
    /// The mode to use without asking, if any.
    pub fn fixed_mode(self) -> Option<ImportMode> {
        match self {
            ImportPreference::Ask => None,
            ImportPreference::Merge => Some(ImportMode::Merge),
            ImportPreference::Replace => Some(ImportMode::Replace),
        }
    }
}

impl std::fmt::Display for ImportPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportPreference::Ask => write!(f, "ask"),
            ImportPreference::Merge => write!(f, "merge"),
            ImportPreference::Replace => write!(f, "replace"),
        }
    }
}

impl std::str::FromStr for ImportPreference {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ask" => Ok(ImportPreference::Ask),
            "merge" => Ok(ImportPreference::Merge),
            "replace" => Ok(ImportPreference::Replace),
            other => Err(format!("Unknown import mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CardzConfig {
    pub import_mode: ImportPreference,
    pub card_order: CardOrder,
    pub shuffle_study: bool,
}

impl CardzConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&config_path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "import_mode" => Some(self.import_mode.to_string()),
            "card_order" => Some(self.card_order.to_string()),
            "shuffle_study" => Some(self.shuffle_study.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "import_mode" => self.import_mode = value.parse().map_err(CardzError::Validation)?,
            "card_order" => self.card_order = value.parse().map_err(CardzError::Validation)?,
            "shuffle_study" => {
                self.shuffle_study = parse_bool(value).ok_or_else(|| {
                    CardzError::Validation(format!("Expected true or false, got: {}", value))
                })?
            }
            _ => return Err(CardzError::Validation(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = CardzConfig::default();
        assert_eq!(config.import_mode, ImportPreference::Ask);
        assert_eq!(config.card_order, CardOrder::Position);
        assert!(!config.shuffle_study);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = CardzConfig::load(dir.path()).unwrap();
        assert_eq!(config, CardzConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut config = CardzConfig::default();
        config.set("card_order", "newest").unwrap();
        config.set("shuffle_study", "yes").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = CardzConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.card_order, CardOrder::Newest);
        assert!(loaded.shuffle_study);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"import_mode":"merge"}"#).unwrap();
        let config = CardzConfig::load(dir.path()).unwrap();
        assert_eq!(config.import_mode, ImportPreference::Merge);
        assert_eq!(config.card_order, CardOrder::Position);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = CardzConfig::default();
        assert!(config.set("import_mode", "sometimes").is_err());
        assert!(config.set("shuffle_study", "maybe").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, CardzConfig::default());
    }

    #[test]
    fn test_list_all_covers_every_key() {
        let listed = CardzConfig::default().list_all();
        let keys: Vec<&str> = listed.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, KEYS);
        assert_eq!(ImportPreference::Replace.fixed_mode(), Some(ImportMode::Replace));
        assert_eq!(ImportPreference::Ask.fixed_mode(), None);
    }
}

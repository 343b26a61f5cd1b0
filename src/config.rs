// ⚙️ Configuration - optional JSON file, every field defaulted

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Env var naming the JSON config file
pub const CONFIG_ENV: &str = "SPLIT_LEDGER_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for amounts in balance messages
    pub currency_symbol: String,

    /// Prefilled image URL in the add-friend form
    pub default_image_url: String,

    /// Where log lines go; none means no file
    pub log_file: Option<PathBuf>,

    /// Used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currency_symbol: "€".to_string(),
            default_image_url: "https://i.pravatar.cc/48".to_string(),
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the file named by `SPLIT_LEDGER_CONFIG`, or defaults
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.currency_symbol, "€");
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_json(
            r#"{ "currency_symbol": "$", "log_file": "/tmp/split.log" }"#,
        )
        .unwrap();

        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/split.log")));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.default_image_url, "https://i.pravatar.cc/48");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(AppConfig::from_json("{ currency_symbol: }").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = AppConfig::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}

//! # Runner Configuration
//!
//! Store name and pricing rates for a run.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BOOKSTORE_VAT_BPS=800                                              │
//! │     BOOKSTORE_STORE_NAME="Corner Books"                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or the BOOKSTORE_CONFIG variable                  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     8% VAT, 10% loyalty, 20% bulk from 5 lines                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # bookstore.toml
//! [store]
//! name = "Corner Books"
//!
//! [pricing]
//! vat_rate = 800          # basis points
//! loyalty_discount = 1000
//! bulk_discount = 2000
//! bulk_threshold = 5      # line entries
//! ```

use bookstore_core::validation::{validate_rate_bps, validate_text};
use bookstore_core::{PricingConfig, PricingEngine, Rate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_PATH_ENV: &str = "BOOKSTORE_CONFIG";

// =============================================================================
// Store Settings
// =============================================================================

/// Settings for the store the run is reported under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Human-readable store name, printed in the report header.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Online Bookstore".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete runner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSettings,

    /// Rates handed to the [`PricingEngine`].
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `BOOKSTORE_CONFIG`)
    /// 3. Environment variables
    ///
    /// A path given explicitly must exist; one taken from the environment
    /// falls back to defaults when missing.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.as_ref() {
            if !path.exists() {
                return Err(CliError::ConfigLoadFailed(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
        }

        let path = config_path.or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));
        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| CliError::ConfigLoadFailed(e.to_string()))?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document; missing sections take their defaults.
    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        validate_text("store name", &self.store.name)?;

        let pricing = &self.pricing;
        validate_rate_bps("vat_rate", pricing.vat_rate.bps())?;
        validate_rate_bps("loyalty_discount", pricing.loyalty_discount.bps())?;
        validate_rate_bps("bulk_discount", pricing.bulk_discount.bps())?;

        if pricing.bulk_threshold == 0 {
            return Err(CliError::InvalidConfig(
                "bulk_threshold must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `BOOKSTORE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// Values that do not parse are logged and skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("BOOKSTORE_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        let rates: [(&str, &mut Rate); 3] = [
            ("BOOKSTORE_VAT_BPS", &mut self.pricing.vat_rate),
            ("BOOKSTORE_LOYALTY_BPS", &mut self.pricing.loyalty_discount),
            ("BOOKSTORE_BULK_BPS", &mut self.pricing.bulk_discount),
        ];
        for (key, rate) in rates {
            if let Some(raw) = lookup(key) {
                match raw.trim().parse::<u32>() {
                    Ok(bps) => {
                        debug!(key, bps, "Overriding rate from environment");
                        *rate = Rate::from_bps(bps);
                    }
                    Err(_) => warn!(key, value = %raw, "Ignoring unparseable rate"),
                }
            }
        }

        if let Some(raw) = lookup("BOOKSTORE_BULK_THRESHOLD") {
            match raw.trim().parse::<usize>() {
                Ok(threshold) => {
                    debug!(threshold, "Overriding bulk threshold from environment");
                    self.pricing.bulk_threshold = threshold;
                }
                Err(_) => warn!(value = %raw, "Ignoring unparseable bulk threshold"),
            }
        }
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Builds the pricing engine for this configuration.
    pub fn engine(&self) -> PricingEngine {
        PricingEngine::new(self.pricing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::{CoreError, ValidationError};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.store.name, "Online Bookstore");
        assert_eq!(config.pricing.vat_rate.bps(), 800);
        assert_eq!(config.pricing.loyalty_discount.bps(), 1000);
        assert_eq!(config.pricing.bulk_discount.bps(), 2000);
        assert_eq!(config.pricing.bulk_threshold, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parsing() {
        let toml = r#"
            [store]
            name = "Corner Books"

            [pricing]
            vat_rate = 500
            bulk_threshold = 3
        "#;

        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.store.name, "Corner Books");
        assert_eq!(config.pricing.vat_rate.bps(), 500);
        assert_eq!(config.pricing.bulk_threshold, 3);
        // Unlisted keys keep their defaults
        assert_eq!(config.pricing.loyalty_discount.bps(), 1000);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_bad_toml_is_load_error() {
        assert!(matches!(
            AppConfig::from_toml("[pricing]\nvat_rate = \"lots\""),
            Err(CliError::ConfigLoadFailed(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup_from(&[
            ("BOOKSTORE_STORE_NAME", "Night Owl"),
            ("BOOKSTORE_VAT_BPS", "1900"),
            ("BOOKSTORE_LOYALTY_BPS", " 500 "),
            ("BOOKSTORE_BULK_THRESHOLD", "2"),
        ]));

        assert_eq!(config.store.name, "Night Owl");
        assert_eq!(config.pricing.vat_rate.bps(), 1900);
        assert_eq!(config.pricing.loyalty_discount.bps(), 500);
        assert_eq!(config.pricing.bulk_discount.bps(), 2000);
        assert_eq!(config.pricing.bulk_threshold, 2);
    }

    #[test]
    fn test_unparseable_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup_from(&[
            ("BOOKSTORE_VAT_BPS", "eight percent"),
            ("BOOKSTORE_BULK_THRESHOLD", "-1"),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.pricing.bulk_threshold = 0;
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));

        let mut config = AppConfig::default();
        config.pricing.vat_rate = Rate::from_bps(10_001);
        assert!(matches!(
            config.validate(),
            Err(CliError::Core(CoreError::Validation(
                ValidationError::OutOfRange { .. }
            )))
        ));

        let mut config = AppConfig::default();
        config.store.name = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let path = PathBuf::from("/nonexistent/bookstore.toml");
        assert!(matches!(
            AppConfig::load(Some(path)),
            Err(CliError::ConfigLoadFailed(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("bookstore-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[pricing]\nbulk_discount = 2500\n").unwrap();

        let config = AppConfig::load(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.pricing.bulk_discount.bps(), 2500);
        assert_eq!(config.engine().config().bulk_discount.bps(), 2500);
    }
}

// src/config.rs

//! Process-wide configuration for the vector library.
//!
//! The configuration is deserialized with serde (JSON through `serde_json`) or
//! read from the environment. It is resolved once: the first species lookup
//! freezes whatever `current()` returns, so `install` must run before any
//! vector work.

use log::{debug, warn};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorError};

/// Environment variable overriding the max-shape bit width.
pub const MAX_BITS_ENV: &str = "LANEWISE_MAX_BITS";

/// Largest max-shape width accepted from configuration.
pub const MAX_BIT_SIZE_LIMIT: usize = 2048;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // Missing fields take their default values.
pub struct Config {
    /// Overrides the detected platform-native width of `Shape::Max`.
    /// Must be a positive multiple of 128 no larger than 2048.
    pub max_bit_size: Option<usize>,
    /// Emit a debug log line each time a species singleton is created.
    pub log_species_creation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_bit_size: None, // Detect from the compile target
            log_species_creation: true,
        }
    }
}

impl Config {
    /// Parses a configuration from JSON text and validates it.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)
            .map_err(|e| VectorError::construction(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from `LANEWISE_MAX_BITS`.
    ///
    /// An unparsable or invalid value is ignored with a warning so that a bad
    /// environment never prevents the library from working.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Ok(raw) = std::env::var(MAX_BITS_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(bits) if validate_max_bits(bits).is_ok() => {
                    debug!("{} overrides max shape to {} bits", MAX_BITS_ENV, bits);
                    config.max_bit_size = Some(bits);
                }
                _ => warn!("Ignoring invalid {}={:?}", MAX_BITS_ENV, raw),
            }
        }
        config
    }

    /// Checks the invariants of every field.
    pub fn validate(&self) -> Result<()> {
        if let Some(bits) = self.max_bit_size {
            validate_max_bits(bits)?;
        }
        Ok(())
    }
}

fn validate_max_bits(bits: usize) -> Result<()> {
    if bits == 0 || bits % 128 != 0 || bits > MAX_BIT_SIZE_LIMIT {
        return Err(VectorError::construction(format!(
            "max bit size {} must be a positive multiple of 128 no larger than {}",
            bits, MAX_BIT_SIZE_LIMIT
        )));
    }
    Ok(())
}

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Installs the process-wide configuration.
///
/// Fails if a configuration was already installed or already resolved by a
/// species lookup.
pub fn install(config: Config) -> Result<()> {
    config.validate()?;
    CONFIG
        .set(config)
        .map_err(|_| VectorError::construction("configuration already resolved"))
}

/// Returns the process-wide configuration, resolving it from the environment
/// on first use.
pub fn current() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_bit_size, None);
    }

    #[test]
    fn test_json_partial_fields_use_defaults() {
        let config = Config::from_json_str(r#"{ "max_bit_size": 1024 }"#).unwrap();
        assert_eq!(config.max_bit_size, Some(1024));
        assert!(config.log_species_creation);
    }

    #[test]
    fn test_json_rejects_bad_width() {
        for text in [
            r#"{ "max_bit_size": 0 }"#,
            r#"{ "max_bit_size": 200 }"#,
            r#"{ "max_bit_size": 4096 }"#,
        ] {
            assert!(matches!(
                Config::from_json_str(text),
                Err(VectorError::Construction(_))
            ));
        }
    }

    #[test]
    fn test_json_rejects_garbage() {
        assert!(Config::from_json_str("not json").is_err());
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = Config {
            max_bit_size: Some(256),
            log_species_creation: false,
        };
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(Config::from_json_str(&text).unwrap(), config);
    }
}

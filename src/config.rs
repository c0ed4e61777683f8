//! # Settings
//!
//! Runtime settings for the pizzeria services, loaded in layers:
//!
//! 1. **Defaults**: [`Settings::default`] (2 s order submission, 1.5 s
//!    registration, 5 s success banner, built-in menu).
//! 2. **File**: an optional TOML (or any format the `config` crate detects by
//!    extension).
//! 3. **Environment**: variables prefixed with `PIZZERIA__`, nested with double
//!    underscores, e.g. `PIZZERIA__ORDER__SUBMIT_DELAY_MS=500`.

use crate::model::PriceCatalog;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

const ENV_PREFIX: &str = "PIZZERIA";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderSettings {
    /// Simulated order submission latency.
    pub submit_delay_ms: u64,
}

impl OrderSettings {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationSettings {
    /// Simulated registration latency.
    pub submit_delay_ms: u64,
    /// How long the success banner stays visible.
    pub banner_ms: u64,
}

impl RegistrationSettings {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn banner_duration(&self) -> Duration {
        Duration::from_millis(self.banner_ms)
    }
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1_500,
            banner_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Request channel capacity of each actor.
    pub buffer_size: usize,
    pub order: OrderSettings,
    pub registration: RegistrationSettings,
    pub catalog: PriceCatalog,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            order: OrderSettings::default(),
            registration: RegistrationSettings::default(),
            catalog: PriceCatalog::builtin(),
        }
    }
}

impl Settings {
    fn check(self) -> Result<Self, ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::Invalid("buffer_size must be at least 1".to_string()));
        }
        Ok(self)
    }
}

/// Loads settings from defaults, an optional file and `PIZZERIA__*` overrides.
///
/// A file passed explicitly must exist.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        info!("Loading settings from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }
    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<Settings>()?;
    settings.check()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_the_shop() {
        let settings = Settings::default();
        assert_eq!(settings.buffer_size, 32);
        assert_eq!(settings.order.submit_delay(), Duration::from_millis(2_000));
        assert_eq!(settings.registration.submit_delay(), Duration::from_millis(1_500));
        assert_eq!(settings.registration.banner_duration(), Duration::from_secs(5));
        assert_eq!(settings.catalog, PriceCatalog::builtin());
    }

    #[test]
    fn file_overrides_only_what_it_names() {
        let file = write_toml(
            r#"
            [order]
            submit_delay_ms = 250
            "#,
        );
        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.order.submit_delay_ms, 250);
        assert_eq!(settings.registration, RegistrationSettings::default());
    }

    #[test]
    fn file_can_replace_the_menu() {
        let file = write_toml(
            r#"
            [catalog]
            default_size = "Regular"
            default_crust = "Classic"
            sizes = [{ key = "Regular", price = 250 }]
            crusts = [{ key = "Classic", price = 0 }]
            toppings = [{ key = "Olive", price = 20 }]
            sides = [{ key = "Fries", price = 80 }]
            "#,
        );
        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.catalog.default_size(), "Regular");
        assert_eq!(settings.catalog.sides().len(), 1);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let file = write_toml("buffer_size = 0\n");
        assert!(matches!(
            load_settings(Some(file.path())),
            Err(ConfigError::Invalid(_))
        ));

        let file = write_toml(
            r#"
            [catalog]
            default_size = "Regular"
            default_crust = "Classic"
            sizes = [{ key = "Regular", price = 250 }]
            crusts = [{ key = "Classic", price = 10 }]
            toppings = [{ key = "Olive", price = 20 }]
            sides = [{ key = "Fries", price = 80 }]
            "#,
        );
        assert!(matches!(
            load_settings(Some(file.path())),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_settings(Some(path.as_path())).is_err());
    }
}

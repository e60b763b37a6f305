// Console configuration
use crate::application::console_service::ConsoleSettings;
use crate::domain::history::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZES};
use crate::domain::location::Coordinate;
use crate::domain::percentage::Calibration;
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub battery: BatterySettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://79.137.202.137:1050/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Voltage curve used to turn raw battery readings into percentages.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BatterySettings {
    pub low_volts: f64,
    pub high_volts: f64,
}

impl Default for BatterySettings {
    fn default() -> Self {
        Self {
            low_volts: Calibration::CURRENT.low,
            high_volts: Calibration::CURRENT.high,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapSettings {
    pub default_lat: f64,
    pub default_lng: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_lat: 52.42,
            default_lng: 10.79,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HistorySettings {
    pub page_sizes: Vec<u32>,
    pub default_page_size: u32,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AuthSettings {
    /// Bearer token to start the session with, skipping login.
    pub token: Option<String>,
}

impl ConsoleConfig {
    pub fn console_settings(&self) -> ConsoleSettings {
        ConsoleSettings {
            calibration: Calibration::new(self.battery.low_volts, self.battery.high_volts),
            default_center: Coordinate::new(self.map.default_lat, self.map.default_lng),
            page_sizes: self.history.page_sizes.clone(),
            default_page_size: self.history.default_page_size,
        }
    }
}

/// Load `config/console.toml` if present, overridden by `FLEET__SECTION__KEY`
/// environment variables.
pub fn load_console_config() -> anyhow::Result<ConsoleConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/console").required(false))
        .add_source(
            config::Environment::with_prefix("FLEET")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("history.page_sizes")
                .try_parsing(true),
        )
        .build()
        .context("Failed to read console configuration")?;

    settings
        .try_deserialize()
        .context("Invalid console configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(raw: &str) -> ConsoleConfig {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = from_toml("");
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.backend.timeout(), Duration::from_secs(30));
        assert_eq!(config.auth.token, None);

        let settings = config.console_settings();
        assert_eq!(settings.calibration, Calibration::CURRENT);
        assert_eq!(settings.default_center, Coordinate::new(52.42, 10.79));
        assert_eq!(settings.page_sizes, vec![5, 10, 20]);
        assert_eq!(settings.default_page_size, 5);
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let config = from_toml(
            r#"
            [battery]
            low_volts = 3.9

            [history]
            page_sizes = [10, 25]
            default_page_size = 10

            [auth]
            token = "preset"
            "#,
        );

        let settings = config.console_settings();
        assert_eq!(settings.calibration, Calibration::new(3.9, 4.2));
        assert_eq!(settings.page_sizes, vec![10, 25]);
        assert_eq!(config.auth.token.as_deref(), Some("preset"));
        assert_eq!(config.backend.base_url, "http://79.137.202.137:1050/api");
    }
}

//! Application configuration management.

use serde::{Deserialize, Deserializer};

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Settlement configuration.
    #[serde(default)]
    pub settlement: SettlementConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Settlement configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
    /// Currency every contribution is denominated in.
    #[serde(default = "default_currency", deserialize_with = "deserialize_currency")]
    pub currency: Currency,
    /// Overrides the currency's minor-unit precision.
    #[serde(default)]
    pub decimal_places: Option<u32>,
    /// Fixed seed for remainder allocation. Unset means a fresh random source per request.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Upper bound on contributions accepted in a single request.
    #[serde(default = "default_max_participants")]
    pub max_participants: usize,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            decimal_places: None,
            seed: None,
            max_participants: default_max_participants(),
        }
    }
}

impl SettlementConfig {
    /// Returns the precision amounts are settled at.
    #[must_use]
    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
            .unwrap_or_else(|| self.currency.minor_units())
    }
}

fn default_currency() -> Currency {
    Currency::Rub
}

fn default_max_participants() -> usize {
    1000
}

fn deserialize_currency<'de, D>(deserializer: D) -> Result<Currency, D::Error>
where
    D: Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    code.parse().map_err(serde::de::Error::custom)
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SPLITPOT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

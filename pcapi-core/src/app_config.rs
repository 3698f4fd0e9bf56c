use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub reimbursement: ReimbursementConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReimbursementConfig {
    /// Cumulative physical-offer revenue above which an offerer is no longer reimbursed
    #[serde(default = "default_offerer_cap")]
    pub offerer_cap: Decimal,
}

impl Default for ReimbursementConfig {
    fn default() -> Self {
        Self {
            offerer_cap: default_offerer_cap(),
        }
    }
}

pub fn default_offerer_cap() -> Decimal {
    Decimal::new(23_000, 0)
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `PCAPI__REIMBURSEMENT__OFFERER_CAP=23000`
            .add_source(config::Environment::with_prefix("PCAPI").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Build from an in-memory TOML document
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

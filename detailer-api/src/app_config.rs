use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub pricing: PricingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    /// Decimal places of the figures returned to clients
    #[serde(default = "default_rounding_scale")]
    pub rounding_scale: u32,
    /// Operational-cost entry whose presence switches product costing to the
    /// monthly average
    #[serde(default = "default_product_cost_entry")]
    pub product_cost_entry: String,
}

fn default_rounding_scale() -> u32 { 2 }

fn default_product_cost_entry() -> String { "Produtos".to_string() }

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            rounding_scale: default_rounding_scale(),
            product_cost_entry: default_product_cost_entry(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config", None)
    }

    /// Layered load from `dir`; `env` replaces the process environment when given
    pub fn load_from(
        dir: impl AsRef<Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let dir = dir.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let layer = |name: &str| dir.join(name).to_string_lossy().into_owned();

        let s = config::Config::builder()
            .add_source(config::File::with_name(&layer("default")))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&layer(&run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&layer("local")).required(false))
            // Eg. `DETAILER__PRICING__ROUNDING_SCALE=4`
            .add_source(
                config::Environment::with_prefix("DETAILER")
                    .separator("__")
                    .source(env),
            )
            .build()?;

        s.try_deserialize()
    }
}

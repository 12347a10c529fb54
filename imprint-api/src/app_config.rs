use std::env;

use serde::Deserialize;

use imprint_pricing::ShippingPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub feeds: FeedsConfig,
    pub shipping: ShippingPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Where the two price feeds live and how they are delimited. The sources
/// disagree on delimiters across suppliers, so each feed configures its own.
#[derive(Debug, Deserialize, Clone)]
pub struct FeedsConfig {
    pub product_path: String,
    pub decoration_path: String,
    #[serde(default = "default_delimiter")]
    pub product_delimiter: char,
    #[serde(default = "default_delimiter")]
    pub decoration_delimiter: char,
}

fn default_delimiter() -> char {
    ';'
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("IMPRINT").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

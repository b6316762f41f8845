use config::Config;
use error_stack::{Result, ResultExt};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "Config";
const ENV_PREFIX: &str = "STAKING_REPORT";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub sheets: super::sheets_config::SpreadsheetConfig,
    pub kiln: super::kiln_config::KilnConfig,
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("Error reading config file '{0}'")]
    Read(String),
    #[error("Failed to deserialize config file '{0}'")]
    Deserialize(String),
}

impl AppConfig {
    /// Loads the config file at `CONFIG_PATH`, or `Config.{toml,json,yaml,...}` in the working
    /// directory. `STAKING_REPORT__SECTION__KEY` variables override file values.
    pub fn load() -> Result<Self, AppConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> Result<Self, AppConfigError> {
        Config::builder()
            .add_source(config::File::with_name(config_path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .change_context_lazy(|| AppConfigError::Read(config_path.to_owned()))?
            .try_deserialize()
            .change_context_lazy(|| AppConfigError::Deserialize(config_path.to_owned()))
            .attach_printable("Make sure all required fields are present in the configuration file")
    }
}

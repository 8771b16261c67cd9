use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    case::defaults::builtin_case_defaults,
    error::{IntakeError, Result},
    merge::deep_merge,
};

pub const DEFAULT_CONFIG_PATH: &str = "config/default";
pub const DEFAULT_LOG_FILTER: &str = "victim_comp_intake=info,comp_intake=info,warn";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub intake: IntakeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IntakeConfig {
    /// JSON file merged over the built-in case defaults
    #[serde(default)]
    pub defaults_path: Option<String>,
    pub history_limit: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Config {
    /// Layered load: built-in defaults, then the optional config file, then
    /// `INTAKE_*` environment variables (e.g. `INTAKE_DATABASE__PATH`).
    pub fn load(path: &str) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let config = config::Config::builder()
            .set_default("database.path", "intake.db")?
            .set_default("intake.history_limit", 10)?
            .set_default("logging.filter", DEFAULT_LOG_FILTER)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("INTAKE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Built-in case defaults with the configured overrides merged on top
    pub fn case_defaults(&self) -> Result<Value> {
        let builtin = builtin_case_defaults();

        match &self.intake.defaults_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    IntakeError::Config(format!("failed to read case defaults {}: {}", path, e))
                })?;
                let overrides: Value = serde_json::from_str(&raw).map_err(|e| {
                    IntakeError::Config(format!("case defaults {} are not valid JSON: {}", path, e))
                })?;
                if !overrides.is_object() {
                    return Err(IntakeError::Config(format!(
                        "case defaults {} must be a JSON object",
                        path
                    )));
                }
                Ok(deep_merge(&builtin, &overrides))
            }
            None => Ok(builtin),
        }
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

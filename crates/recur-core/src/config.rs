use std::path::Path;

use config::Config;
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_LOG_LEVEL, DEFAULT_MAX_EMPTY_PERIODS, DEFAULT_MAX_OCCURRENCES,
    ENV_PREFIX,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
}

/// Bounds applied to every expansion request.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Consecutive empty periods tolerated before a request fails with an overflow.
    pub max_empty_periods: u32,
    /// Maximum number of occurrences returned per request; always applied.
    pub max_occurrences: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional TOML file and `RECUR_*`
    /// environment variables, in increasing order of precedence.
    ///
    /// When `path` is `None`, `recur.toml` in the working directory is used if present.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the configuration fails.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(CONFIG_FILE_NAME).required(false),
        };

        let settings = Config::builder()
            .set_default("limits.max_empty_periods", DEFAULT_MAX_EMPTY_PERIODS)?
            .set_default(
                "limits.max_occurrences",
                u64::try_from(DEFAULT_MAX_OCCURRENCES).unwrap_or(u64::MAX),
            )?
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?
            // TOML file
            .add_source(file)
            // Env, e.g. RECUR_LIMITS__MAX_OCCURRENCES=100
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks value ranges that the deserializer cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` when a limit is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.limits.max_empty_periods == 0 {
            return Err(CoreError::InvalidConfiguration(
                "limits.max_empty_periods must be at least 1".to_string(),
            ));
        }
        if self.limits.max_occurrences == 0 {
            return Err(CoreError::InvalidConfiguration(
                "limits.max_occurrences must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration after reading a `.env` file, if one exists.
///
/// ## Errors
/// Returns an error if loading or validating the configuration fails.
pub fn load_config(path: Option<&Path>) -> CoreResult<Settings> {
    if dotenvy::dotenv().is_ok() {
        tracing::debug!("Loaded .env file");
    }

    Settings::load(path)
}

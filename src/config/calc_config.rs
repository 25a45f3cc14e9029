// src/config/calc_config.rs

use serde::{Deserialize, Serialize};
use ::config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use std::path::Path;

/// Main calculator configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcConfig {
    /// Directory scanned for `*.txt` matrix files
    pub input_dir: String,

    /// Directory that large results are written to
    pub output_dir: String,

    /// Results with both dimensions at or below this are printed to the console
    pub console_limit: usize,

    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for CalcConfig {
    fn default() -> Self {
        CalcConfig {
            input_dir: "sample_inputs".to_string(),
            output_dir: "sample_outputs".to_string(),
            console_limit: 20,
            log_level: "info".to_string(),
        }
    }
}

impl CalcConfig {
    /// Load configuration with precedence: config file → env vars → defaults
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        // TOML preferred, YAML fallback
        if Path::new("sparse_calc.toml").exists() {
            builder = builder.add_source(File::with_name("sparse_calc.toml"));
        } else if Path::new("sparse_calc.yaml").exists() {
            builder = builder.add_source(File::with_name("sparse_calc.yaml"));
        }

        Self::finish(builder)
    }

    /// Load configuration with custom file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        Self::finish(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = CalcConfig::default();
        Config::builder()
            .set_default("input_dir", defaults.input_dir)?
            .set_default("output_dir", defaults.output_dir)?
            .set_default("console_limit", defaults.console_limit as u64)?
            .set_default("log_level", defaults.log_level)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        // Override with environment variables (prefix: SPARSE_CALC_)
        let builder = builder.add_source(
            Environment::with_prefix("SPARSE_CALC")
                .prefix_separator("_")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

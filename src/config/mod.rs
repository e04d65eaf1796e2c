//! Configuration parsing and types.

pub mod env;
pub mod parser;
pub mod types;
pub mod validate;

use std::path::Path;

use crate::common::error::ConfigError;

pub use parser::load_config;
pub use types::*;

/// Load a config file, apply environment overrides and validate the result.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let config = load_config(path)?;
    let config = env::apply_env_overrides(config);

    let empty = env::check_empty_env_vars();
    if !empty.is_empty() {
        tracing::warn!("Environment variables set but empty: {}", empty.join(", "));
    }

    validate::validate_config(&config)?;
    Ok(config)
}

//! Pricing configuration loading.

use std::path::Path;

use gostcalc_core::PricingConfig;
use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// Load pricing from `path`, or fall back to built-in prices.
///
/// `path` comes from `--pricing` or the `GOSTCALC_PRICING` environment
/// variable; the working directory is never searched.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed, or if the
/// resulting pricing is invalid.
pub fn load_pricing(path: Option<&Path>) -> Result<PricingConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let config = load_json_file::<PricingConfig>(path)?;
            tracing::info!(path = %path.display(), "Loaded pricing from file");
            config
        }
        None => {
            tracing::debug!("No pricing file given, using built-in prices");
            PricingConfig::default()
        }
    };

    config.validate()?;
    Ok(config)
}

/// Read and deserialize a JSON file.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = read_file(path)?;
    serde_json::from_slice(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a file as raw bytes.
///
/// # Errors
///
/// Returns [`ConfigError::Read`].
pub fn read_file(path: &Path) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

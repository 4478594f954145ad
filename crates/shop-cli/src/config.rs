//! Admin configuration loading.
//!
//! The admin file is TOML:
//!
//! ```toml
//! [headers]
//! disabled = ["Download limit", "Download expiry days"]
//!
//! [[pricing_rules]]
//! category = "Books"
//! margin_percent = 15
//! conversion_rates = { EUR = 0.92 }
//!
//! [export]
//! default_name = "catalog"
//! default_format = "json"
//! output_dir = "exports"
//! ```

use std::path::{Path, PathBuf};

use shop_model::{AdminConfig, ModelError};
use thiserror::Error;
use tracing::{debug, info};

/// Errors loading the admin configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config {path} disables unknown header '{header}'")]
    UnknownHeader { path: PathBuf, header: String },

    #[error("config {path} has more than one pricing rule for category '{category}'")]
    DuplicateCategory { path: PathBuf, category: String },
}

impl ConfigError {
    fn invalid(path: &Path, error: ModelError) -> Self {
        match error {
            ModelError::UnknownHeader(header) => Self::UnknownHeader {
                path: path.to_path_buf(),
                header,
            },
            ModelError::DuplicateCategory(category) => Self::DuplicateCategory {
                path: path.to_path_buf(),
                category,
            },
        }
    }
}

/// Loads the admin configuration, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AdminConfig, ConfigError> {
    let Some(path) = path else {
        debug!("no config file, using defaults");
        return Ok(AdminConfig::default());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&contents, path)?;
    info!(
        path = %path.display(),
        disabled_headers = config.headers.disabled.len(),
        pricing_rules = config.pricing_rules.len(),
        "loaded admin config"
    );
    Ok(config)
}

/// Parses and validates configuration text. `path` is used in errors only.
pub fn parse_config(contents: &str, path: &Path) -> Result<AdminConfig, ConfigError> {
    let config: AdminConfig = toml::from_str(contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    config
        .validate()
        .map_err(|error| ConfigError::invalid(path, error))?;
    Ok(config)
}

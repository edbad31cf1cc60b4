//! Batch configuration loaded from TOML.
//!
//! ```toml
//! address_column = "location"
//! delimiter = ";"
//! ```
//!
//! Missing keys fall back to [`BatchConfig::default`].

use std::path::Path;

use maptools_address::BatchConfig;
use thiserror::Error;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        /// Path of the config file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration TOML.
    #[error("Invalid config {path}: {source}")]
    Parse {
        /// Path of the config file.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Loads the batch configuration from `path`, or the defaults if `None`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<BatchConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(BatchConfig::default());
    };

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let config: BatchConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    log::debug!("Loaded config from {}: {config:?}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_path() {
        assert_eq!(load_config(None).unwrap(), BatchConfig::default());
    }

    #[test]
    fn loads_file() {
        let path = std::env::temp_dir().join("maptools_cli_config_test.toml");
        std::fs::write(&path, "address_column = \"location\"\ndelimiter = \"\\t\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.address_column, "location");
        assert_eq!(config.delimiter, '\t');

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_read_error() {
        let path = std::env::temp_dir().join("maptools_cli_config_missing.toml");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let path = std::env::temp_dir().join("maptools_cli_config_invalid.toml");
        std::fs::write(&path, "delimiter = \"too long\"\n").unwrap();

        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));

        let _ = std::fs::remove_file(&path);
    }
}

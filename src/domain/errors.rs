// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! Only the load, parse and decode paths return hard errors. Lookups are soft:
//! a missing key is `None` and a mistyped value degrades to its zero value.
//! All errors use `thiserror` for proper error handling and conversion.

use thiserror::Error;

/// The main error type for configuration operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use layercfg::domain::errors::ConfigError;
///
/// let error = ConfigError::UnsupportedConfigType {
///     config_type: "ini".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unsupported config type \"ini\"");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested configuration key was not found in any layer.
    #[error("Configuration key not found: {key}")]
    ConfigKeyNotFound {
        /// The key that was not found
        key: String,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The config file type is not handled by any registered parser.
    #[error("Unsupported config type {config_type:?}")]
    UnsupportedConfigType {
        /// The file extension or explicitly configured type
        config_type: String,
    },

    /// No config file with the configured name exists on any search path.
    #[error("Config file {name:?} not found in {locations:?}")]
    ConfigFileNotFound {
        /// The configured file name, without extension
        name: String,
        /// The search paths that were tried
        locations: Vec<String>,
    },

    /// A located configuration file could not be read.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a configuration file or value.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to decode resolved settings into a structured type.
    #[error("Failed to decode configuration: {message}")]
    DecodeError {
        /// The error message
        message: String,
        /// The underlying decoding error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a TypeConversionError for `key` from a failed cast.
    pub fn from_cast_error(key: impl Into<String>, err: CastError) -> Self {
        ConfigError::TypeConversionError {
            key: key.into(),
            target_type: err.target.to_string(),
            source: Box::new(err),
        }
    }
}

/// A failed best-effort conversion between a [`ConfigValue`](crate::domain::ConfigValue)
/// and a target type.
///
/// The lenient casts in [`cast`](crate::domain::cast) swallow this error and return the
/// target's zero value. The strict `try_to_*` functions surface it.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("cannot cast {from} {value:?} to {target}")]
pub struct CastError {
    /// The kind of the source value
    pub from: &'static str,
    /// The requested target type
    pub target: &'static str,
    /// A rendering of the offending value
    pub value: String,
}

impl CastError {
    pub(crate) fn new(from: &'static str, target: &'static str, value: impl Into<String>) -> Self {
        Self {
            from,
            target,
            value: value.into(),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_not_found_error() {
        let error = ConfigError::ConfigKeyNotFound {
            key: "test.key".to_string(),
        };
        assert_eq!(error.to_string(), "Configuration key not found: test.key");
    }

    #[test]
    fn test_type_conversion_error_from_cast() {
        let cast = CastError::new("string", "integer", "abc");
        let error = ConfigError::from_cast_error("test.key", cast);
        assert!(matches!(error, ConfigError::TypeConversionError { .. }));
        assert!(error.to_string().contains("test.key"));
        assert!(error.to_string().contains("integer"));
    }

    #[test]
    fn test_unsupported_config_type() {
        let error = ConfigError::UnsupportedConfigType {
            config_type: String::new(),
        };
        assert_eq!(error.to_string(), "Unsupported config type \"\"");
    }

    #[test]
    fn test_config_file_not_found() {
        let error = ConfigError::ConfigFileNotFound {
            name: "config".to_string(),
            locations: vec!["/etc/app".to_string(), "/home/me/.app".to_string()],
        };
        let message = error.to_string();
        assert!(message.contains("\"config\""));
        assert!(message.contains("/etc/app"));
        assert!(message.contains("/home/me/.app"));
    }

    #[test]
    fn test_source_error() {
        let error = ConfigError::SourceError {
            source_name: "config.yaml".to_string(),
            message: "Configuration file too large".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Configuration source 'config.yaml' error: Configuration file too large"
        );
    }

    #[test]
    fn test_parse_error() {
        let error = ConfigError::ParseError {
            message: "Invalid YAML".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration: Invalid YAML"
        );
    }

    #[test]
    fn test_decode_error() {
        let error = ConfigError::DecodeError {
            message: "missing field `port`".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Failed to decode configuration: missing field `port`"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ConfigError::from(io_error);
        assert!(matches!(error, ConfigError::IoError(_)));
    }

    #[test]
    fn test_cast_error_display() {
        let error = CastError::new("bool", "time", "true");
        assert_eq!(error.to_string(), "cannot cast bool \"true\" to time");
    }
}

//! Error types for settings loading and schema export.

use std::io;
use std::path::{Path, PathBuf};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error at {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Parse error in {}: {source}", .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation error at '{path}': {violation}")]
    ValidationError { path: String, violation: Violation },

    #[error("Field '{path}' is not updatable")]
    LockedField { path: String },

    #[error("Unknown key '{path}' in override document")]
    UnknownKey { path: String },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::IoError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::ParseError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn invalid(path: impl Into<String>, violation: Violation) -> Self {
        Self::ValidationError {
            path: path.into(),
            violation,
        }
    }

    /// Dotted field path this error refers to, if any.
    pub fn field_path(&self) -> Option<&str> {
        match self {
            Self::ValidationError { path, .. }
            | Self::LockedField { path }
            | Self::UnknownKey { path } => Some(path),
            _ => None,
        }
    }

    /// The violated constraint for validation failures.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::ValidationError { violation, .. } => Some(violation),
            _ => None,
        }
    }
}

/// The constraint a value failed to satisfy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{actual} is less than the minimum of {minimum}")]
    BelowMinimum { minimum: f64, actual: f64 },

    #[error("{actual} is greater than the maximum of {maximum}")]
    AboveMaximum { maximum: f64, actual: f64 },

    #[error("'{value}' is not one of {}", .allowed.join(", "))]
    UnknownVariant {
        value: String,
        allowed: Vec<&'static str>,
    },

    #[error("field is missing")]
    Missing,

    #[error("{0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_path_and_constraint() {
        let err = ConfigError::invalid(
            "tracker.count_min_seen",
            Violation::BelowMinimum {
                minimum: 0.0,
                actual: -1.0,
            },
        );
        let message = err.to_string();
        assert!(message.contains("tracker.count_min_seen"));
        assert!(message.contains("minimum of 0"));
        assert_eq!(err.field_path(), Some("tracker.count_min_seen"));
    }

    #[test]
    fn test_unknown_variant_lists_allowed_values() {
        let violation = Violation::UnknownVariant {
            value: "RESNET".to_string(),
            allowed: vec!["DAN", "YOLO"],
        };
        assert_eq!(violation.to_string(), "'RESNET' is not one of DAN, YOLO");
    }

    #[test]
    fn test_io_error_has_no_field_path() {
        let err = ConfigError::io(
            "/nowhere/AppSettings.schema.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.field_path().is_none());
        assert!(err.to_string().contains("AppSettings.schema.json"));
    }
}

//! Domain error types
//!
//! This module defines the error hierarchy for diagram-export.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main diagram-export error type
///
/// This is the primary error type used throughout the application.
/// User cancellation and per-document render failures are not errors;
/// they are reported through `ExportOutcome` and `ExportBatchResult`.
#[derive(Debug, Error)]
pub enum ExportToolError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Workspace query errors
    #[error("Workspace error: {0}")]
    Workspace(#[from] WorkspaceError),

    /// Export engine failures that abort the whole batch
    #[error("Export engine error: {0}")]
    Engine(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Workspace-specific errors
///
/// Raised by workspace queries (folder lookup, directory checks, file search).
/// The resolver never catches these; they propagate to the caller.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The location is not inside any workspace folder
    #[error("Not inside a workspace folder: {0}")]
    NotInWorkspace(String),

    /// The location does not exist
    #[error("Path does not exist: {0}")]
    NotFound(String),

    /// The search pattern could not be compiled
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for ExportToolError {
    fn from(err: std::io::Error) -> Self {
        ExportToolError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ExportToolError {
    fn from(err: serde_json::Error) -> Self {
        ExportToolError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ExportToolError {
    fn from(err: toml::de::Error) -> Self {
        ExportToolError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<glob::PatternError> for ExportToolError {
    fn from(err: glob::PatternError) -> Self {
        ExportToolError::Workspace(WorkspaceError::InvalidPattern(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_tool_error_display() {
        let err = ExportToolError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_workspace_error_conversion() {
        let ws_err = WorkspaceError::NotFound("/tmp/missing".to_string());
        let err: ExportToolError = ws_err.into();
        assert!(matches!(err, ExportToolError::Workspace(_)));
        assert_eq!(
            err.to_string(),
            "Workspace error: Path does not exist: /tmp/missing"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ExportToolError = io_err.into();
        assert!(matches!(err, ExportToolError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ExportToolError = json_err.into();
        assert!(matches!(err, ExportToolError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ExportToolError = toml_err.into();
        assert!(matches!(err, ExportToolError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_glob_pattern_error_conversion() {
        let pattern_err = glob::Pattern::new("a/***").unwrap_err();
        let err: ExportToolError = pattern_err.into();
        assert!(matches!(
            err,
            ExportToolError::Workspace(WorkspaceError::InvalidPattern(_))
        ));
    }
}

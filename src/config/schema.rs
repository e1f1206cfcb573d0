//! Configuration schema types
//!
//! This module defines the configuration structure for diagram-export.
//! Every section has defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Main diagram-export configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Workspace folders and their scoped overrides
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// External renderer settings
    #[serde(default)]
    pub renderer: RendererConfig,

    /// User interface settings
    #[serde(default)]
    pub ui: UiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.workspace.validate()?;
        self.export.validate()?;
        self.renderer.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Workspace configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkspaceConfig {
    /// Workspace root folders (empty = current directory)
    #[serde(default)]
    pub folders: Vec<FolderConfig>,
}

impl WorkspaceConfig {
    fn validate(&self) -> Result<(), String> {
        for (i, folder) in self.folders.iter().enumerate() {
            if folder.path.trim().is_empty() {
                return Err(format!("workspace.folders[{i}].path cannot be empty"));
            }
            if let Some(format) = &folder.export_format {
                validate_format(format, &format!("workspace.folders[{i}].export_format"))?;
            }
        }
        Ok(())
    }
}

/// One workspace folder and the settings scoped to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Root directory of the folder
    pub path: String,

    /// Display name (defaults to the directory name)
    #[serde(default)]
    pub name: Option<String>,

    /// Export format for files in this folder
    #[serde(default)]
    pub export_format: Option<String>,

    /// Source extensions for this folder
    #[serde(default)]
    pub file_extensions: Option<Vec<String>>,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Diagram source extensions searched in directories
    #[serde(default = "default_file_extensions")]
    pub file_extensions: Vec<String>,

    /// Default export format; empty or unset means "ask"
    #[serde(default)]
    pub export_format: Option<String>,

    /// Output directory relative to each workspace folder
    /// (unset = next to the source file)
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Per-path format rules, first match wins
    #[serde(default)]
    pub rules: Vec<FormatRule>,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.file_extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("export.file_extensions cannot be empty".to_string());
        }

        if let Some(format) = &self.export_format {
            if !format.trim().is_empty() {
                validate_format(format, "export.export_format")?;
            }
        }

        for (i, rule) in self.rules.iter().enumerate() {
            glob::Pattern::new(&rule.pattern).map_err(|e| {
                format!(
                    "Invalid export.rules[{i}].pattern '{}': {e}",
                    rule.pattern
                )
            })?;
            validate_format(&rule.export_format, &format!("export.rules[{i}].export_format"))?;
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_extensions: default_file_extensions(),
            export_format: None,
            output_dir: None,
            rules: Vec::new(),
        }
    }
}

/// Format assigned to files whose folder-relative path matches a glob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatRule {
    /// Glob matched against the path relative to the workspace folder
    pub pattern: String,

    /// Format for matching files
    pub export_format: String,
}

/// External renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Renderer executable
    #[serde(default = "default_renderer_command")]
    pub command: String,

    /// Arguments; `{format}`, `{output_dir}` and `{file}` are substituted
    #[serde(default = "default_renderer_args")]
    pub args: Vec<String>,

    /// Formats the renderer supports, offered when a format must be chosen
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,

    /// Maximum documents rendered at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-document timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RendererConfig {
    fn validate(&self) -> Result<(), String> {
        if self.command.trim().is_empty() {
            return Err("renderer.command cannot be empty".to_string());
        }

        if !self.args.iter().any(|a| a.contains("{file}")) {
            return Err("renderer.args must reference {file}".to_string());
        }

        if self.formats.is_empty() {
            return Err("renderer.formats cannot be empty".to_string());
        }
        for format in &self.formats {
            validate_format(format, "renderer.formats")?;
        }

        if self.concurrency == 0 || self.concurrency > 64 {
            return Err(format!(
                "renderer.concurrency must be between 1 and 64, got {}",
                self.concurrency
            ));
        }

        if self.timeout_secs == 0 {
            return Err("renderer.timeout_secs must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: default_renderer_command(),
            args: default_renderer_args(),
            formats: default_formats(),
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// User interface configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// JSON file overriding user-facing messages by numeric id
    #[serde(default)]
    pub messages_file: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_format(format: &str, field: &str) -> Result<(), String> {
    if format.trim().is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if format.trim().chars().any(char::is_whitespace) {
        return Err(format!("{field} '{format}' cannot contain whitespace"));
    }
    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_file_extensions() -> Vec<String> {
    [".wsd", ".pu", ".puml", ".plantuml", ".iuml"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_renderer_command() -> String {
    "plantuml".to_string()
}

fn default_renderer_args() -> Vec<String> {
    ["-t{format}", "-o", "{output_dir}", "{file}"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_formats() -> Vec<String> {
    [
        "png", "svg", "eps", "pdf", "vdx", "xmi", "scxml", "html", "txt", "utxt", "latex",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_concurrency() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_valid() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.renderer.command, "plantuml");
        assert!(config.export.export_format.is_none());
        assert!(config.workspace.folders.is_empty());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.application.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log_level"));
    }

    #[test]
    fn test_blank_export_format_means_ask() {
        let mut config = AppConfig::default();
        config.export.export_format = Some("   ".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_rule_pattern() {
        let mut config = AppConfig::default();
        config.export.rules.push(FormatRule {
            pattern: "docs/***".to_string(),
            export_format: "svg".to_string(),
        });
        let err = config.validate().unwrap_err();
        assert!(err.contains("export.rules[0].pattern"));
    }

    #[test]
    fn test_renderer_args_require_file_placeholder() {
        let mut config = AppConfig::default();
        config.renderer.args = vec!["-tpng".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_renderer_concurrency_bounds() {
        let mut config = AppConfig::default();
        config.renderer.concurrency = 0;
        assert!(config.validate().is_err());
        config.renderer.concurrency = 65;
        assert!(config.validate().is_err());
        config.renderer.concurrency = 8;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_folder_path_rejected() {
        let mut config = AppConfig::default();
        config.workspace.folders.push(FolderConfig {
            path: " ".to_string(),
            name: None,
            export_format: None,
            file_extensions: None,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_full_config_parses() {
        let toml_content = r#"
[application]
log_level = "debug"

[[workspace.folders]]
path = "/work/docs"
name = "docs"
export_format = "svg"

[[workspace.folders]]
path = "/work/specs"
file_extensions = [".puml"]

[export]
file_extensions = [".puml", ".wsd"]
export_format = "png"
output_dir = "out"

[[export.rules]]
pattern = "sequence/**"
export_format = "pdf"

[renderer]
command = "java"
args = ["-jar", "plantuml.jar", "-t{format}", "-o", "{output_dir}", "{file}"]
formats = ["png", "svg", "pdf"]
concurrency = 2
timeout_secs = 30

[ui]
messages_file = "messages.json"

[logging]
local_enabled = true
local_path = "/tmp/diagram-export"
local_rotation = "hourly"
"#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.workspace.folders.len(), 2);
        assert_eq!(config.workspace.folders[0].export_format.as_deref(), Some("svg"));
        assert_eq!(config.export.rules[0].export_format, "pdf");
        assert_eq!(config.renderer.concurrency, 2);
        assert_eq!(config.ui.messages_file.as_deref(), Some("messages.json"));
        assert_eq!(config.logging.local_rotation, "hourly");
    }
}

//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AppConfig;
use crate::domain::errors::ExportToolError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "diagram-export.toml";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "DIAGRAM_EXPORT_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AppConfig
/// 4. Applies environment variable overrides (DIAGRAM_EXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced environment
/// variable is missing, parsing fails or validation fails.
///
/// # Examples
///
/// ```no_run
/// use diagram_export::config::loader::load_config;
///
/// let config = load_config("diagram-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExportToolError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ExportToolError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: AppConfig = toml::from_str(&contents)
        .map_err(|e| ExportToolError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(config)
}

/// Loads the configuration named on the command line, or the default file
///
/// An explicitly named file must exist. When no file is named, the default
/// file is used if present, otherwise built-in defaults apply.
pub fn load_config_or_default(path: Option<&str>) -> Result<AppConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(DEFAULT_CONFIG_FILE),
        None => {
            tracing::debug!(
                file = DEFAULT_CONFIG_FILE,
                "No configuration file found, using defaults"
            );
            finish(AppConfig::default())
        }
    }
}

fn finish(mut config: AppConfig) -> Result<AppConfig> {
    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ExportToolError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExportToolError::Other(e.to_string()))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(ExportToolError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    let mut result = lines.join("\n");
    if input.ends_with('\n') {
        result.push('\n');
    }
    Ok(result)
}

fn env(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

/// Applies environment variable overrides using the DIAGRAM_EXPORT_* prefix
///
/// Environment variables follow the pattern: DIAGRAM_EXPORT_<SECTION>_<KEY>
/// For example: DIAGRAM_EXPORT_EXPORT_FORMAT, DIAGRAM_EXPORT_RENDERER_COMMAND
fn apply_env_overrides(config: &mut AppConfig) {
    if let Some(val) = env("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Some(val) = env("EXPORT_FORMAT") {
        config.export.export_format = Some(val);
    }
    if let Some(val) = env("EXPORT_OUTPUT_DIR") {
        config.export.output_dir = Some(val);
    }
    if let Some(val) = env("EXPORT_FILE_EXTENSIONS") {
        config.export.file_extensions = split_list(&val);
    }

    if let Some(val) = env("RENDERER_COMMAND") {
        config.renderer.command = val;
    }
    if let Some(val) = env("RENDERER_CONCURRENCY") {
        if let Ok(concurrency) = val.parse() {
            config.renderer.concurrency = concurrency;
        }
    }
    if let Some(val) = env("RENDERER_TIMEOUT_SECS") {
        if let Ok(timeout) = val.parse() {
            config.renderer.timeout_secs = timeout;
        }
    }

    if let Some(val) = env("UI_MESSAGES_FILE") {
        config.ui.messages_file = Some(val);
    }

    if let Some(val) = env("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

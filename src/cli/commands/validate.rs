//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the diagram-export configuration file.

use crate::config::{load_config_or_default, DEFAULT_CONFIG_FILE};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown_path = config_path.unwrap_or(DEFAULT_CONFIG_FILE);
        tracing::info!(config_path = %shown_path, "Validating configuration");

        println!("🔍 Validating configuration file: {shown_path}");
        println!();

        // Loading validates as well
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        if config.workspace.folders.is_empty() {
            println!("  Workspace Folders: (current directory)");
        } else {
            println!("  Workspace Folders:");
            for folder in &config.workspace.folders {
                println!(
                    "    - {}{}",
                    folder.path,
                    folder
                        .name
                        .as_ref()
                        .map(|n| format!(" ({n})"))
                        .unwrap_or_default()
                );
            }
        }
        println!("  File Extensions: {:?}", config.export.file_extensions);
        println!(
            "  Export Format: {}",
            config.export.export_format.as_deref().unwrap_or("(ask)")
        );
        println!(
            "  Output Directory: {}",
            config
                .export
                .output_dir
                .as_deref()
                .unwrap_or("(next to source)")
        );
        println!("  Format Rules: {}", config.export.rules.len());
        println!("  Renderer: {}", config.renderer.command);
        println!("  Concurrency: {}", config.renderer.concurrency);
        println!("  Timeout: {}s", config.renderer.timeout_secs);
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_validate_missing_file_is_config_error() {
        let code = ValidateArgs {}
            .execute(Some("/nonexistent/diagram-export.toml"))
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("diagram-export.toml");
        std::fs::write(&path, "[renderer]\nconcurrency = 2\n").unwrap();

        let code = ValidateArgs {}
            .execute(Some(path.to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("diagram-export.toml");
        std::fs::write(&path, "[renderer]\nconcurrency = 0\n").unwrap();

        let code = ValidateArgs {}
            .execute(Some(path.to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}

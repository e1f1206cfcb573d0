//! Formats command implementation
//!
//! Lists the export formats the configured renderer produces.

use crate::config::load_config_or_default;
use clap::Args;

/// Arguments for the formats command
#[derive(Args, Debug)]
pub struct FormatsArgs {}

impl FormatsArgs {
    /// Execute the formats command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        tracing::debug!(command = %config.renderer.command, "Listing renderer formats");
        for format in &config.renderer.formats {
            println!("{format}");
        }
        Ok(0)
    }
}

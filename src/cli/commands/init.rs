//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::config::DEFAULT_CONFIG_FILE;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing diagram-export configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Make sure the renderer command is on your PATH");
                println!("  3. Validate configuration: diagram-export validate-config");
                println!("  4. Run export: diagram-export export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# diagram-export Configuration File

[application]
log_level = "info"

[export]
file_extensions = [".wsd", ".pu", ".puml", ".plantuml", ".iuml"]
# export_format = "png"

[renderer]
command = "plantuml"
concurrency = 4
timeout_secs = 120

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# diagram-export Configuration File
# Exports diagram sources in a workspace through an external renderer.
#
# Values may reference environment variables as ${VAR}.
# Any value can be overridden with DIAGRAM_EXPORT_<SECTION>_<KEY>,
# e.g. DIAGRAM_EXPORT_EXPORT_FORMAT=svg.

# ============================================================================
# Application Configuration
# ============================================================================
[application]
# Log level: trace | debug | info | warn | error
log_level = "info"

# ============================================================================
# Workspace Configuration
# ============================================================================
# Without folders the current directory is the workspace.
# Each folder may override the format and the searched extensions.
#
# [[workspace.folders]]
# path = "docs"
# name = "documentation"
# export_format = "svg"
#
# [[workspace.folders]]
# path = "design"
# file_extensions = [".puml"]

# ============================================================================
# Export Configuration
# ============================================================================
[export]
# Extensions searched when exporting a directory
file_extensions = [".wsd", ".pu", ".puml", ".plantuml", ".iuml"]

# Default format; leave unset to be asked once per export
# export_format = "png"

# Output directory under each workspace folder, mirroring the source tree.
# Unset: artifacts are written next to their source.
# output_dir = "out"

# Per-file formats by glob, relative to the workspace folder.
# The first matching rule wins.
# [[export.rules]]
# pattern = "architecture/**/*.puml"
# export_format = "svg"

# ============================================================================
# Renderer Configuration
# ============================================================================
[renderer]
# Command and arguments; {format}, {output_dir} and {file} are substituted
command = "plantuml"
args = ["-t{format}", "-o", "{output_dir}", "{file}"]

# Formats offered when asking
formats = ["png", "svg", "eps", "pdf", "vdx", "xmi", "scxml", "html", "txt", "utxt", "latex"]

# Documents rendered at the same time (1-64)
concurrency = 4

# Per-document timeout in seconds
timeout_secs = 120

# ============================================================================
# User Interface Configuration
# ============================================================================
[ui]
# JSON file mapping message ids to translated templates
# messages_file = "messages.de.json"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "logs"

# Log rotation: daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: DEFAULT_CONFIG_FILE.to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "diagram-export.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generated_configs_parse_and_validate() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: AppConfig = toml::from_str(&content).unwrap();
            config.validate().unwrap();
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("diagram-export.toml");
        std::fs::write(&path, "# existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# existing");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().await.unwrap(), 0);
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("[renderer]"));
    }
}

//! Configuration management for diagram-export.
//!
//! # Overview
//!
//! diagram-export reads an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DIAGRAM_EXPORT_*` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use diagram_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("diagram-export.toml")?;
//! println!("Renderer: {}", config.renderer.command);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`WorkspaceConfig`] - Workspace folders and folder-scoped overrides
//! - [`ExportConfig`] - Extensions, default format, output directory, rules
//! - [`RendererConfig`] - External renderer command and supported formats
//! - [`UiConfig`] - Message catalog override
//! - [`LoggingConfig`] - File logging
//!
//! # Example Configuration
//!
//! ```toml
//! [[workspace.folders]]
//! path = "docs"
//! export_format = "svg"
//!
//! [export]
//! file_extensions = [".puml", ".wsd"]
//! output_dir = "out"
//!
//! [renderer]
//! command = "plantuml"
//! args = ["-t{format}", "-o", "{output_dir}", "{file}"]
//! ```

pub mod loader;
pub mod schema;
pub mod settings;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_FILE};
pub use schema::{
    AppConfig, ApplicationConfig, ExportConfig, FolderConfig, FormatRule, LoggingConfig,
    RendererConfig, UiConfig, WorkspaceConfig,
};
pub use settings::{ExportSettings, FolderScope, ScopedSettings};

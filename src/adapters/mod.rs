//! External system integrations for diagram-export.
//!
//! - [`workspace`] - Workspace folders and file search
//! - [`engine`] - Export engine (external renderer)
//! - [`ui`] - Prompts, messages, report panel and progress
//! - [`i18n`] - User-facing message catalog
//! - [`factory`] - Builds the concrete collaborators from configuration
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with fake implementations. The export workflow only sees the
//! traits ([`workspace::Workspace`], [`engine::ExportEngine`],
//! [`ui::Presenter`], [`ui::ProgressHandle`], [`i18n::Localizer`]).
//!
//! ```rust,no_run
//! use diagram_export::adapters::factory::{create_engine, create_workspace_and_settings};
//! use diagram_export::config::AppConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let (workspace, settings) = create_workspace_and_settings(&config, &std::env::current_dir()?)?;
//! let engine = create_engine(&config, workspace.clone());
//! println!("Formats: {:?}", engine.formats());
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod factory;
pub mod i18n;
pub mod ui;
pub mod workspace;

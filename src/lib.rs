// diagram-export - Workspace diagram export tool
// Copyright (c) 2025 diagram-export Contributors
// Licensed under the MIT License

//! # diagram-export - Workspace Diagram Export
//!
//! diagram-export finds diagram source files (PlantUML and friends) in a set of
//! workspace folders and renders them through an external renderer, in one
//! batch, with a single format prompt and a summary report.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Resolving** the export target (whole workspace, a file or directory,
//!   a list of paths) into source files with their configured formats
//! - **Disambiguating** formats: one prompt for every file without one
//! - **Exporting** the batch through the renderer with bounded concurrency
//! - **Reporting** documents, diagrams, files and errors
//!
//! ## Architecture
//!
//! diagram-export follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (resolve, disambiguate, export, report)
//! - [`adapters`] - External integrations (file system, renderer, terminal, messages)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use diagram_export::adapters::factory::{
//!     create_engine, create_localizer, create_workspace_and_settings,
//! };
//! use diagram_export::adapters::ui::{TerminalPresenter, TerminalProgress};
//! use diagram_export::config::load_config_or_default;
//! use diagram_export::core::export::{Collaborators, ExportWorkflow, ResolveTarget};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default(None)?;
//!     let (workspace, settings) =
//!         create_workspace_and_settings(&config, &std::env::current_dir()?)?;
//!
//!     let workflow = ExportWorkflow::new(Collaborators {
//!         engine: create_engine(&config, workspace.clone()),
//!         workspace,
//!         settings,
//!         presenter: Arc::new(TerminalPresenter::new()),
//!         progress: Arc::new(TerminalProgress::new()),
//!         localizer: create_localizer(&config)?,
//!     });
//!
//!     let outcome = workflow.run(ResolveTarget::Workspace).await?;
//!     if let Some(report) = outcome.report() {
//!         println!("Exported {} documents", report.documents);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! diagram-export uses the [`domain::ExportToolError`] type for all errors.
//! Cancelling the format prompt and per-document render failures are not
//! errors; they show up in [`core::export::ExportOutcome`].
//!
//! ```rust,no_run
//! use diagram_export::domain::ExportToolError;
//!
//! fn example() -> Result<(), ExportToolError> {
//!     let config = diagram_export::config::load_config("diagram-export.toml")?;
//!     println!("{}", config.renderer.command);
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! diagram-export uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(files = 3, "Starting export");
//! warn!(file = "/ws/a.puml", "Ignoring search result outside its workspace folder");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

//! Core business logic for diagram-export.
//!
//! # Modules
//!
//! - [`export`] - File resolution, format disambiguation and batch export
//!
//! # Export Workflow
//!
//! 1. **Resolve**: Expand the target into source files with their configured formats
//! 2. **Disambiguate**: Ask once for a format when some files have none
//! 3. **Export**: Run the engine over all files, timing it
//! 4. **Report**: Summarize, offer the detailed report
//!
//! # Example
//!
//! ```rust,no_run
//! use diagram_export::adapters::factory::{
//!     create_engine, create_localizer, create_workspace_and_settings,
//! };
//! use diagram_export::adapters::ui::{NoProgress, TerminalPresenter};
//! use diagram_export::config::AppConfig;
//! use diagram_export::core::export::{Collaborators, ExportWorkflow, ResolveTarget};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let (workspace, settings) = create_workspace_and_settings(&config, &std::env::current_dir()?)?;
//!
//! let workflow = ExportWorkflow::new(Collaborators {
//!     engine: create_engine(&config, workspace.clone()),
//!     workspace,
//!     settings,
//!     presenter: Arc::new(TerminalPresenter::new()),
//!     progress: Arc::new(NoProgress),
//!     localizer: create_localizer(&config)?,
//! });
//!
//! let outcome = workflow.run(ResolveTarget::Workspace).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

pub mod export;

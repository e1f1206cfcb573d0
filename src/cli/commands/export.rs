//! Export command implementation
//!
//! This module implements the `export` command for exporting diagram files
//! from the workspace through the configured renderer.

use crate::adapters::factory::{create_engine, create_localizer, create_workspace_and_settings};
use crate::adapters::ui::{NoProgress, ProgressHandle, TerminalPresenter, TerminalProgress};
use crate::config::load_config_or_default;
use crate::core::export::{Collaborators, ExportOutcome, ExportWorkflow, ResolveTarget};
use clap::Args;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Files or directories to export (default: every workspace folder)
    pub paths: Vec<String>,

    /// Format for files without a configured one (skips the prompt)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Show the detailed report without asking
    #[arg(long)]
    pub report: bool,

    /// Dry run mode - list the files that would be exported
    #[arg(long)]
    pub dry_run: bool,

    /// Do not draw the progress line
    #[arg(long)]
    pub no_progress: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let base_dir = std::env::current_dir()?;
        let (workspace, settings) = match create_workspace_and_settings(&config, &base_dir) {
            Ok(pair) => pair,
            Err(e) => {
                tracing::error!(error = %e, "Failed to open workspace");
                eprintln!("Failed to open workspace: {e}");
                return Ok(2);
            }
        };

        let localizer = match create_localizer(&config) {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load messages");
                eprintln!("Failed to load messages: {e}");
                return Ok(2);
            }
        };

        let engine = create_engine(&config, workspace.clone());

        if let Some(format) = &self.format {
            if !engine.formats().iter().any(|f| f.eq_ignore_ascii_case(format)) {
                eprintln!(
                    "Unknown format: {format}. Available: {}",
                    engine.formats().join(", ")
                );
                return Ok(2);
            }
        }

        let presenter = TerminalPresenter::new()
            .with_preset_choice(self.format.clone())
            .with_auto_action(self.report);
        let progress: Arc<dyn ProgressHandle> = if self.no_progress {
            Arc::new(NoProgress)
        } else {
            Arc::new(TerminalProgress::new())
        };

        let workflow = ExportWorkflow::new(Collaborators {
            workspace,
            settings,
            engine,
            presenter: Arc::new(presenter),
            progress,
            localizer,
        });

        let target = ResolveTarget::from_args(&self.paths);
        tracing::debug!(target = ?target, "Export target");

        if self.dry_run {
            tracing::info!("Dry run mode enabled - nothing will be rendered");
            let files = workflow.plan(target).await?;
            println!("DRY RUN - {} file(s) would be exported:", files.len());
            for file in &files {
                let format = file
                    .format
                    .as_ref()
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| "(ask)".to_string());
                println!("  {}  [{format}]", file.location);
            }
            return Ok(0);
        }

        let outcome = workflow.run(target).await?;
        Ok(exit_code(&outcome))
    }
}

/// Exit code for an export outcome
///
/// Only a completed export with engine errors is a failure; cancelling or
/// finding nothing to export is not.
pub fn exit_code(outcome: &ExportOutcome) -> i32 {
    match outcome {
        ExportOutcome::Completed(report) if report.has_errors() => 1, // Partial success
        _ => 0,
    }
}

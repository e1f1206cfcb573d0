//! Export workflow
//!
//! Wires the resolver, the disambiguator and the coordinator together:
//! resolve the target, fill in missing formats, export and report.

use crate::adapters::engine::ExportEngine;
use crate::adapters::i18n::Localizer;
use crate::adapters::ui::{Presenter, ProgressHandle};
use crate::adapters::workspace::Workspace;
use crate::config::ExportSettings;
use crate::core::export::coordinator::BatchExportCoordinator;
use crate::core::export::disambiguate::FormatDisambiguator;
use crate::core::export::resolver::{FileResolver, ResolveTarget};
use crate::core::export::summary::{ExportOutcome, ExportPhase};
use crate::domain::{FileAndFormat, Result};
use std::sync::Arc;

/// Everything the workflow talks to
#[derive(Clone)]
pub struct Collaborators {
    pub workspace: Arc<dyn Workspace>,
    pub settings: Arc<dyn ExportSettings>,
    pub engine: Arc<dyn ExportEngine>,
    pub presenter: Arc<dyn Presenter>,
    pub progress: Arc<dyn ProgressHandle>,
    pub localizer: Arc<dyn Localizer>,
}

/// One export command, from target to report
pub struct ExportWorkflow {
    workspace: Arc<dyn Workspace>,
    resolver: FileResolver,
    disambiguator: FormatDisambiguator,
    coordinator: BatchExportCoordinator,
}

impl ExportWorkflow {
    /// Create a new workflow
    pub fn new(collaborators: Collaborators) -> Self {
        let Collaborators {
            workspace,
            settings,
            engine,
            presenter,
            progress,
            localizer,
        } = collaborators;

        Self {
            resolver: FileResolver::new(workspace.clone(), settings),
            disambiguator: FormatDisambiguator::new(
                engine.clone(),
                presenter.clone(),
                localizer.clone(),
            ),
            coordinator: BatchExportCoordinator::new(engine, presenter, progress, localizer),
            workspace,
        }
    }

    /// Run the export
    ///
    /// # Errors
    ///
    /// Resolution failures and engine failures that abort the batch.
    pub async fn run(&self, target: ResolveTarget) -> Result<ExportOutcome> {
        ExportPhase::Idle.enter();

        if self.workspace.folders().is_empty() {
            tracing::warn!("No workspace folder open, nothing to export");
            return Ok(ExportOutcome::NoWorkspace);
        }

        ExportPhase::Resolving.enter();
        let files = self.resolver.resolve(target).await?;

        ExportPhase::Disambiguating.enter();
        let files = match self.disambiguator.disambiguate(files).await {
            Some(files) => files,
            None => return Ok(ExportOutcome::Cancelled),
        };

        self.coordinator.export(files).await
    }

    /// Resolve the target without exporting
    pub async fn plan(&self, target: ResolveTarget) -> Result<Vec<FileAndFormat>> {
        if self.workspace.folders().is_empty() {
            return Ok(Vec::new());
        }

        ExportPhase::Resolving.enter();
        self.resolver.resolve(target).await
    }
}

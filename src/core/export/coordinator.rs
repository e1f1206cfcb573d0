//! Batch export coordinator
//!
//! Runs the engine over the resolved files, times it, hides the progress
//! indicator and tells the user how it went, offering the detailed report.

use crate::adapters::engine::ExportEngine;
use crate::adapters::i18n::{Localizer, MessageId};
use crate::adapters::ui::{Presenter, ProgressHandle};
use crate::core::export::summary::{ExportOutcome, ExportPhase, ExportReport};
use crate::domain::{ResolvedFile, Result};
use std::sync::Arc;
use std::time::Instant;

/// Batch export coordinator
pub struct BatchExportCoordinator {
    engine: Arc<dyn ExportEngine>,
    presenter: Arc<dyn Presenter>,
    progress: Arc<dyn ProgressHandle>,
    localizer: Arc<dyn Localizer>,
}

impl BatchExportCoordinator {
    /// Create a new coordinator
    pub fn new(
        engine: Arc<dyn ExportEngine>,
        presenter: Arc<dyn Presenter>,
        progress: Arc<dyn ProgressHandle>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            engine,
            presenter,
            progress,
            localizer,
        }
    }

    /// Export `files` and notify the user
    ///
    /// Per-document failures end up in the report; an `Err` means the engine
    /// could not run the batch at all.
    pub async fn export(&self, files: Vec<ResolvedFile>) -> Result<ExportOutcome> {
        if files.is_empty() {
            let message = self.localizer.localize(MessageId::NothingToExport, &[]);
            self.presenter.show_info(&message, &[]).await;
            tracing::info!("No files to export");
            return Ok(ExportOutcome::NothingToExport);
        }

        ExportPhase::Exporting.enter();
        tracing::info!(files = files.len(), "Starting export");

        let start_time = Instant::now();
        let result = self
            .engine
            .export_files(&files, self.progress.clone())
            .await;
        let duration = start_time.elapsed();
        self.progress.hide();

        let batch = result?;

        ExportPhase::Reporting.enter();
        let report = ExportReport::from_batch(&batch, duration);
        report.log_summary();
        self.notify(&report).await;

        Ok(ExportOutcome::Completed(report))
    }

    async fn notify(&self, report: &ExportReport) {
        let view_report = self.localizer.localize(MessageId::ViewReport, &[]);

        if report.documents == 0 {
            let message = self.localizer.localize(MessageId::NothingExported, &[]);
            if report.has_errors() {
                self.offer_report(&message, &view_report, report).await;
            } else {
                self.presenter.show_info(&message, &[]).await;
            }
            return;
        }

        let id = if report.has_errors() {
            MessageId::ExportedWithErrors
        } else {
            MessageId::Exported
        };
        let message = self
            .localizer
            .localize(id, &[report.documents.to_string()]);
        self.offer_report(&message, &view_report, report).await;
    }

    async fn offer_report(&self, message: &str, view_report: &str, report: &ExportReport) {
        let actions = [view_report.to_string()];
        let choice = self.presenter.show_info(message, &actions).await;
        if choice.as_deref() == Some(view_report) {
            self.presenter.show_report(&report.render(self.localizer.as_ref()));
        }
    }
}

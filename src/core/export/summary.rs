//! Export summary and reporting
//!
//! This module defines the report computed from a batch result and the
//! outcome of one export run.

use crate::adapters::engine::ExportBatchResult;
use crate::adapters::i18n::{Localizer, MessageId};
use std::fmt;
use std::time::Duration;

/// Summary of one batch export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// Number of exported documents
    pub documents: usize,

    /// Number of diagrams, including diagrams that produced no artifact
    pub diagrams: usize,

    /// Number of non-empty artifact paths
    pub files: usize,

    /// Artifact paths in document, diagram, artifact order
    pub artifacts: Vec<String>,

    /// Engine error messages in engine order
    pub errors: Vec<String>,

    /// Time spent in the engine
    pub duration: Duration,
}

impl ExportReport {
    /// Compute the report for `batch`
    pub fn from_batch(batch: &ExportBatchResult, duration: Duration) -> Self {
        let diagrams = batch.results.iter().map(Vec::len).sum();
        let artifacts: Vec<String> = batch
            .results
            .iter()
            .flatten()
            .flatten()
            .filter(|path| !path.is_empty())
            .cloned()
            .collect();

        Self {
            documents: batch.results.len(),
            diagrams,
            files: artifacts.len(),
            artifacts,
            errors: batch.errors.iter().map(|e| e.error.clone()).collect(),
            duration,
        }
    }

    /// Check if the engine reported any error
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the export was successful (no engine errors)
    pub fn is_successful(&self) -> bool {
        !self.has_errors()
    }

    /// Elapsed seconds as shown in the report header
    pub fn seconds(&self) -> String {
        format!("{:.2}", self.duration.as_secs_f64())
    }

    /// Render the detailed report text
    pub fn render(&self, localizer: &dyn Localizer) -> String {
        let mut text = localizer.localize(
            MessageId::ReportHeader,
            &[
                self.documents.to_string(),
                self.diagrams.to_string(),
                self.files.to_string(),
                self.seconds(),
            ],
        );

        for path in &self.artifacts {
            text.push('\n');
            text.push_str(path);
        }

        if self.has_errors() {
            text.push('\n');
            text.push_str(&self.errors.join("\n"));
        }

        text
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            documents = self.documents,
            diagrams = self.diagrams,
            files = self.files,
            errors = self.errors.len(),
            duration_secs = %self.seconds(),
            "Export completed"
        );

        if self.has_errors() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(message = %error, "Export error");
            }
        }
    }
}

/// Result of one export run
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// No workspace folder is open
    NoWorkspace,
    /// The format prompt was dismissed
    Cancelled,
    /// Resolution found no files
    NothingToExport,
    /// The engine ran
    Completed(ExportReport),
}

impl ExportOutcome {
    /// Report of a completed run
    pub fn report(&self) -> Option<&ExportReport> {
        match self {
            ExportOutcome::Completed(report) => Some(report),
            _ => None,
        }
    }
}

/// Workflow phase, logged on each transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    Resolving,
    Disambiguating,
    Exporting,
    Reporting,
}

impl ExportPhase {
    /// Log entering this phase
    pub fn enter(self) -> Self {
        tracing::debug!(phase = %self, "Export phase");
        self
    }
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportPhase::Idle => "idle",
            ExportPhase::Resolving => "resolving",
            ExportPhase::Disambiguating => "disambiguating",
            ExportPhase::Exporting => "exporting",
            ExportPhase::Reporting => "reporting",
        };
        f.write_str(name)
    }
}

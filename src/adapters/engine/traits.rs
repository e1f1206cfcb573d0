//! Export engine abstraction traits

use crate::adapters::ui::ProgressHandle;
use crate::domain::{Location, ResolvedFile, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// A per-document failure reported by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    /// Human-readable message
    pub error: String,

    /// Source document the error belongs to
    pub location: Option<Location>,
}

impl EngineError {
    /// Create an error not tied to a document
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            location: None,
        }
    }

    /// Attach the source document
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// Result of one batch export
///
/// `results` holds one entry per exported document, each holding one entry
/// per diagram, each holding the artifact paths written for that diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportBatchResult {
    /// Artifact paths by document and diagram
    pub results: Vec<Vec<Vec<String>>>,

    /// Per-document failures
    pub errors: Vec<EngineError>,
}

impl ExportBatchResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an exported document
    pub fn add_document(&mut self, diagrams: Vec<Vec<String>>) {
        self.results.push(diagrams);
    }

    /// Record a failure
    pub fn add_error(&mut self, error: EngineError) {
        self.errors.push(error);
    }
}

/// The rendering pipeline
#[async_trait]
pub trait ExportEngine: Send + Sync {
    /// Every format the renderer can produce
    fn formats(&self) -> Vec<String>;

    /// Export `files`, reporting progress through `progress`
    ///
    /// Per-document failures are returned inside [`ExportBatchResult`];
    /// an `Err` means the batch as a whole could not run.
    async fn export_files(
        &self,
        files: &[ResolvedFile],
        progress: Arc<dyn ProgressHandle>,
    ) -> Result<ExportBatchResult>;
}

//! Export orchestration
//!
//! This module provides the export logic for diagram-export:
//! - File resolution (workspace, one location, a list of references)
//! - Format disambiguation with a single prompt
//! - Batch export coordination, summary and reporting

pub mod coordinator;
pub mod disambiguate;
pub mod resolver;
pub mod summary;
pub mod workflow;

pub use coordinator::BatchExportCoordinator;
pub use disambiguate::FormatDisambiguator;
pub use resolver::{FileResolver, ResolveTarget};
pub use summary::{ExportOutcome, ExportPhase, ExportReport};
pub use workflow::{Collaborators, ExportWorkflow};

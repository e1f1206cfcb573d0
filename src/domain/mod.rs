//! Domain models and types for diagram-export.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Location handles** ([`Location`], [`WorkspaceFolder`]) and pure path helpers
//! - **Export entries** ([`FileAndFormat`], [`ResolvedFile`]) and their formats
//! - **Error types** ([`ExportToolError`], [`WorkspaceError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! The resolver produces [`FileAndFormat`] entries whose format may be missing.
//! Only [`ResolvedFile`] values reach the export engine, so a file without a
//! format cannot be exported by construction:
//!
//! ```rust
//! use diagram_export::domain::{ExportFormat, FileAndFormat, Location, ResolvedFile};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let entry = FileAndFormat::new(Location::new("docs/flow.puml"), None);
//! let fallback = ExportFormat::new("svg")?;
//! let resolved: ResolvedFile = entry.resolve_with(&fallback);
//! assert_eq!(resolved.format.as_str(), "svg");
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod errors;
pub mod file;
pub mod location;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ExportToolError, WorkspaceError};
pub use file::{ExportFormat, ExtensionPattern, FileAndFormat, ResolvedFile};
pub use location::{is_sub_path, normalize, relative_path, Location, WorkspaceFolder};
pub use result::Result;

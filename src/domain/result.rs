//! Result type alias for diagram-export

use super::errors::ExportToolError;

/// Result type alias for diagram-export operations
///
/// # Examples
///
/// ```
/// use diagram_export::domain::result::Result;
/// use diagram_export::domain::errors::ExportToolError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ExportToolError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ExportToolError>;

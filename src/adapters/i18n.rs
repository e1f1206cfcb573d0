//! User-facing message catalog
//!
//! Messages are addressed by numeric id and take positional arguments
//! written as `{0}`, `{1}`, ... in the template. The built-in catalog is
//! English; a JSON object mapping ids to templates can replace any entry.
//!
//! ```json
//! { "13": "{0} Dokument(e) exportiert." }
//! ```

use crate::domain::{ExportToolError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Messages the export workflow shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    /// Nothing was found to export
    NothingToExport,
    /// `{0}` documents exported, some with errors
    ExportedWithErrors,
    /// `{0}` documents exported
    Exported,
    /// Label of the report action
    ViewReport,
    /// Report header: documents, diagrams, files, seconds
    ReportHeader,
    /// No document was exported
    NothingExported,
    /// Placeholder of the format prompt
    SelectFormat,
}

impl MessageId {
    /// Numeric id used in override files
    pub fn id(self) -> u32 {
        match self {
            MessageId::NothingToExport => 8,
            MessageId::ExportedWithErrors => 12,
            MessageId::Exported => 13,
            MessageId::ViewReport => 26,
            MessageId::ReportHeader => 28,
            MessageId::NothingExported => 29,
            MessageId::SelectFormat => 34,
        }
    }

    fn default_template(self) -> &'static str {
        match self {
            MessageId::NothingToExport => "No diagram files found to export.",
            MessageId::ExportedWithErrors => "{0} document(s) exported, with errors.",
            MessageId::Exported => "{0} document(s) exported.",
            MessageId::ViewReport => "View Report",
            MessageId::ReportHeader => {
                "Exported {0} document(s), {1} diagram(s), {2} file(s) in {3} seconds:"
            }
            MessageId::NothingExported => "Nothing exported.",
            MessageId::SelectFormat => "Select the format to export",
        }
    }
}

/// Maps a message id and positional arguments to display text
pub trait Localizer: Send + Sync {
    /// Format message `id` with `args`
    fn localize(&self, id: MessageId, args: &[String]) -> String;
}

/// Built-in catalog with optional overrides
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    overrides: HashMap<u32, String>,
}

impl MessageCatalog {
    /// English catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with overrides parsed from a JSON object of id → template
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a key is not a number.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        let mut overrides = HashMap::with_capacity(raw.len());
        for (key, template) in raw {
            let id: u32 = key.trim().parse().map_err(|_| {
                ExportToolError::Configuration(format!("Message id '{key}' is not a number"))
            })?;
            overrides.insert(id, template);
        }
        Ok(Self { overrides })
    }

    /// Catalog with overrides read from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ExportToolError::Configuration(format!(
                "Failed to read messages file {}: {e}",
                path.display()
            ))
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(
            file = %path.display(),
            overrides = catalog.overrides.len(),
            "Loaded message overrides"
        );
        Ok(catalog)
    }
}

impl Localizer for MessageCatalog {
    fn localize(&self, id: MessageId, args: &[String]) -> String {
        let template = self
            .overrides
            .get(&id.id())
            .map(String::as_str)
            .unwrap_or_else(|| id.default_template());
        fill(template, args)
    }
}

/// Substitute `{n}` placeholders; unknown indexes are left as written
fn fill(template: &str, args: &[String]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg);
    }
    out
}

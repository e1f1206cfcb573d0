//! Per-location export settings
//!
//! The resolver asks two questions about every location: which source
//! extensions a directory search should match, and which export format a
//! file defaults to. [`ExportSettings`] is that lookup; [`ScopedSettings`]
//! answers it from the TOML configuration.
//!
//! Lookup order for a file's format:
//! 1. the first `[[export.rules]]` glob matching the path relative to its
//!    enclosing workspace folder,
//! 2. the `export_format` of the most specific enclosing folder scope,
//! 3. the global `[export] export_format`.
//!
//! Extensions come from the most specific enclosing folder scope that sets
//! them, then from `[export] file_extensions`.

use super::schema::ExportConfig;
use crate::domain::{
    is_sub_path, normalize, relative_path, ExportFormat, ExportToolError, ExtensionPattern,
    Location, Result,
};
use glob::{MatchOptions, Pattern};
use std::path::PathBuf;

/// Configuration lookups keyed by location
pub trait ExportSettings: Send + Sync {
    /// Extensions a directory search under `location` should match
    fn file_extensions(&self, location: &Location) -> ExtensionPattern;

    /// Default export format for `location`, if one is configured
    fn export_format(&self, location: &Location) -> Option<ExportFormat>;
}

/// Settings scoped to one workspace folder
#[derive(Debug, Clone)]
pub struct FolderScope {
    /// Folder root
    pub root: Location,

    /// Format for files below the root
    pub export_format: Option<ExportFormat>,

    /// Extensions searched below the root
    pub file_extensions: Option<ExtensionPattern>,
}

impl FolderScope {
    /// Scope without overrides
    pub fn new(root: Location) -> Self {
        Self {
            root,
            export_format: None,
            file_extensions: None,
        }
    }

    fn encloses(&self, location: &Location) -> bool {
        normalize(location.path()) == normalize(self.root.path())
            || is_sub_path(location.path(), self.root.path())
    }
}

/// [`ExportSettings`] backed by the `[export]` and `[workspace]` sections
#[derive(Debug, Clone)]
pub struct ScopedSettings {
    scopes: Vec<FolderScope>,
    rules: Vec<(Pattern, ExportFormat)>,
    default_format: Option<ExportFormat>,
    default_extensions: ExtensionPattern,
}

impl ScopedSettings {
    /// Build settings from the export section and the folder scopes
    ///
    /// # Errors
    ///
    /// Returns an error if a rule pattern or a format is invalid.
    pub fn from_config(export: &ExportConfig, scopes: Vec<FolderScope>) -> Result<Self> {
        let rules = export
            .rules
            .iter()
            .map(|rule| {
                let pattern = Pattern::new(&rule.pattern).map_err(|e| {
                    ExportToolError::Configuration(format!(
                        "Invalid rule pattern '{}': {e}",
                        rule.pattern
                    ))
                })?;
                Ok((pattern, ExportFormat::new(&rule.export_format)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let default_format = optional_format(export.export_format.as_deref())?;

        Ok(Self {
            scopes,
            rules,
            default_format,
            default_extensions: ExtensionPattern::new(&export.file_extensions),
        })
    }

    /// Enclosing scopes, most specific first
    fn enclosing(&self, location: &Location) -> Vec<&FolderScope> {
        let mut scopes: Vec<&FolderScope> =
            self.scopes.iter().filter(|s| s.encloses(location)).collect();
        scopes.sort_by_key(|s| std::cmp::Reverse(normalize(s.root.path()).components().count()));
        scopes
    }

    fn rule_format(&self, location: &Location, scope: Option<&FolderScope>) -> Option<ExportFormat> {
        let candidate: PathBuf = match scope {
            Some(scope) => relative_path(scope.root.path(), location.path()),
            None => location.path().to_path_buf(),
        };
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        self.rules
            .iter()
            .find(|(pattern, _)| pattern.matches_path_with(&candidate, options))
            .map(|(_, format)| format.clone())
    }
}

impl ExportSettings for ScopedSettings {
    fn file_extensions(&self, location: &Location) -> ExtensionPattern {
        self.enclosing(location)
            .into_iter()
            .find_map(|s| s.file_extensions.clone())
            .unwrap_or_else(|| self.default_extensions.clone())
    }

    fn export_format(&self, location: &Location) -> Option<ExportFormat> {
        let scopes = self.enclosing(location);

        if let Some(format) = self.rule_format(location, scopes.first().copied()) {
            return Some(format);
        }

        scopes
            .into_iter()
            .find_map(|s| s.export_format.clone())
            .or_else(|| self.default_format.clone())
    }
}

/// Parse an optional format where blank means "not configured"
pub fn optional_format(value: Option<&str>) -> Result<Option<ExportFormat>> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(Some(ExportFormat::new(v)?)),
        _ => Ok(None),
    }
}

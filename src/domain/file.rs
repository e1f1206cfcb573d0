//! Export formats, extension patterns and per-file export entries

use super::errors::ExportToolError;
use super::location::Location;
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format identifier such as `png` or `svg`
///
/// Always non-empty, trimmed and lower-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExportFormat(String);

impl ExportFormat {
    /// Create a format, rejecting blank identifiers
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(ExportToolError::Validation(
                "Export format cannot be empty".to_string(),
            ));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ExportToolError::Validation(format!(
                "Export format '{value}' cannot contain whitespace"
            )));
        }
        Ok(Self(value.to_lowercase()))
    }

    /// Format identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ExportFormat {
    type Err = ExportToolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ExportFormat {
    type Error = ExportToolError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ExportFormat> for String {
    fn from(format: ExportFormat) -> Self {
        format.0
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Set of source file extensions a directory search matches
///
/// Extensions are stored with their leading dot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionPattern(Vec<String>);

impl ExtensionPattern {
    /// Build from extensions, with or without a leading dot
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim();
            if ext.is_empty() {
                continue;
            }
            let ext = if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{ext}")
            };
            if !out.contains(&ext) {
                out.push(ext);
            }
        }
        Self(out)
    }

    /// Extensions with their leading dot
    pub fn extensions(&self) -> &[String] {
        &self.0
    }

    /// Whether no extension is configured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One single-extension glob suffix per extension, e.g. `*.puml`
    pub fn glob_suffixes(&self) -> impl Iterator<Item = String> + '_ {
        self.0.iter().map(|ext| format!("*{ext}"))
    }
}

impl fmt::Display for ExtensionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("*"),
            [single] => write!(f, "*{single}"),
            many => write!(f, "*{{{}}}", many.join(",")),
        }
    }
}

/// A discovered source file and its configured format, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAndFormat {
    /// Source file
    pub location: Location,

    /// Format from configuration; `None` until disambiguated
    pub format: Option<ExportFormat>,
}

impl FileAndFormat {
    /// Create a new entry
    pub fn new(location: Location, format: Option<ExportFormat>) -> Self {
        Self { location, format }
    }

    /// Turn into a [`ResolvedFile`], using `fallback` when no format is set
    pub fn resolve_with(self, fallback: &ExportFormat) -> ResolvedFile {
        ResolvedFile {
            location: self.location,
            format: self.format.unwrap_or_else(|| fallback.clone()),
        }
    }
}

/// A source file with a definite export format, ready for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Source file
    pub location: Location,

    /// Format to export to
    pub format: ExportFormat,
}

impl ResolvedFile {
    /// Create a new resolved file
    pub fn new(location: Location, format: ExportFormat) -> Self {
        Self { location, format }
    }
}

impl TryFrom<FileAndFormat> for ResolvedFile {
    type Error = FileAndFormat;

    /// Succeeds only when the entry already carries a format
    fn try_from(file: FileAndFormat) -> std::result::Result<Self, Self::Error> {
        match file.format {
            Some(format) => Ok(ResolvedFile {
                location: file.location,
                format,
            }),
            None => Err(file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("png", "png" ; "plain")]
    #[test_case(" SVG ", "svg" ; "trimmed and lowercased")]
    fn test_export_format_valid(input: &str, expected: &str) {
        assert_eq!(ExportFormat::new(input).unwrap().as_str(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "blank")]
    #[test_case("p ng" ; "inner whitespace")]
    fn test_export_format_invalid(input: &str) {
        assert!(ExportFormat::new(input).is_err());
    }

    #[test]
    fn test_export_format_deserialize_rejects_empty() {
        #[derive(Deserialize)]
        struct Holder {
            #[allow(dead_code)]
            format: ExportFormat,
        }
        assert!(toml::from_str::<Holder>("format = \"\"").is_err());
        assert!(toml::from_str::<Holder>("format = \"svg\"").is_ok());
    }

    #[test]
    fn test_extension_pattern_normalizes() {
        let pattern = ExtensionPattern::new(["puml", ".wsd", "", "puml"]);
        assert_eq!(pattern.extensions(), &[".puml".to_string(), ".wsd".to_string()]);
        assert_eq!(
            pattern.glob_suffixes().collect::<Vec<_>>(),
            vec!["*.puml".to_string(), "*.wsd".to_string()]
        );
    }

    #[test]
    fn test_extension_pattern_display() {
        assert_eq!(ExtensionPattern::new(["puml"]).to_string(), "*.puml");
        assert_eq!(
            ExtensionPattern::new(["puml", "wsd"]).to_string(),
            "*{.puml,.wsd}"
        );
        assert_eq!(ExtensionPattern::default().to_string(), "*");
    }

    #[test]
    fn test_resolve_with_keeps_existing_format() {
        let png = ExportFormat::new("png").unwrap();
        let svg = ExportFormat::new("svg").unwrap();

        let with = FileAndFormat::new(Location::new("a.puml"), Some(svg.clone()));
        let without = FileAndFormat::new(Location::new("b.puml"), None);

        assert_eq!(with.resolve_with(&png).format, svg);
        assert_eq!(without.resolve_with(&png).format, png);
    }

    #[test]
    fn test_resolved_file_try_from() {
        let svg = ExportFormat::new("svg").unwrap();
        let ok = FileAndFormat::new(Location::new("a.puml"), Some(svg));
        let missing = FileAndFormat::new(Location::new("b.puml"), None);

        assert!(ResolvedFile::try_from(ok).is_ok());
        assert!(ResolvedFile::try_from(missing).is_err());
    }
}

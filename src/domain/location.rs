//! Location references and workspace folders
//!
//! A [`Location`] is an owned handle to a path inside (or outside) the
//! workspace. Raw references coming from the command line or a host are
//! parsed with [`Location::parse`], which accepts plain paths and `file://`
//! URIs and rejects everything else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Whether a reference that parsed as a URL names a URI rather than a path
///
/// One-letter schemes are Windows drive letters. An opaque reference such
/// as `v2:docs/a.puml` whose body is a relative path is a path too.
fn is_uri(url: &Url) -> bool {
    if url.scheme().len() == 1 {
        return false;
    }
    !(url.cannot_be_a_base() && url.path().contains(['/', '\\']))
}

/// Handle to a file or directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location(PathBuf);

impl Location {
    /// Create a location from a path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Parse a raw reference
    ///
    /// Returns `None` for empty input, for URIs with a scheme other than
    /// `file`, and for `file` URIs that do not map to a local path (a remote
    /// host, for example). Percent-escapes in `file` URIs are decoded.
    ///
    /// ```
    /// use diagram_export::domain::Location;
    ///
    /// assert!(Location::parse("docs/flow.puml").is_some());
    /// assert!(Location::parse("file:///work/docs").is_some());
    /// assert!(Location::parse("untitled:Untitled-1").is_none());
    /// assert!(Location::parse("").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        match Url::parse(raw) {
            Ok(url) if url.scheme() == "file" => url.to_file_path().ok().map(Self::new),
            Ok(url) if is_uri(&url) => None,
            _ => Some(Self::new(raw)),
        }
    }

    /// Underlying path
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Consume into the underlying path
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

impl AsRef<Path> for Location {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// A root directory registered with the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFolder {
    /// Display name
    pub name: String,

    /// Root directory
    pub root: Location,
}

impl WorkspaceFolder {
    /// Create a workspace folder, naming it after the root's last component
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = Location::new(root);
        let name = root
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.to_string());
        Self { name, root }
    }

    /// Override the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether `location` lies strictly below this folder's root
    pub fn contains(&self, location: &Location) -> bool {
        is_sub_path(location.path(), self.root.path())
    }
}

/// Lexically normalize a path, folding `.` and `..` components
///
/// No file-system access; symlinks are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Whether `path` is a true descendant of `root`
///
/// Both paths are normalized first. The root itself is not its own
/// descendant.
pub fn is_sub_path(path: &Path, root: &Path) -> bool {
    let path = normalize(path);
    let root = normalize(root);
    path != root && path.starts_with(&root)
}

/// Path of `target` relative to `base`
///
/// Walks up with `..` when `target` is not below `base`. Both paths must be
/// of the same kind (both absolute or both relative) for the result to be
/// meaningful.
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base = normalize(base);
    let target = normalize(target);

    let base_parts: Vec<_> = base.components().collect();
    let target_parts: Vec<_> = target.components().collect();

    let common = base_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base_parts.len() {
        rel.push("..");
    }
    for part in &target_parts[common..] {
        rel.push(part.as_os_str());
    }
    rel
}

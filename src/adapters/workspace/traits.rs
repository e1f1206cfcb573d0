//! Workspace abstraction traits

use crate::domain::{ExtensionPattern, Location, Result, WorkspaceFolder};
use async_trait::async_trait;
use std::path::Path;

/// Read-only view of the workspace and its file system
///
/// The resolver only talks to the workspace through this trait.
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Workspace root folders, in registration order
    fn folders(&self) -> Vec<WorkspaceFolder>;

    /// Absolute form of `location`, comparable with folder roots
    fn canonicalize(&self, location: &Location) -> Location;

    /// The workspace folder owning `location`
    ///
    /// # Errors
    ///
    /// Returns an error if `location` is not inside any workspace folder.
    fn folder_of(&self, location: &Location) -> Result<WorkspaceFolder>;

    /// Whether `location` is a directory
    ///
    /// # Errors
    ///
    /// Returns an error if `location` does not exist.
    fn is_dir(&self, location: &Location) -> Result<bool>;

    /// All files below `relative` (relative to `folder`'s root) whose names
    /// end with one of `extensions`, searched recursively
    ///
    /// Implementations are not required to confine results to the folder;
    /// callers filter escapes themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if the search cannot be performed.
    async fn find_files(
        &self,
        folder: &WorkspaceFolder,
        relative: &Path,
        extensions: &ExtensionPattern,
    ) -> Result<Vec<Location>>;
}

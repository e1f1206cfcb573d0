//! File-system backed workspace
//!
//! Folder roots are canonicalized when the workspace is opened and search
//! results are canonicalized too, so a symlink pointing out of a folder
//! shows up as a path outside that folder.

use super::traits::Workspace;
use crate::domain::{
    is_sub_path, normalize, ExportToolError, ExtensionPattern, Location, Result, WorkspaceError,
    WorkspaceFolder,
};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// [`Workspace`] over local directories
#[derive(Debug, Clone)]
pub struct FsWorkspace {
    folders: Vec<WorkspaceFolder>,
    base_dir: PathBuf,
}

impl FsWorkspace {
    /// Open a workspace over `folders`
    ///
    /// Relative roots are taken relative to `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a root does not exist or is not a directory.
    pub fn open(folders: Vec<WorkspaceFolder>, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let mut opened = Vec::with_capacity(folders.len());

        for folder in folders {
            let root = absolutize(&base_dir, folder.root.path());
            let root = fs::canonicalize(&root)
                .map_err(|_| WorkspaceError::NotFound(root.display().to_string()))?;
            if !root.is_dir() {
                return Err(ExportToolError::Configuration(format!(
                    "Workspace folder is not a directory: {}",
                    root.display()
                )));
            }

            tracing::debug!(name = %folder.name, root = %root.display(), "Opened workspace folder");
            opened.push(WorkspaceFolder {
                name: folder.name,
                root: Location::new(root),
            });
        }

        Ok(Self {
            folders: opened,
            base_dir,
        })
    }

    fn search(pattern: &str) -> Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        for entry in glob::glob(pattern)? {
            match entry {
                Ok(path) => out.push(path),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable path during search");
                }
            }
        }
        Ok(out)
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[async_trait]
impl Workspace for FsWorkspace {
    fn folders(&self) -> Vec<WorkspaceFolder> {
        self.folders.clone()
    }

    fn canonicalize(&self, location: &Location) -> Location {
        let path = absolutize(&self.base_dir, location.path());
        match fs::canonicalize(&path) {
            Ok(canonical) => Location::new(canonical),
            Err(_) => Location::new(normalize(&path)),
        }
    }

    fn folder_of(&self, location: &Location) -> Result<WorkspaceFolder> {
        let location = self.canonicalize(location);

        self.folders
            .iter()
            .filter(|f| f.root == location || is_sub_path(location.path(), f.root.path()))
            .max_by_key(|f| f.root.path().components().count())
            .cloned()
            .ok_or_else(|| WorkspaceError::NotInWorkspace(location.to_string()).into())
    }

    fn is_dir(&self, location: &Location) -> Result<bool> {
        let path = absolutize(&self.base_dir, location.path());
        let metadata = fs::metadata(&path)
            .map_err(|_| WorkspaceError::NotFound(path.display().to_string()))?;
        Ok(metadata.is_dir())
    }

    async fn find_files(
        &self,
        folder: &WorkspaceFolder,
        relative: &Path,
        extensions: &ExtensionPattern,
    ) -> Result<Vec<Location>> {
        let base = folder.root.path().join(relative);
        let escaped = glob::Pattern::escape(&base.to_string_lossy());
        let escaped = escaped.trim_end_matches('/').to_string();
        let patterns: Vec<String> = extensions
            .glob_suffixes()
            .map(|suffix| format!("{escaped}/**/{suffix}"))
            .collect();

        tracing::debug!(
            folder = %folder.name,
            relative = %relative.display(),
            extensions = %extensions,
            "Searching for diagram files"
        );

        let found = tokio::task::spawn_blocking(move || -> Result<Vec<PathBuf>> {
            let mut paths = Vec::new();
            for pattern in &patterns {
                paths.extend(Self::search(pattern)?);
            }
            Ok(paths)
        })
        .await
        .map_err(|e| ExportToolError::Other(format!("File search task failed: {e}")))??;

        let mut files: Vec<Location> = found
            .into_iter()
            .filter(|p| p.is_file())
            .map(|p| Location::new(fs::canonicalize(&p).unwrap_or(p)))
            .collect();
        files.sort();
        files.dedup();

        tracing::debug!(count = files.len(), "Search completed");
        Ok(files)
    }
}

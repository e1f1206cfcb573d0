//! File resolver
//!
//! Expands the export target (whole workspace, one location, or a list of
//! raw references) into a flat list of source files with their configured
//! formats.

use crate::adapters::workspace::Workspace;
use crate::config::ExportSettings;
use crate::domain::{relative_path, FileAndFormat, Location, Result};
use std::sync::Arc;

/// What to export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveTarget {
    /// Every workspace folder
    Workspace,
    /// A single file or directory
    One(Location),
    /// Raw references; entries that are not valid locations are skipped
    Many(Vec<String>),
}

impl ResolveTarget {
    /// Target for a list of command-line paths
    ///
    /// No paths means the whole workspace; a single valid path is `One`.
    pub fn from_args(paths: &[String]) -> Self {
        match paths {
            [] => ResolveTarget::Workspace,
            [single] => match Location::parse(single) {
                Some(location) => ResolveTarget::One(location),
                None => ResolveTarget::Many(vec![single.clone()]),
            },
            many => ResolveTarget::Many(many.to_vec()),
        }
    }
}

/// Resolves export targets to [`FileAndFormat`] lists
pub struct FileResolver {
    workspace: Arc<dyn Workspace>,
    settings: Arc<dyn ExportSettings>,
}

impl FileResolver {
    /// Create a new resolver
    pub fn new(workspace: Arc<dyn Workspace>, settings: Arc<dyn ExportSettings>) -> Self {
        Self {
            workspace,
            settings,
        }
    }

    /// Resolve `target` into source files, in input order
    ///
    /// # Errors
    ///
    /// Workspace failures (location outside every folder, missing path,
    /// failed search) are returned unchanged.
    pub async fn resolve(&self, target: ResolveTarget) -> Result<Vec<FileAndFormat>> {
        let mut files = Vec::new();

        match target {
            ResolveTarget::Workspace => {
                for folder in self.workspace.folders() {
                    files.extend(self.resolve_location(&folder.root).await?);
                }
            }
            ResolveTarget::One(location) => {
                files.extend(self.resolve_location(&location).await?);
            }
            ResolveTarget::Many(raw) => {
                for reference in raw {
                    match Location::parse(&reference) {
                        Some(location) => files.extend(self.resolve_location(&location).await?),
                        None => {
                            tracing::trace!(reference = %reference, "Skipping invalid location");
                        }
                    }
                }
            }
        }

        tracing::debug!(count = files.len(), "Resolved source files");
        Ok(files)
    }

    async fn resolve_location(&self, location: &Location) -> Result<Vec<FileAndFormat>> {
        let location = self.workspace.canonicalize(location);

        if !self.workspace.is_dir(&location)? {
            let format = self.settings.export_format(&location);
            return Ok(vec![FileAndFormat::new(location, format)]);
        }

        let extensions = self.settings.file_extensions(&location);
        let folder = self.workspace.folder_of(&location)?;
        let relative = relative_path(folder.root.path(), location.path());

        let found = self
            .workspace
            .find_files(&folder, &relative, &extensions)
            .await?;

        let files = found
            .into_iter()
            .filter(|file| {
                let inside = folder.contains(file);
                if !inside {
                    tracing::warn!(
                        file = %file,
                        folder = %folder.root,
                        "Ignoring search result outside its workspace folder"
                    );
                }
                inside
            })
            .map(|file| {
                let format = self.settings.export_format(&file);
                FileAndFormat::new(file, format)
            })
            .collect();

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ExportFormat, ExportToolError, ExtensionPattern, WorkspaceError, WorkspaceFolder,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// In-memory workspace: directories map to the files a search returns
    struct FakeWorkspace {
        folders: Vec<WorkspaceFolder>,
        dirs: HashMap<PathBuf, Vec<Location>>,
        files: Vec<PathBuf>,
        searches: Mutex<Vec<(String, PathBuf, String)>>,
    }

    impl FakeWorkspace {
        fn new(roots: &[&str]) -> Self {
            let folders = roots.iter().map(|r| WorkspaceFolder::new(*r)).collect();
            Self {
                folders,
                dirs: HashMap::new(),
                files: Vec::new(),
                searches: Mutex::new(Vec::new()),
            }
        }

        fn dir(mut self, dir: &str, found: &[&str]) -> Self {
            self.dirs.insert(
                PathBuf::from(dir),
                found.iter().map(|f| Location::new(*f)).collect(),
            );
            self
        }

        fn file(mut self, file: &str) -> Self {
            self.files.push(PathBuf::from(file));
            self
        }
    }

    #[async_trait]
    impl Workspace for FakeWorkspace {
        fn folders(&self) -> Vec<WorkspaceFolder> {
            self.folders.clone()
        }

        fn canonicalize(&self, location: &Location) -> Location {
            location.clone()
        }

        fn folder_of(&self, location: &Location) -> Result<WorkspaceFolder> {
            self.folders
                .iter()
                .find(|f| f.root == *location || f.contains(location))
                .cloned()
                .ok_or_else(|| WorkspaceError::NotInWorkspace(location.to_string()).into())
        }

        fn is_dir(&self, location: &Location) -> Result<bool> {
            if self.dirs.contains_key(location.path()) {
                Ok(true)
            } else if self.files.iter().any(|f| f == location.path()) {
                Ok(false)
            } else {
                Err(WorkspaceError::NotFound(location.to_string()).into())
            }
        }

        async fn find_files(
            &self,
            folder: &WorkspaceFolder,
            relative: &Path,
            extensions: &ExtensionPattern,
        ) -> Result<Vec<Location>> {
            self.searches.lock().unwrap().push((
                folder.name.clone(),
                relative.to_path_buf(),
                extensions.to_string(),
            ));
            let dir = folder.root.path().join(relative);
            Ok(self.dirs.get(&dir).cloned().unwrap_or_default())
        }
    }

    /// Settings: `.puml` everywhere, svg for anything under `/ws/svg`
    struct FakeSettings;

    impl ExportSettings for FakeSettings {
        fn file_extensions(&self, _location: &Location) -> ExtensionPattern {
            ExtensionPattern::new([".puml"])
        }

        fn export_format(&self, location: &Location) -> Option<ExportFormat> {
            if location.path().starts_with("/ws/svg") {
                Some(ExportFormat::new("svg").unwrap())
            } else {
                None
            }
        }
    }

    fn resolver(ws: FakeWorkspace) -> (FileResolver, Arc<FakeWorkspace>) {
        let ws = Arc::new(ws);
        (FileResolver::new(ws.clone(), Arc::new(FakeSettings)), ws)
    }

    fn paths(files: &[FileAndFormat]) -> Vec<String> {
        files.iter().map(|f| f.location.to_string()).collect()
    }

    #[tokio::test]
    async fn test_single_file() {
        let (resolver, _) = resolver(FakeWorkspace::new(&["/ws"]).file("/ws/svg/a.puml"));

        let files = resolver
            .resolve(ResolveTarget::One(Location::new("/ws/svg/a.puml")))
            .await
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].format, Some(ExportFormat::new("svg").unwrap()));
    }

    #[tokio::test]
    async fn test_directory_uses_relative_search() {
        let (resolver, ws) = resolver(
            FakeWorkspace::new(&["/ws"]).dir("/ws/docs", &["/ws/docs/a.puml", "/ws/docs/b.puml"]),
        );

        let files = resolver
            .resolve(ResolveTarget::One(Location::new("/ws/docs")))
            .await
            .unwrap();

        assert_eq!(paths(&files), vec!["/ws/docs/a.puml", "/ws/docs/b.puml"]);
        assert!(files.iter().all(|f| f.format.is_none()));

        let searches = ws.searches.lock().unwrap();
        assert_eq!(
            searches[0],
            ("ws".to_string(), PathBuf::from("docs"), "*.puml".to_string())
        );
    }

    #[tokio::test]
    async fn test_directory_drops_results_outside_folder() {
        let (resolver, _) = resolver(FakeWorkspace::new(&["/ws"]).dir(
            "/ws/docs",
            &[
                "/ws/docs/a.puml",
                "/elsewhere/escape.puml",
                "/ws/docs/../../etc/x.puml",
                "/ws",
            ],
        ));

        let files = resolver
            .resolve(ResolveTarget::One(Location::new("/ws/docs")))
            .await
            .unwrap();

        assert_eq!(paths(&files), vec!["/ws/docs/a.puml"]);
    }

    #[tokio::test]
    async fn test_workspace_concatenates_folders_in_order() {
        let (resolver, _) = resolver(
            FakeWorkspace::new(&["/ws", "/other"])
                .dir("/ws", &["/ws/svg/a.puml"])
                .dir("/other", &["/other/b.puml"]),
        );

        let files = resolver.resolve(ResolveTarget::Workspace).await.unwrap();

        assert_eq!(paths(&files), vec!["/ws/svg/a.puml", "/other/b.puml"]);
        assert_eq!(files[0].format, Some(ExportFormat::new("svg").unwrap()));
        assert_eq!(files[1].format, None);
    }

    #[tokio::test]
    async fn test_many_skips_invalid_references() {
        let (resolver, _) = resolver(
            FakeWorkspace::new(&["/ws"])
                .file("/ws/b.puml")
                .file("/ws/a.puml"),
        );

        let files = resolver
            .resolve(ResolveTarget::Many(vec![
                "/ws/b.puml".to_string(),
                "untitled:Untitled-1".to_string(),
                String::new(),
                "file:///ws/a.puml".to_string(),
            ]))
            .await
            .unwrap();

        assert_eq!(paths(&files), vec!["/ws/b.puml", "/ws/a.puml"]);
    }

    #[tokio::test]
    async fn test_missing_path_propagates() {
        let (resolver, _) = resolver(FakeWorkspace::new(&["/ws"]));

        let result = resolver
            .resolve(ResolveTarget::One(Location::new("/ws/missing")))
            .await;

        assert!(matches!(
            result,
            Err(ExportToolError::Workspace(WorkspaceError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_directory_outside_workspace_propagates() {
        let (resolver, _) = resolver(FakeWorkspace::new(&["/ws"]).dir("/elsewhere", &[]));

        let result = resolver
            .resolve(ResolveTarget::One(Location::new("/elsewhere")))
            .await;

        assert!(matches!(
            result,
            Err(ExportToolError::Workspace(WorkspaceError::NotInWorkspace(_)))
        ));
    }

    #[test]
    fn test_target_from_args() {
        assert_eq!(ResolveTarget::from_args(&[]), ResolveTarget::Workspace);
        assert_eq!(
            ResolveTarget::from_args(&["docs".to_string()]),
            ResolveTarget::One(Location::new("docs"))
        );
        assert_eq!(
            ResolveTarget::from_args(&["a".to_string(), "b".to_string()]),
            ResolveTarget::Many(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            ResolveTarget::from_args(&["untitled:x".to_string()]),
            ResolveTarget::Many(vec!["untitled:x".to_string()])
        );
    }
}

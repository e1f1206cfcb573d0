//! Collaborator factory
//!
//! Builds the concrete workspace, settings, engine and message catalog from
//! configuration, returned as trait objects for the export workflow.

use crate::adapters::engine::{CommandEngine, ExportEngine};
use crate::adapters::i18n::{Localizer, MessageCatalog};
use crate::adapters::workspace::{FsWorkspace, Workspace};
use crate::config::settings::optional_format;
use crate::config::{AppConfig, ExportSettings, FolderScope, ScopedSettings};
use crate::domain::{ExtensionPattern, Result, WorkspaceFolder};
use std::path::Path;
use std::sync::Arc;

/// Create the workspace and the settings scoped to its folders
///
/// Folder paths are taken relative to `base_dir`. With no configured
/// folders, `base_dir` itself is the only workspace folder.
///
/// # Errors
///
/// Returns an error if a folder does not exist or a scoped setting is invalid.
pub fn create_workspace_and_settings(
    config: &AppConfig,
    base_dir: &Path,
) -> Result<(Arc<dyn Workspace>, Arc<dyn ExportSettings>)> {
    let folders: Vec<WorkspaceFolder> = if config.workspace.folders.is_empty() {
        vec![WorkspaceFolder::new(base_dir)]
    } else {
        config
            .workspace
            .folders
            .iter()
            .map(|f| {
                let folder = WorkspaceFolder::new(&f.path);
                match &f.name {
                    Some(name) => folder.with_name(name),
                    None => folder,
                }
            })
            .collect()
    };

    let workspace = FsWorkspace::open(folders, base_dir)?;

    // FsWorkspace keeps folder order, so opened roots line up with the config
    let mut scopes = Vec::new();
    for (i, folder) in workspace.folders().into_iter().enumerate() {
        let mut scope = FolderScope::new(folder.root);
        if let Some(folder_config) = config.workspace.folders.get(i) {
            scope.export_format = optional_format(folder_config.export_format.as_deref())?;
            scope.file_extensions = folder_config
                .file_extensions
                .as_ref()
                .map(ExtensionPattern::new);
        }
        scopes.push(scope);
    }

    tracing::info!(
        folders = scopes.len(),
        rules = config.export.rules.len(),
        "Workspace opened"
    );

    let settings = ScopedSettings::from_config(&config.export, scopes)?;
    Ok((Arc::new(workspace), Arc::new(settings)))
}

/// Create the export engine
pub fn create_engine(config: &AppConfig, workspace: Arc<dyn Workspace>) -> Arc<dyn ExportEngine> {
    tracing::debug!(command = %config.renderer.command, "Creating command engine");
    Arc::new(CommandEngine::new(
        config.renderer.clone(),
        config.export.output_dir.clone(),
        workspace,
    ))
}

/// Create the message catalog, applying the configured overrides
///
/// # Errors
///
/// Returns an error if the overrides file cannot be read or parsed.
pub fn create_localizer(config: &AppConfig) -> Result<Arc<dyn Localizer>> {
    let catalog = match &config.ui.messages_file {
        Some(path) => MessageCatalog::from_file(path)?,
        None => MessageCatalog::new(),
    };
    Ok(Arc::new(catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FolderConfig;
    use crate::domain::{ExportFormat, Location};
    use tempfile::TempDir;

    #[test]
    fn test_default_workspace_is_base_dir() {
        let dir = TempDir::new().unwrap();
        let (workspace, settings) =
            create_workspace_and_settings(&AppConfig::default(), dir.path()).unwrap();

        let folders = workspace.folders();
        assert_eq!(folders.len(), 1);
        assert_eq!(
            settings.export_format(&Location::new(folders[0].root.path().join("a.puml"))),
            None
        );
    }

    #[test]
    fn test_folder_scopes_follow_config() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();
        std::fs::create_dir_all(dir.path().join("specs")).unwrap();

        let mut config = AppConfig::default();
        config.workspace.folders = vec![
            FolderConfig {
                path: "docs".to_string(),
                name: Some("documentation".to_string()),
                export_format: Some("svg".to_string()),
                file_extensions: None,
            },
            FolderConfig {
                path: "specs".to_string(),
                name: None,
                export_format: None,
                file_extensions: Some(vec!["wsd".to_string()]),
            },
        ];

        let (workspace, settings) = create_workspace_and_settings(&config, dir.path()).unwrap();
        let folders = workspace.folders();
        assert_eq!(folders[0].name, "documentation");
        assert_eq!(folders[1].name, "specs");

        let doc = Location::new(folders[0].root.path().join("a.puml"));
        assert_eq!(settings.export_format(&doc), Some(ExportFormat::new("svg").unwrap()));

        let wsd_file = Location::new(folders[1].root.path().join("b.wsd"));
        assert_eq!(settings.export_format(&wsd_file), None);
        assert_eq!(settings.file_extensions(&wsd_file), ExtensionPattern::new([".wsd"]));
    }

    #[test]
    fn test_missing_folder_fails() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.workspace.folders = vec![FolderConfig {
            path: "missing".to_string(),
            name: None,
            export_format: None,
            file_extensions: None,
        }];

        assert!(create_workspace_and_settings(&config, dir.path()).is_err());
    }

    #[test]
    fn test_localizer_with_missing_file_fails() {
        let mut config = AppConfig::default();
        config.ui.messages_file = Some("/nonexistent/messages.json".to_string());
        assert!(create_localizer(&config).is_err());
    }
}

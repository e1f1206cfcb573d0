//! Export engine that runs an external renderer process per document
//!
//! The renderer (PlantUML by default) is invoked once per source file with
//! `renderer.args`, after substituting `{format}`, `{output_dir}` and
//! `{file}`. Each run gets its own staging directory as `{output_dir}`;
//! whatever the renderer wrote there is moved into the real output
//! directory and reported as the document's artifacts, one diagram per
//! artifact file.

use super::traits::{EngineError, ExportBatchResult, ExportEngine};
use crate::adapters::ui::ProgressHandle;
use crate::adapters::workspace::Workspace;
use crate::config::RendererConfig;
use crate::domain::context::ResultExt;
use crate::domain::{relative_path, Location, ResolvedFile, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

/// [`ExportEngine`] spawning the configured renderer command
pub struct CommandEngine {
    config: RendererConfig,
    output_dir: Option<String>,
    workspace: Arc<dyn Workspace>,
    staging_seq: AtomicUsize,
}

impl CommandEngine {
    /// Create a new command engine
    ///
    /// `output_dir` is relative to each document's workspace folder; when
    /// unset, artifacts are written next to the source.
    pub fn new(
        config: RendererConfig,
        output_dir: Option<String>,
        workspace: Arc<dyn Workspace>,
    ) -> Self {
        Self {
            config,
            output_dir: output_dir.filter(|d| !d.trim().is_empty()),
            workspace,
            staging_seq: AtomicUsize::new(0),
        }
    }

    /// Directory the renderer should write `location`'s artifacts to
    fn output_dir_for(&self, location: &Location) -> Result<PathBuf> {
        let parent = location
            .path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        match &self.output_dir {
            None => Ok(parent),
            Some(dir) => {
                let folder = self.workspace.folder_of(location)?;
                let sub = relative_path(folder.root.path(), &parent);
                Ok(folder.root.path().join(dir).join(sub))
            }
        }
    }

    /// Fresh staging directory name below `output_dir`, unique per run
    fn staging_dir_in(&self, output_dir: &Path) -> PathBuf {
        let seq = self.staging_seq.fetch_add(1, Ordering::SeqCst);
        output_dir.join(format!(".diagram-export-{}-{seq}", std::process::id()))
    }

    fn command_args(&self, file: &ResolvedFile, output_dir: &Path) -> Vec<String> {
        let file_path = file.location.to_string();
        let output_dir = output_dir.display().to_string();
        self.config
            .args
            .iter()
            .map(|arg| {
                arg.replace("{format}", file.format.as_str())
                    .replace("{output_dir}", &output_dir)
                    .replace("{file}", &file_path)
            })
            .collect()
    }

    async fn render(&self, file: &ResolvedFile) -> std::result::Result<Vec<Vec<String>>, EngineError> {
        let fail = |message: String| {
            EngineError::new(format!("{}: {message}", file.location))
                .with_location(file.location.clone())
        };

        let output_dir = self
            .output_dir_for(&file.location)
            .map_err(|e| fail(e.to_string()))?;
        let staging = self.staging_dir_in(&output_dir);
        tokio::fs::create_dir_all(&staging)
            .await
            .map_err(|e| fail(format!("cannot create {}: {e}", staging.display())))?;

        let outcome = match self.run_renderer(file, &staging).await {
            Ok(()) => move_artifacts(&staging, &output_dir)
                .await
                .map_err(|e| fail(e.to_string())),
            Err(message) => Err(fail(message)),
        };

        if let Err(e) = tokio::fs::remove_dir_all(&staging).await {
            tracing::warn!(
                staging = %staging.display(),
                error = %e,
                "Failed to remove staging directory"
            );
        }

        let artifacts = outcome?;
        Ok(artifacts.into_iter().map(|a| vec![a]).collect())
    }

    /// Run the renderer for `file` with `{output_dir}` set to `staging`
    async fn run_renderer(&self, file: &ResolvedFile, staging: &Path) -> std::result::Result<(), String> {
        let args = self.command_args(file, staging);
        tracing::debug!(
            command = %self.config.command,
            args = ?args,
            "Running renderer"
        );

        let child = Command::new(&self.config.command)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), child)
            .await
            .map_err(|_| format!("timed out after {}s", self.config.timeout_secs))?
            .map_err(|e| format!("failed to run {}: {e}", self.config.command))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(stderr
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("renderer exited with {}", output.status)))
    }
}

/// Move the files a renderer wrote into `staging` over to `output_dir`
///
/// Returns the new paths, sorted. Existing files of the same name are
/// replaced.
async fn move_artifacts(staging: &Path, output_dir: &Path) -> Result<Vec<String>> {
    let mut artifacts = Vec::new();
    let mut entries = tokio::fs::read_dir(staging)
        .await
        .with_context(|| format!("Reading {}", staging.display()))?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let target = output_dir.join(entry.file_name());
        tokio::fs::rename(entry.path(), &target)
            .await
            .with_context(|| format!("Moving artifact to {}", target.display()))?;
        artifacts.push(target.display().to_string());
    }
    artifacts.sort();
    Ok(artifacts)
}

#[async_trait]
impl ExportEngine for CommandEngine {
    fn formats(&self) -> Vec<String> {
        self.config.formats.clone()
    }

    async fn export_files(
        &self,
        files: &[ResolvedFile],
        progress: Arc<dyn ProgressHandle>,
    ) -> Result<ExportBatchResult> {
        let total = files.len();
        let done = AtomicUsize::new(0);
        let done = &done;

        tracing::info!(
            documents = total,
            concurrency = self.config.concurrency,
            command = %self.config.command,
            "Rendering documents"
        );

        let renders = files
            .iter()
            .map(|file| {
                let progress = progress.clone();
                async move {
                    let outcome = self.render(file).await;
                    let finished = done.fetch_add(1, Ordering::SeqCst) + 1;
                    progress.report(finished, total, &file.location.to_string());
                    outcome
                }
            })
            .collect::<Vec<_>>();

        let outcomes: Vec<_> = stream::iter(renders)
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut result = ExportBatchResult::new();
        for outcome in outcomes {
            match outcome {
                Ok(diagrams) => result.add_document(diagrams),
                Err(error) => {
                    tracing::warn!(error = %error.error, "Document export failed");
                    result.add_error(error);
                }
            }
        }

        Ok(result)
    }
}

//! Format disambiguation
//!
//! Files without a configured format get one chosen by the user. The prompt
//! is shown at most once per run and its answer applies to every file that
//! lacks a format.

use crate::adapters::engine::ExportEngine;
use crate::adapters::i18n::{Localizer, MessageId};
use crate::adapters::ui::Presenter;
use crate::domain::{ExportFormat, FileAndFormat, ResolvedFile};
use std::sync::Arc;

/// Fills in missing export formats
pub struct FormatDisambiguator {
    engine: Arc<dyn ExportEngine>,
    presenter: Arc<dyn Presenter>,
    localizer: Arc<dyn Localizer>,
}

impl FormatDisambiguator {
    /// Create a new disambiguator
    pub fn new(
        engine: Arc<dyn ExportEngine>,
        presenter: Arc<dyn Presenter>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            engine,
            presenter,
            localizer,
        }
    }

    /// Give every file a format
    ///
    /// Returns `None` when the user dismisses the prompt (or answers with
    /// something that is not a format); nothing should be exported then.
    pub async fn disambiguate(&self, files: Vec<FileAndFormat>) -> Option<Vec<ResolvedFile>> {
        let missing = files.iter().filter(|f| f.format.is_none()).count();

        if missing == 0 {
            return Some(
                files
                    .into_iter()
                    .filter_map(|f| ResolvedFile::try_from(f).ok())
                    .collect(),
            );
        }

        tracing::debug!(missing, total = files.len(), "Asking for an export format");

        let formats = self.engine.formats();
        let placeholder = self.localizer.localize(MessageId::SelectFormat, &[]);
        let picked = match self.presenter.pick_one(&formats, &placeholder).await {
            Some(picked) => picked,
            None => {
                tracing::info!("Format selection cancelled");
                return None;
            }
        };

        let format = match ExportFormat::new(&picked) {
            Ok(format) => format,
            Err(e) => {
                tracing::warn!(selection = %picked, error = %e, "Ignoring invalid format selection");
                return None;
            }
        };

        tracing::debug!(format = %format, "Format selected");
        Some(files.into_iter().map(|f| f.resolve_with(&format)).collect())
    }
}

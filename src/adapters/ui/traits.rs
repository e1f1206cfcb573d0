//! User interface abstraction traits

use async_trait::async_trait;

/// Prompts, messages and the report panel
#[async_trait]
pub trait Presenter: Send + Sync {
    /// Ask the user to pick one of `options`
    ///
    /// Returns `None` when the user dismisses the prompt.
    async fn pick_one(&self, options: &[String], placeholder: &str) -> Option<String>;

    /// Show an informational message with optional action buttons
    ///
    /// Returns the chosen action, or `None` when dismissed or when there
    /// are no actions.
    async fn show_info(&self, message: &str, actions: &[String]) -> Option<String>;

    /// Display a multi-line report
    fn show_report(&self, report: &str);
}

/// A long-lived progress indicator shared across exports
pub trait ProgressHandle: Send + Sync {
    /// `done` of `total` documents finished, the last one being `label`
    fn report(&self, done: usize, total: usize, label: &str);

    /// Remove the indicator
    fn hide(&self);
}

/// Progress handle that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressHandle for NoProgress {
    fn report(&self, _done: usize, _total: usize, _label: &str) {}

    fn hide(&self) {}
}

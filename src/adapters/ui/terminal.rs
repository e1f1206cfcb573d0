//! Terminal presenter and progress line
//!
//! Messages and the report go to stdout, the progress line to stderr.
//! Answers are read from stdin; when stdin is not a terminal, prompts are
//! dismissed unless a preset answer was configured.

use super::traits::{Presenter, ProgressHandle};
use async_trait::async_trait;
use std::io::{IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufReadExt, BufReader};

/// [`Presenter`] on stdin/stdout
#[derive(Debug, Clone)]
pub struct TerminalPresenter {
    interactive: bool,
    preset_choice: Option<String>,
    auto_action: bool,
}

impl TerminalPresenter {
    /// Create a presenter; interactive when stdin is a terminal
    pub fn new() -> Self {
        Self {
            interactive: std::io::stdin().is_terminal(),
            preset_choice: None,
            auto_action: false,
        }
    }

    /// Answer the next pick prompt with `choice` instead of asking
    pub fn with_preset_choice(mut self, choice: Option<String>) -> Self {
        self.preset_choice = choice;
        self
    }

    /// Accept the first action of every message without asking
    pub fn with_auto_action(mut self, auto_action: bool) -> Self {
        self.auto_action = auto_action;
        self
    }

    /// Force interactive mode on or off
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    async fn read_answer(&self) -> Option<String> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        match lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read answer from stdin");
                None
            }
        }
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Match an answer against `options` by 1-based number or by name
///
/// Blank or unknown answers select nothing.
pub fn choose(options: &[String], answer: &str) -> Option<String> {
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }

    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i)).cloned();
    }

    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(answer))
        .cloned()
}

#[async_trait]
impl Presenter for TerminalPresenter {
    async fn pick_one(&self, options: &[String], placeholder: &str) -> Option<String> {
        if let Some(preset) = &self.preset_choice {
            let picked = choose(options, preset);
            if picked.is_none() {
                tracing::warn!(choice = %preset, "Preset choice is not among the options");
                eprintln!("'{preset}' is not one of: {}", options.join(", "));
            }
            return picked;
        }

        if !self.interactive {
            tracing::info!("Input is not interactive, dismissing prompt");
            return None;
        }

        println!("{placeholder}");
        for (i, option) in options.iter().enumerate() {
            println!("  {:>2}) {option}", i + 1);
        }
        print!("> ");
        let _ = std::io::stdout().flush();

        let answer = self.read_answer().await?;
        choose(options, &answer)
    }

    async fn show_info(&self, message: &str, actions: &[String]) -> Option<String> {
        println!("{message}");

        if actions.is_empty() {
            return None;
        }
        if self.auto_action {
            return actions.first().cloned();
        }
        if !self.interactive {
            return None;
        }

        let menu: Vec<String> = actions
            .iter()
            .enumerate()
            .map(|(i, a)| format!("[{}] {a}", i + 1))
            .collect();
        print!("{}  (Enter to dismiss): ", menu.join("  "));
        let _ = std::io::stdout().flush();

        let answer = self.read_answer().await?;
        choose(actions, &answer)
    }

    fn show_report(&self, report: &str) {
        println!();
        println!("{report}");
        println!();
    }
}

/// Single-line progress indicator on stderr
#[derive(Debug)]
pub struct TerminalProgress {
    enabled: bool,
    visible: AtomicBool,
}

impl TerminalProgress {
    /// Create a progress line; drawn only when stderr is a terminal
    pub fn new() -> Self {
        Self {
            enabled: std::io::stderr().is_terminal(),
            visible: AtomicBool::new(false),
        }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressHandle for TerminalProgress {
    fn report(&self, done: usize, total: usize, label: &str) {
        tracing::debug!(done, total, label, "Export progress");
        if !self.enabled {
            return;
        }
        self.visible.store(true, Ordering::SeqCst);
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r\x1b[2K[{done}/{total}] {label}");
        let _ = stderr.flush();
    }

    fn hide(&self) {
        if self.visible.swap(false, Ordering::SeqCst) {
            let mut stderr = std::io::stderr().lock();
            let _ = write!(stderr, "\r\x1b[2K");
            let _ = stderr.flush();
        }
    }
}

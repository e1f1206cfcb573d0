//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for diagram-export using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// diagram-export - Workspace diagram export tool
#[derive(Parser, Debug)]
#[command(name = "diagram-export")]
#[command(version, about, long_about = None)]
#[command(author = "diagram-export Contributors")]
pub struct Cli {
    /// Path to configuration file (default: diagram-export.toml if present)
    #[arg(short, long, env = "DIAGRAM_EXPORT_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DIAGRAM_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export diagram files from the workspace
    Export(commands::export::ExportArgs),

    /// List the formats the renderer can produce
    Formats(commands::formats::FormatsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

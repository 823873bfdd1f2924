//! Command-line argument definitions for the Composer CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the saved layout,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Composer path diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the statement document (JSON)
    #[arg(help = "Path to the statement document")]
    pub input: String,

    /// Path to the output diagram (JSON)
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to a layout saved by a previous session
    #[arg(short, long)]
    pub layout: Option<String>,

    /// Write the assembled layout here so it can be reloaded with --layout
    #[arg(long)]
    pub save_layout: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

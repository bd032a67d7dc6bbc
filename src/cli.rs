//! Command-line argument parsing for the key resolver
//!
//! Supports:
//! - Resolving key sequences given as arguments, or one per stdin line
//! - Loading a mappings file
//! - Choosing the starting mode and interactivity
//! - Listing the built-in bindings

use clap::Parser;
use std::path::PathBuf;

use crate::keymap::Mode;

/// Resolve vim key sequences into commands
#[derive(Parser, Debug)]
#[command(
    name = "vimkeys",
    version,
    about = "Resolve vim key sequences into commands"
)]
pub struct CliArgs {
    /// Key sequences in vim notation (read from stdin when omitted)
    #[arg(value_name = "KEYS")]
    pub keys: Vec<String>,

    /// Mappings file (default: ~/.config/vimkeys/mappings.yaml)
    #[arg(short = 'm', long, value_name = "FILE")]
    pub mappings: Option<PathBuf>,

    /// Settings file (default: ~/.config/vimkeys/config.yaml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mode to start in (normal, insert, visual, V, b, select, o)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<Mode>,

    /// Read search patterns from the key stream instead of a prompt
    #[arg(long)]
    pub non_interactive: bool,

    /// Print the built-in bindings and exit
    #[arg(long)]
    pub list_bindings: bool,
}

/// Where key sequences come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Args(Vec<String>),
    Stdin,
}

/// What the binary should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Print bindings, for one mode or all of them
    ListBindings(Option<Mode>),
    Resolve(KeySource),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub run: RunMode,
    pub mode: Option<Mode>,
    pub mappings: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub non_interactive: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let run = if self.list_bindings {
            if !self.keys.is_empty() {
                return Err("--list-bindings does not take key sequences".to_string());
            }
            RunMode::ListBindings(self.mode)
        } else if self.keys.is_empty() {
            RunMode::Resolve(KeySource::Stdin)
        } else {
            RunMode::Resolve(KeySource::Args(self.keys))
        };

        Ok(RunConfig {
            run,
            mode: self.mode,
            mappings: self.mappings,
            config: self.config,
            non_interactive: self.non_interactive,
        })
    }
}

//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Compare localization keys used in code and markup with the base resource files
//! - `init`: Initialize the l10nscan configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::core::{BundleKind, CheckOptions};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Cargo-style human readable report
    #[default]
    Text,
    /// Machine readable JSON report
    Json,
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Source tree to scan, relative to the project root (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Base resource file of the message bundle (overrides config file)
    #[arg(long)]
    pub lang_bundle: Option<PathBuf>,

    /// Base resource file of the menu bundle (overrides config file)
    #[arg(long)]
    pub menu_bundle: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            root: self.root.clone(),
            source_root: self.source_root.clone(),
            lang_bundle: self.lang_bundle.clone(),
            menu_bundle: self.menu_bundle.clone(),
        }
    }
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Bundles to check (default: all)
    #[arg(value_enum)]
    pub bundles: Vec<BundleKind>,
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check for missing and obsolete localization keys
    Check(CheckCommand),
    /// Initialize a new .l10nscanrc.json configuration file
    Init,
}

//! # stdrev CLI Module
//!
//! This module implements the CLI interface for stdrev.
//!
//! ## Available Commands
//!
//! - `classify` - Classify a snapshot and print the result
//! - `check` - Exit 0 when a snapshot reaches a revision, 2 otherwise
//! - `ladder` - Show a family's revision ladder
//! - `quirks` - Show the effective quirks table

mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use stdrev_core::{LanguageFamily, Revision, StdrevError};

pub use commands::*;

use crate::config::{QUIRKS_ENV, load_quirks};

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// stdrev - C/C++ standard conformance classifier
///
/// Maps the conformance macros a toolchain defines onto the ladder of
/// ISO C and C++ revisions.
#[derive(Parser, Debug)]
#[command(name = "stdrev")]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Quirks override file (TOML)
    #[arg(short = 'Q', long, global = true, env = QUIRKS_ENV)]
    pub quirks: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a snapshot
    Classify {
        #[command(flatten)]
        input: SnapshotArgs,
    },

    /// Check that a snapshot reaches a revision (exit 0, or 2 when it does not)
    Check {
        #[command(flatten)]
        input: SnapshotArgs,

        /// Minimum revision required (e.g. C99, C++17)
        #[arg(short = 'a', long)]
        at_least: Revision,
    },

    /// Show a family's revision ladder
    Ladder {
        /// Language family (c, cpp)
        #[arg(short, long)]
        family: LanguageFamily,
    },

    /// Show the effective quirks table
    Quirks,
}

/// Where a snapshot comes from.
///
/// Without `--snapshot` or `--macros` the snapshot is built from the
/// remaining flags. `--family` and `--vendor` override whatever a file says.
#[derive(Args, Debug, Clone, Default)]
pub struct SnapshotArgs {
    /// Language family (c, cpp, none)
    #[arg(short, long)]
    pub family: Option<LanguageFamily>,

    /// Presence flag, e.g. __STDC__ (repeatable)
    #[arg(short = 'D', long = "define", value_name = "NAME")]
    pub defines: Vec<String>,

    /// Version token, e.g. 201710
    #[arg(short, long)]
    pub token: Option<u32>,

    /// Dialect flag, e.g. __cplusplus_cli (repeatable)
    #[arg(long = "dialect", value_name = "NAME")]
    pub dialects: Vec<String>,

    /// Vendor identifier used to select quirks
    #[arg(long)]
    pub vendor: Option<String>,

    /// JSON snapshot file
    #[arg(
        short,
        long,
        conflicts_with_all = ["macros", "defines", "token", "dialects"]
    )]
    pub snapshot: Option<PathBuf>,

    /// Compiler macro dump (`cc -dM -E`)
    #[arg(short, long, conflicts_with_all = ["defines", "token", "dialects"])]
    pub macros: Option<PathBuf>,
}

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// A `check` whose requirement was not met.
    Unsatisfied,
}

impl Outcome {
    /// Process exit code.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::Unsatisfied => 2,
        }
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<Outcome, StdrevError> {
    let json_mode = cli.json_mode;
    let quirks = load_quirks(cli.quirks.as_deref())?;

    match cli.command {
        Commands::Classify { input } => {
            cmd_classify(&quirks, &input, json_mode, cli.verbose).map(|()| Outcome::Success)
        }
        Commands::Check { input, at_least } => cmd_check(&quirks, &input, at_least, json_mode),
        Commands::Ladder { family } => cmd_ladder(family, json_mode).map(|()| Outcome::Success),
        Commands::Quirks => cmd_quirks(&quirks, json_mode).map(|()| Outcome::Success),
    }
}

// =============================================================================
// TESTS
// =============================================================================

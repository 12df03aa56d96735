//! Defines the command-line arguments and subcommands for the skald CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "skald",
    version,
    about = "Checks whether Scala-family sources parse as compilation units."
)]
pub struct SkaldArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse every source file under the given roots and tally the results.
    Check {
        /// Directory roots to scan for sources.
        #[arg(default_value = ".")]
        roots: Vec<PathBuf>,
        /// Emit the run summary as JSON instead of status lines.
        #[arg(long)]
        json: bool,
    },
    /// Parse a single file and render its diagnostic on failure.
    Parse {
        /// The source file to parse.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Parse a file while counting entries to one grammar rule.
    Trace {
        /// The source file to parse.
        #[arg(required = true)]
        file: PathBuf,
        /// The named rule to count, e.g. Type or Expr.
        #[arg(long, default_value = "Type")]
        rule: String,
    },
}

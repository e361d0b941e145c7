use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "switchcheck",
    version,
    about = "Exhaustiveness checks for annotated Go switch statements"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug details to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Check every `// switchchecker` switch under a directory
    Check {
        /// Root directory of the Go source tree (default: current directory)
        root: Option<PathBuf>,
        /// Insert missing cases (reserved, currently has no effect)
        #[arg(long)]
        fill: bool,
        /// Match exclusions against whole constant names instead of substrings
        #[arg(long)]
        exact_exclude: bool,
        /// Also analyse `_test.go` files
        #[arg(long)]
        include_tests: bool,
    },

    /// Print the constant catalog exported by each package
    Facts {
        /// Root directory of the Go source tree (default: current directory)
        root: Option<PathBuf>,
        /// Also analyse `_test.go` files
        #[arg(long)]
        include_tests: bool,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;

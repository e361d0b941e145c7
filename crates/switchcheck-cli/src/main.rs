//! switchcheck CLI: exhaustiveness checks for annotated Go switch statements.
//!
//! `switchcheck check [ROOT]` reports annotated switches that miss constants
//! of their tag type; `switchcheck facts [ROOT]` prints the per-package
//! constant catalogs. See `switchcheck --help` for usage.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter: Box<dyn switchcheck_output::OutputFormatter> = if cli.json {
        Box::new(switchcheck_output::json::JsonFormatter)
    } else {
        Box::new(switchcheck_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Check {
            root,
            fill,
            exact_exclude,
            include_tests,
        } => commands::check::run(
            &*formatter,
            cli.verbose,
            root,
            commands::check::CheckFlags {
                fill,
                exact_exclude,
                include_tests,
            },
        ),
        Commands::Facts {
            root,
            include_tests,
        } => commands::facts::run(&*formatter, cli.verbose, root, include_tests),
    };

    std::process::exit(exit_code);
}

/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, defaulting
/// to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

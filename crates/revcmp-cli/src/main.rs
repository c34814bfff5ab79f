//! Revcmp CLI
//!
//! Command-line interface for comparing document revisions

use clap::{Parser, Subcommand};
use revcmp_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "revcmp")]
#[command(about = "Revcmp - Structural comparison of document revisions", long_about = None)]
struct Cli {
    /// Logging profile (dev, prod, test); logs go to stderr
    #[arg(long, global = true)]
    log: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two revision files
    Compare(commands::compare::CompareArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(profile) = cli.log {
        init(profile);
    }

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

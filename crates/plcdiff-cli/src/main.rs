//! plcdiff CLI
//!
//! Command-line interface for reading did:plc audit log histories

use clap::{Parser, Subcommand};
use plcdiff_core::logging_facility;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "plcdiff")]
#[command(about = "plcdiff - Semantic change history of did:plc identities", long_about = None)]
struct Cli {
    /// Enable logging to stderr in the given style (RUST_LOG alone enables production)
    #[arg(long, value_enum, global = true)]
    log_profile: Option<commands::LogProfileArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the change timeline of an audit log
    History(commands::history::HistoryArgs),
    /// Print the current document state of an audit log
    State(commands::state::StateArgs),
}

fn main() {
    let cli = Cli::parse();

    let profile = match cli.log_profile {
        Some(profile) => Some(logging_facility::Profile::from(profile)),
        None if std::env::var_os("RUST_LOG").is_some() => {
            Some(logging_facility::Profile::Production)
        }
        None => None,
    };
    if let Some(profile) = profile {
        logging_facility::init(profile);
    }

    let result = match cli.command {
        Commands::History(args) => commands::history::execute(args),
        Commands::State(args) => commands::state::execute(args),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

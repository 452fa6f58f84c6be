// file: src/main.rs
// version: 1.0.0
// guid: a1f83c69-d247-4e05-b9a1-67c28f40d5e3

//! NixOS Bootstrap - Main entry point

use clap::Parser;
use nixos_bootstrap::{
    cli::{
        args::Cli,
        commands::{install_command, Outcome},
    },
    logging::logger,
};
use tokio::signal;
use tracing::{error, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_logger(cli.verbose, cli.quiet) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    // Ctrl+C only matters before the confirmation gate; past it the
    // pipeline runs to completion or aborts fatally.
    let shutdown_signal = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        warn!("Interrupted, exiting");
    };

    tokio::select! {
        result = install_command(&cli) => match result {
            Ok(Outcome::Completed) => {}
            Ok(Outcome::Declined) => std::process::exit(0),
            Err(e) => {
                error!("FATAL: {}", e);
                std::process::exit(1);
            }
        },
        _ = shutdown_signal => {
            std::process::exit(130); // Standard exit code for Ctrl+C
        }
    }
}

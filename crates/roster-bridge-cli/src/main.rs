// roster-bridge-cli/src/main.rs
// ============================================================================
// Module: Roster Bridge CLI Entry Point
// Description: Command dispatcher for the Roster Bridge server.
// Purpose: Run the server or validate configuration from the command line.
// Dependencies: clap, roster-bridge-config, roster-bridge-server, tokio
// ============================================================================

//! ## Overview
//! The CLI exposes two commands: `serve` runs the HTTP server from a config
//! file, and `check-config` validates a config file and prints a summary
//! without binding anything. `--config` falls back to the
//! `ROSTER_BRIDGE_CONFIG` environment variable, then the default filename.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use roster_bridge_config::RosterBridgeConfig;
use roster_bridge_server::RosterBridgeServer;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Roster Bridge command-line interface.
#[derive(Debug, Parser)]
#[command(name = "roster-bridge", about = "Storefront integration backend", version)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve {
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file and print a summary.
    CheckConfig {
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Dispatches the parsed command.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Serve {
            config,
        } => run_serve(config.as_deref()),
        Command::CheckConfig {
            config,
        } => run_check_config(config.as_deref()),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            let mut stderr = std::io::stderr();
            let _ = writeln!(&mut stderr, "{message}");
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration and runs the server to completion.
fn run_serve(path: Option<&std::path::Path>) -> Result<(), String> {
    let config = RosterBridgeConfig::load(path).map_err(|err| err.to_string())?;
    let server = RosterBridgeServer::from_config(config).map_err(|err| err.to_string())?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("runtime build failed: {err}"))?;
    runtime.block_on(server.serve()).map_err(|err| err.to_string())
}

/// Loads and validates configuration, printing a short summary.
fn run_check_config(path: Option<&std::path::Path>) -> Result<(), String> {
    let config = RosterBridgeConfig::load(path).map_err(|err| err.to_string())?;
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{}", config_summary(&config)).map_err(|err| err.to_string())
}

/// Renders a one-paragraph summary of validated configuration.
fn config_summary(config: &RosterBridgeConfig) -> String {
    format!(
        "config ok: bind={} tls={} signature={} origins={} storefront={} record_store_base={}",
        config.server.bind,
        if config.server.tls_enabled() { "on" } else { "off" },
        if config.signature.enabled { "enabled" } else { "disabled" },
        config.server.allowed_origins.len(),
        config.storefront.shop_domain,
        config.record_store.base_id,
    )
}

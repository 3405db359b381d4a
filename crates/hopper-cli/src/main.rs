//! # hopper-cli
//!
//! Minecraft mod updater for the Modrinth registry.
//!
//! This is the main entry point for the hopper CLI tool. It handles command
//! parsing, sets up logging and the crash handler, and dispatches to the
//! appropriate command handlers.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use hopper_core::error::HopperResult;
use tracing::info;

mod backup;
mod commands;
mod crash;
mod output;

use commands::CommandContext;

/// Keeps a Minecraft mods directory up to date against Modrinth
#[derive(Parser)]
#[command(name = "hopper", version, about = "Minecraft mod updater for Modrinth")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify installed mods, resolve updates and required dependencies
    Update {
        /// Simulate only: no downloads, backups, or deletions
        #[arg(long, alias = "test")]
        dry_run: bool,

        /// Minecraft version to target (e.g. 1.21.1); prompted when absent
        #[arg(short = 'g', long)]
        game_version: Option<String>,

        /// Mod loader to target (fabric / forge / quilt); prompted when absent
        #[arg(short = 'l', long)]
        loader: Option<String>,

        /// Mods directory (defaults to the detected .minecraft/mods)
        #[arg(long)]
        mods_dir: Option<Utf8PathBuf>,

        /// Path to a hopper.toml configuration file
        #[arg(long)]
        config: Option<Utf8PathBuf>,

        /// Registry API endpoint override
        #[arg(long)]
        registry_url: Option<String>,
    },
    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    crash::install_panic_hook();

    info!("Starting hopper v{}", env!("CARGO_PKG_VERSION"));

    if let Err(error) = run_cli(cli) {
        // The only fatal path: durable crash report, notify, exit
        crash::log_fatal(&error);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> HopperResult<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().map_err(|e| hopper_core::error::HopperError::Io {
        message: "Failed to create async runtime".to_string(),
        source: e,
    })?;

    rt.block_on(async {
        let ctx = CommandContext::new()?;

        match cli.command {
            Some(command) => commands::dispatch_command(command, &ctx).await,
            // Bare `hopper` behaves like `hopper update`
            None => {
                commands::dispatch_command(
                    Commands::Update {
                        dry_run: false,
                        game_version: None,
                        loader: None,
                        mods_dir: None,
                        config: None,
                        registry_url: None,
                    },
                    &ctx,
                )
                .await
            }
        }
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "hopper_cli={level},hopper_config={level},hopper_registry={level},hopper_resolver={level}"
        ))
        .with_target(false)
        .init();
}

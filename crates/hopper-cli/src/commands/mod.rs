//! Command implementations and dispatch logic.
//!
//! This module contains all command handlers and the central dispatch system.
//! Each command is implemented as an async function that takes a CommandContext.

use camino::Utf8PathBuf;
use hopper_core::error::{HopperError, HopperResult};
use tracing::info;

pub mod update;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context
    pub fn new() -> HopperResult<Self> {
        let cwd = std::env::current_dir().map_err(|e| HopperError::Io {
            message: "Failed to get current directory".to_string(),
            source: e,
        })?;
        let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|path| HopperError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("Working directory '{}' is not UTF-8", path.display()),
        })?;

        let output = OutputHandler::new();

        Ok(Self { cwd, output })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> HopperResult<()> {
    match command {
        Commands::Update {
            dry_run,
            game_version,
            loader,
            mods_dir,
            config,
            registry_url,
        } => {
            info!("Running update (dry_run: {})", dry_run);
            update::execute(
                update::UpdateArgs {
                    dry_run,
                    game_version,
                    loader,
                    mods_dir,
                    config,
                    registry_url,
                },
                ctx,
            )
            .await
        }
        Commands::Version => {
            info!("Showing version information");
            show_version(ctx)
        }
    }
}

fn show_version(ctx: &CommandContext) -> HopperResult<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build_date = env!("BUILD_DATE");
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    ctx.output.plain(&format!("hopper v{}", version));
    ctx.output.plain(&format!("Built: {}", build_date));
    ctx.output.plain(&format!("Target: {}", target));
    ctx.output.plain(&format!("Rust: {}", env!("RUSTC_VERSION")));

    Ok(())
}

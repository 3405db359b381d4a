//! `hopper update` command implementation.
//!
//! Loads configuration, snapshots the mods directory, identifies every jar
//! against the registry, resolves the best compatible versions plus required
//! dependencies, and prints the outcome summary.

use std::io::{BufRead, Write};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

use hopper_config::{apply_cli_overrides, resolve_mods_dir, CliOverrides, ConfigLoader, ConfigSource};
use hopper_core::error::{HopperError, HopperResult};
use hopper_core::types::{CompatibilityTarget, LocalArchive};
use hopper_registry::RegistryClient;
use hopper_resolver::{IdentityResolver, RunMode, UpdateEngine};

use super::CommandContext;
use crate::backup;

/// Flags accepted by `hopper update`
pub struct UpdateArgs {
    pub dry_run: bool,
    pub game_version: Option<String>,
    pub loader: Option<String>,
    pub mods_dir: Option<Utf8PathBuf>,
    pub config: Option<Utf8PathBuf>,
    pub registry_url: Option<String>,
}

/// Execute the `hopper update` command
pub async fn execute(args: UpdateArgs, ctx: &CommandContext) -> HopperResult<()> {
    if args.dry_run {
        ctx.output.step("🔍", "Checking for mod updates (dry run)");
    } else {
        ctx.output.step("🔄", "Updating mods");
    }

    let loader = ConfigLoader::new(ctx.cwd.clone());
    let (config, source) = loader.load(args.config.as_deref()).await?;
    if let ConfigSource::File(path) = &source {
        ctx.output.info(&format!("Using configuration from {}", path));
    }

    let config = apply_cli_overrides(
        config,
        &CliOverrides {
            game_version: args.game_version,
            loader: args.loader,
            mods_dir: args.mods_dir,
            registry_url: args.registry_url,
        },
    );
    hopper_config::validate_config(&config)?;

    let mods_dir = resolve_mods_dir(&config)?;
    if !mods_dir.is_dir() {
        std::fs::create_dir_all(&mods_dir)
            .map_err(|e| HopperError::io(format!("Failed to create {}", mods_dir), e))?;
        ctx.output
            .info(&format!("Created mods directory {}", mods_dir));
    }
    info!(mods_dir = %mods_dir, "managing mods directory");

    let target = resolve_target(&config, ctx)?;
    ctx.output
        .info(&format!("Targeting {} for all mods", target));

    let (archives, backup_dir) = snapshot_archives(&mods_dir, args.dry_run)?;
    if archives.is_empty() {
        ctx.output.warn(&format!("No jar files found in {}", mods_dir));
        return Ok(());
    }
    if let Some(dir) = &backup_dir {
        ctx.output
            .step("🗃️", &format!("Backed up current mods to {}", dir));
    }
    ctx.output
        .info(&format!("Found {} installed mods", archives.len()));

    let client = Arc::new(RegistryClient::with_base_url(&config.registry.url)?);
    let identity = IdentityResolver::new(client.clone(), config.effective_overrides());
    let mode = if args.dry_run { RunMode::DryRun } else { RunMode::Live };
    let engine = UpdateEngine::new(client, identity, target, mode, mods_dir.clone());

    let report = engine.run(&archives).await;
    ctx.output.summary(&report);

    match backup_dir {
        Some(dir) => ctx
            .output
            .success(&format!("Old mods are safely backed up in: {}", dir)),
        None => ctx.output.success("Dry run complete. No files were changed."),
    }

    Ok(())
}

/// Compatibility target from config, prompting for anything still missing
fn resolve_target(config: &hopper_config::HopperToml, ctx: &CommandContext) -> HopperResult<CompatibilityTarget> {
    let game_version = match &config.target.game_version {
        Some(version) => version.clone(),
        None => prompt(
            "Minecraft version to target (e.g. 1.20.1): ",
            "target.game_version",
            ctx,
        )?,
    };
    let loader = match &config.target.loader {
        Some(loader) => loader.clone(),
        None => prompt(
            "Mod loader to target (fabric / forge / quilt): ",
            "target.loader",
            ctx,
        )?,
    };
    Ok(CompatibilityTarget::new(game_version, loader))
}

/// Ask on stdin until a non-empty answer arrives
fn prompt(label: &str, field: &str, ctx: &CommandContext) -> HopperResult<String> {
    let stdin = std::io::stdin();
    prompt_with(label, field, &mut stdin.lock(), ctx)
}

/// Prompt loop over an arbitrary reader. A zero-byte read means the stream
/// is closed (piped or non-interactive invocation), which must fail with a
/// pointer to the flag rather than retry forever.
fn prompt_with<R: BufRead>(
    label: &str,
    field: &str,
    input: &mut R,
    ctx: &CommandContext,
) -> HopperResult<String> {
    loop {
        print!("{}", label);
        std::io::stdout()
            .flush()
            .map_err(|e| HopperError::io("Failed to flush stdout".to_string(), e))?;

        let mut answer = String::new();
        let bytes = input
            .read_line(&mut answer)
            .map_err(|e| HopperError::io("Failed to read from stdin".to_string(), e))?;
        if bytes == 0 {
            return Err(HopperError::ConfigValidation {
                field: field.to_string(),
                reason: "no value supplied and stdin is closed; pass the flag or set it in hopper.toml"
                    .to_string(),
            });
        }

        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
        ctx.output.error("A value is required");
    }
}

/// The jars an update run works from, plus the backup directory when one
/// was made.
///
/// Live runs move the current jars into a backup first and identify from
/// that snapshot, so the live directory only receives fresh downloads. Dry
/// runs read the live directory and touch nothing. An empty mods directory
/// short-circuits before any backup is created.
fn snapshot_archives(
    mods_dir: &Utf8Path,
    dry_run: bool,
) -> HopperResult<(Vec<LocalArchive>, Option<Utf8PathBuf>)> {
    let live = enumerate_archives(mods_dir)?;
    if dry_run || live.is_empty() {
        return Ok((live, None));
    }

    let parent = mods_dir.parent().ok_or_else(|| HopperError::ConfigValidation {
        field: "paths.mods_dir".to_string(),
        reason: format!("'{}' has no parent directory for backups", mods_dir),
    })?;
    let backup_dir = backup::backup_and_clear(mods_dir, parent)?;
    let archives = enumerate_archives(&backup_dir)?;
    Ok((archives, Some(backup_dir)))
}

/// Jars in the snapshot directory, in filename order
fn enumerate_archives(dir: &Utf8Path) -> HopperResult<Vec<LocalArchive>> {
    let mut archives = Vec::new();
    for entry in dir
        .read_dir_utf8()
        .map_err(|e| HopperError::io(format!("Failed to read {}", dir), e))?
    {
        let entry = entry.map_err(|e| HopperError::io("Failed to read directory entry".to_string(), e))?;
        let path = entry.path();
        if path.is_file() && path.extension() == Some("jar") {
            if let Some(filename) = path.file_name() {
                archives.push(LocalArchive::new(filename, path));
            }
        }
    }
    archives.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(archives)
}

//! CLI command implementations

pub mod balance;
pub mod log;
pub mod shell;
pub mod state;
pub mod transfer;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use teller_core::{LogEvent, LoggingService, TellerContext};

/// Get the teller directory from environment or default
pub fn get_teller_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TELLER_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".teller")
    }
}

/// Acquire the directory lock, then build the context
///
/// The returned lock file must stay alive for as long as the context is in
/// use; dropping it releases the lock.
pub fn get_context() -> Result<(TellerContext, File)> {
    let teller_dir = get_teller_dir();

    std::fs::create_dir_all(&teller_dir)
        .with_context(|| format!("Failed to create teller directory: {:?}", teller_dir))?;

    let lock = acquire_lock(&teller_dir)?;

    let ctx = TellerContext::new(&teller_dir).context("Failed to initialize teller context")?;
    Ok((ctx, lock))
}

/// Exclusive advisory lock on the teller directory
///
/// Two concurrent teller processes would race each other on the default
/// state file; the second one fails fast instead.
fn acquire_lock(teller_dir: &Path) -> Result<File> {
    let lock_path = teller_dir.join("teller.lock");
    let file = File::create(&lock_path)
        .with_context(|| format!("Failed to create lock file: {:?}", lock_path))?;
    file.try_lock_exclusive()
        .context("Another teller process is already running")?;
    Ok(file)
}

/// The default on-disk ledger the one-shot commands work against
pub fn default_state_file() -> PathBuf {
    get_teller_dir().join("ledger.json")
}

/// Load the default state file if it exists; a missing file is a fresh ledger
pub fn preload_state(ctx: &TellerContext) -> Result<()> {
    ctx.snapshot_service
        .load(&default_state_file())
        .context("Failed to load ledger state")?;
    Ok(())
}

/// Persist the in-memory ledger back to the default state file
pub fn persist_state(ctx: &TellerContext) -> Result<()> {
    ctx.snapshot_service
        .save(&default_state_file())
        .context("Failed to save ledger state")?;
    Ok(())
}

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let teller_dir = get_teller_dir();
    std::fs::create_dir_all(&teller_dir).ok()?;
    LoggingService::new(&teller_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Take the PIN from the flag or prompt for it with masked input
pub fn prompt_pin(account: &str, provided: Option<String>) -> Result<String> {
    match provided {
        Some(pin) => Ok(pin),
        None => Ok(dialoguer::Password::new()
            .with_prompt(format!("PIN for {}", account))
            .interact()?),
    }
}

/// Validate and resolve a user-supplied snapshot path
pub fn checked_path(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        anyhow::bail!("Snapshot path cannot be empty");
    }
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

//! Save/load commands - export and import ledger snapshots

use std::path::Path;

use anyhow::Result;
use teller_core::{LoadOutcome, LogEvent};

use super::{checked_path, get_context, get_logger, log_event, persist_state, preload_state};
use crate::output;

pub fn run_save(path: &Path, json: bool) -> Result<()> {
    let logger = get_logger();
    let (ctx, _lock) = get_context()?;
    // Export the current ledger, not the seeds
    preload_state(&ctx)?;

    let path = checked_path(path)?;
    let report = ctx.snapshot_service.save(&path)?;
    log_event(&logger, LogEvent::new("state_saved").with_command("save"));

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::success(&format!(
        "Saved {} accounts and {} transactions to {}",
        report.accounts,
        report.transactions,
        report.path.display()
    ));
    Ok(())
}

pub fn run_load(path: &Path, json: bool) -> Result<()> {
    let logger = get_logger();
    let (ctx, _lock) = get_context()?;

    let path = checked_path(path)?;
    let outcome = ctx.snapshot_service.load(&path)?;

    if let LoadOutcome::NotFound = outcome {
        // Recoverable: the ledger is left as it was
        output::warning(&format!("No snapshot found at {}", path.display()));
        return Ok(());
    }

    // The imported snapshot becomes the default ledger going forward
    persist_state(&ctx)?;
    log_event(&logger, LogEvent::new("state_loaded").with_command("load"));

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    if let LoadOutcome::Loaded {
        accounts,
        transactions,
    } = outcome
    {
        output::success(&format!(
            "Loaded {} accounts and {} transactions from {}",
            accounts,
            transactions,
            path.display()
        ));
    }
    Ok(())
}

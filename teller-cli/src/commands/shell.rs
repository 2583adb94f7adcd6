//! Shell command - the interactive menu loop
//!
//! A thin loop over the core services: every menu action maps onto one core
//! call and renders its typed result. No failure here terminates the shell;
//! errors print and the menu comes back.

use std::path::Path;

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use rust_decimal::Decimal;
use teller_core::{LoadOutcome, LogEvent, LoggingService, TellerContext};

use super::{checked_path, get_context, get_logger, log_event, preload_state};
use crate::output;

const MENU: &[&str] = &[
    "Login",
    "Check balance",
    "Transfer money",
    "View transaction log",
    "Save ledger state",
    "Load ledger state",
    "Logout",
    "Quit",
];

pub fn run() -> Result<()> {
    let logger = get_logger();
    let (ctx, _lock) = get_context()?;
    preload_state(&ctx)?;

    output::info("Teller - accounts, transfers, and an audit log");

    loop {
        let prompt = match ctx.session.current() {
            Some(session) => format!("teller ({})", session.identity),
            None => "teller".to_string(),
        };

        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(MENU)
            .default(0)
            .interact()?;

        let result = match choice {
            0 => login(&ctx, &logger),
            1 => balance(&ctx),
            2 => transfer(&ctx, &logger),
            3 => view_log(&ctx),
            4 => save(&ctx, &logger),
            5 => load(&ctx, &logger),
            6 => {
                ctx.session.clear();
                output::info("Logged out");
                Ok(())
            }
            _ => break,
        };

        // Render and keep going; the menu must survive every failure
        if let Err(e) = result {
            output::error(&e.to_string());
        }
    }

    Ok(())
}

fn login(ctx: &TellerContext, logger: &Option<LoggingService>) -> Result<()> {
    let account: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Account")
        .interact_text()?;
    let pin = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("PIN")
        .interact()?;

    match ctx.auth_service.authenticate(&ctx.session, &account, &pin) {
        Ok(session) => {
            log_event(
                logger,
                LogEvent::new("login_success").with_account(&session.identity),
            );
            output::success(&format!(
                "Welcome {}. Session token: {}",
                session.identity, session.token
            ));
            Ok(())
        }
        Err(e) => {
            log_event(logger, LogEvent::new("login_failed"));
            Err(e.into())
        }
    }
}

fn balance(ctx: &TellerContext) -> Result<()> {
    // The session check lives in this layer; the core serves balances to
    // any caller
    let Some(session) = ctx.session.current() else {
        output::warning("Please login first");
        return Ok(());
    };

    let balance = ctx.store.balance(&session.identity)?;
    println!("Current balance: {}", output::money(balance));
    Ok(())
}

fn transfer(ctx: &TellerContext, logger: &Option<LoggingService>) -> Result<()> {
    let Some(session) = ctx.session.current() else {
        output::warning("Please login first");
        return Ok(());
    };

    let to: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("To account")
        .interact_text()?;
    let raw: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Amount")
        .interact_text()?;
    let amount: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid amount: {}", raw))?;

    match ctx
        .transfer_service
        .transfer(&ctx.session, &session.identity, &to, amount, None)
    {
        Ok(record) => {
            log_event(
                logger,
                LogEvent::new("transfer_committed").with_account(&record.from),
            );
            output::success(&format!(
                "Transferred {} from {} to {}",
                output::money(record.amount),
                record.from,
                record.to
            ));
            Ok(())
        }
        Err(e) => {
            log_event(
                logger,
                LogEvent::new("transfer_failed")
                    .with_account(&session.identity)
                    .with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}

fn view_log(ctx: &TellerContext) -> Result<()> {
    let transactions = ctx.transfer_service.transactions();
    if transactions.is_empty() {
        output::info("No transactions found");
        return Ok(());
    }
    println!("{}", output::transactions_table(&transactions));
    Ok(())
}

fn save(ctx: &TellerContext, logger: &Option<LoggingService>) -> Result<()> {
    let filename: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Filename")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("filename cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let path = checked_path(Path::new(filename.trim()))?;
    let report = ctx.snapshot_service.save(&path)?;
    log_event(logger, LogEvent::new("state_saved"));

    output::success(&format!(
        "Saved {} accounts and {} transactions to {}",
        report.accounts,
        report.transactions,
        report.path.display()
    ));
    Ok(())
}

fn load(ctx: &TellerContext, logger: &Option<LoggingService>) -> Result<()> {
    let filename: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Filename")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("filename cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let path = checked_path(Path::new(filename.trim()))?;
    match ctx.snapshot_service.load(&path)? {
        LoadOutcome::Loaded {
            accounts,
            transactions,
        } => {
            log_event(logger, LogEvent::new("state_loaded"));
            output::success(&format!(
                "Loaded {} accounts and {} transactions from {}",
                accounts,
                transactions,
                path.display()
            ));
        }
        LoadOutcome::NotFound => {
            output::warning(&format!("No snapshot found at {}", path.display()));
        }
    }
    Ok(())
}

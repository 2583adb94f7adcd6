//! Transfer command - move money between accounts

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use teller_core::LogEvent;

use super::{get_context, get_logger, log_event, persist_state, preload_state, prompt_pin};
use crate::output;

pub fn run(
    from: &str,
    to: &str,
    amount: &str,
    token: Option<String>,
    pin: Option<String>,
    json: bool,
) -> Result<()> {
    let logger = get_logger();
    let (ctx, _lock) = get_context()?;
    preload_state(&ctx)?;

    let amount: Decimal = amount
        .trim()
        .parse()
        .with_context(|| format!("Invalid amount: {}", amount))?;

    let pin = prompt_pin(from, pin)?;
    if let Err(e) = ctx.auth_service.authenticate(&ctx.session, from, &pin) {
        log_event(
            &logger,
            LogEvent::new("login_failed").with_command("transfer"),
        );
        return Err(e.into());
    }

    match ctx
        .transfer_service
        .transfer(&ctx.session, from, to, amount, token)
    {
        Ok(record) => {
            persist_state(&ctx)?;
            log_event(
                &logger,
                LogEvent::new("transfer_committed")
                    .with_command("transfer")
                    .with_account(from),
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                output::success(&format!(
                    "Transferred {} from {} to {}",
                    output::money(record.amount),
                    record.from,
                    record.to
                ));
            }
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("transfer_failed")
                    .with_command("transfer")
                    .with_account(from)
                    .with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}

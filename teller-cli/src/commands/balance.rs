//! Balance command - show an account balance

use anyhow::Result;

use super::{get_context, preload_state, prompt_pin};
use crate::output;

pub fn run(account: &str, pin: Option<String>, json: bool) -> Result<()> {
    let (ctx, _lock) = get_context()?;
    preload_state(&ctx)?;

    let pin = prompt_pin(account, pin)?;
    ctx.auth_service
        .authenticate(&ctx.session, account, &pin)?;

    let balance = ctx.store.balance(account)?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "account": account, "balance": balance })
        );
        return Ok(());
    }

    println!("Current balance: {}", output::money(balance));
    Ok(())
}

//! Log command - show the transaction log

use anyhow::Result;

use super::{get_context, preload_state};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let (ctx, _lock) = get_context()?;
    preload_state(&ctx)?;

    let transactions = ctx.transfer_service.transactions();

    if json {
        println!("{}", serde_json::to_string_pretty(&transactions)?);
        return Ok(());
    }

    if transactions.is_empty() {
        output::info("No transactions found");
        return Ok(());
    }

    println!("{}", output::transactions_table(&transactions));
    Ok(())
}

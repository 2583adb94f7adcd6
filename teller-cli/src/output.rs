//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use rust_decimal::Decimal;
use teller_core::Transaction;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format a monetary amount for display
pub fn money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

/// Render the transaction log as a table
pub fn transactions_table(transactions: &[Transaction]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["#", "From", "To", "Amount", "Timestamp", "Token"]);
    for (i, tx) in transactions.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            tx.from.clone(),
            tx.to.clone(),
            money(tx.amount),
            tx.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            tx.token.clone().unwrap_or_default(),
        ]);
    }
    table
}

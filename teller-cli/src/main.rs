//! Teller CLI - a small ledger in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{balance, log, shell, state, transfer};

/// Teller - accounts, transfers, and an audit log in your terminal
#[derive(Parser)]
#[command(name = "teller", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (the default when no subcommand is given)
    Shell,

    /// Show an account balance
    Balance {
        /// Account identifier
        account: String,
        /// PIN for the account (prompted when omitted)
        #[arg(long)]
        pin: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transfer money from your account to another
    Transfer {
        /// Source account (must be the one you authenticate as)
        from: String,
        /// Destination account
        to: String,
        /// Amount, e.g. 25.00
        amount: String,
        /// Attribution token recorded on the transaction
        #[arg(long)]
        token: Option<String>,
        /// PIN for the source account (prompted when omitted)
        #[arg(long)]
        pin: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the transaction log
    Log {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the current ledger snapshot to a file
    Save {
        /// Destination path
        path: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import a ledger snapshot from a file
    Load {
        /// Source path
        path: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None | Some(Commands::Shell) => shell::run(),
        Some(Commands::Balance { account, pin, json }) => balance::run(&account, pin, json),
        Some(Commands::Transfer {
            from,
            to,
            amount,
            token,
            pin,
            json,
        }) => transfer::run(&from, &to, &amount, token, pin, json),
        Some(Commands::Log { json }) => log::run(json),
        Some(Commands::Save { path, json }) => state::run_save(&path, json),
        Some(Commands::Load { path, json }) => state::run_load(&path, json),
    }
}

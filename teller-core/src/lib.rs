//! Teller Core - business logic for a small single-process ledger
//!
//! This crate implements the core ledger engine:
//!
//! - **domain**: Core business entities (Account, Transaction, Session, ...)
//! - **store**: The owned in-memory ledger state all services share
//! - **services**: Business logic orchestration (auth, transfer, snapshot,
//!   logging)
//! - **config**: Settings and seed accounts
//!
//! The interactive CLI lives in the sibling `teller-cli` crate and only ever
//! calls through the services; it carries no ledger semantics of its own.

pub mod config;
pub mod domain;
pub mod services;
pub mod store;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use config::Config;
use services::{AuthService, SnapshotService, TransferService};

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{
    Account, AccountRecord, CredentialHash, LedgerSnapshot, Session, SessionContext, Transaction,
};
pub use services::{LoadOutcome, LogEvent, LoggingService, SaveReport};
pub use store::LedgerStore;

/// Main context for Teller operations
///
/// The primary entry point for all business logic: loads configuration,
/// seeds the ledger store, and wires up the services around it. The session
/// context is owned here and threaded into calls by reference, so an
/// embedding that serves several clients simply holds several contexts.
pub struct TellerContext {
    pub config: Config,
    pub store: Arc<LedgerStore>,
    pub session: SessionContext,
    pub auth_service: AuthService,
    pub transfer_service: TransferService,
    pub snapshot_service: SnapshotService,
}

impl TellerContext {
    /// Create a new Teller context rooted at `teller_dir`
    pub fn new(teller_dir: &Path) -> Result<Self> {
        let config = Config::load(teller_dir)?;
        Self::with_config(config)
    }

    /// Create a context from an already-loaded configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let mut accounts = Vec::with_capacity(config.seed_accounts.len());
        for seed in &config.seed_accounts {
            let account = Account::new(
                &seed.id,
                seed.balance,
                CredentialHash::derive(&seed.pin)?,
            );
            account
                .validate()
                .map_err(|msg| Error::CorruptState(format!("seed account {}: {}", seed.id, msg)))?;
            accounts.push(account);
        }
        let store = Arc::new(LedgerStore::with_accounts(accounts));

        let auth_service = AuthService::new(Arc::clone(&store))?
            .with_latency_floor(Duration::from_millis(config.auth_delay_ms));
        let transfer_service = TransferService::new(Arc::clone(&store));
        let snapshot_service = SnapshotService::new(Arc::clone(&store));

        Ok(Self {
            config,
            store,
            session: SessionContext::new(),
            auth_service,
            transfer_service,
            snapshot_service,
        })
    }
}

//! Persisted ledger snapshot
//!
//! The snapshot is the self-describing JSON document the persistence gateway
//! writes and reads: the full account map plus the ordered transaction log.
//! On load it replaces in-memory state wholesale; there are no merge
//! semantics.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{CredentialHash, Transaction};

/// Persisted form of a single account (the map key carries the id)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub balance: Decimal,
    pub credential_hash: CredentialHash,
}

/// Point-in-time serialization of the whole ledger
///
/// A BTreeMap keeps the account ordering stable across saves, which keeps
/// snapshots diffable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub accounts: BTreeMap<String, AccountRecord>,
    pub transactions: Vec<Transaction>,
}

impl LedgerSnapshot {
    /// Check the ledger invariants a well-formed snapshot must satisfy
    ///
    /// A document that parses but violates these is treated as corrupt by
    /// the loader, and in-memory state stays untouched.
    pub fn validate(&self) -> Result<(), String> {
        for (id, record) in &self.accounts {
            if id.trim().is_empty() {
                return Err("snapshot contains an empty account id".to_string());
            }
            if record.balance < Decimal::ZERO {
                return Err(format!("negative balance for account {}", id));
            }
        }
        for (index, tx) in self.transactions.iter().enumerate() {
            if tx.amount <= Decimal::ZERO {
                return Err(format!(
                    "non-positive amount in transaction {} ({} -> {})",
                    index, tx.from, tx.to
                ));
            }
        }
        Ok(())
    }
}

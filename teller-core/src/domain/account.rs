//! Account domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::CredentialHash;

/// A named balance-holding entity with a credential
///
/// The identifier is unique and immutable after creation. The balance is
/// never negative; it is mutated only through the store's transfer protocol
/// (or the individual debit/credit operations, which enforce the same
/// invariant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub balance: Decimal,
    pub credential: CredentialHash,
}

impl Account {
    /// Create a new account
    pub fn new(id: impl Into<String>, balance: Decimal, credential: CredentialHash) -> Self {
        Self {
            id: id.into(),
            balance,
            credential,
        }
    }

    /// Validate account data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.id.trim().is_empty() {
            return Err("account id cannot be empty");
        }
        if self.balance < Decimal::ZERO {
            return Err("account balance cannot be negative");
        }
        Ok(())
    }
}

//! Ledger store - owned in-memory account and transaction state
//!
//! One store instance owns the account map and the append-only transaction
//! log, and every service shares it through an `Arc`. All state lives behind
//! a single mutex: a transfer's debit, credit, and log append happen under
//! one acquisition, so overlapping transfers can never interleave partially
//! and a snapshot can never observe a half-applied transfer.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, AccountRecord, LedgerSnapshot, Transaction};

struct LedgerState {
    accounts: HashMap<String, Account>,
    transactions: Vec<Transaction>,
}

/// Owned, mutex-guarded ledger state
pub struct LedgerStore {
    state: Mutex<LedgerState>,
}

impl LedgerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState {
                accounts: HashMap::new(),
                transactions: Vec::new(),
            }),
        }
    }

    /// Create a store holding the given accounts and an empty log
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let store = Self::new();
        {
            let mut state = store.lock();
            for account in accounts {
                state.accounts.insert(account.id.clone(), account);
            }
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        // Mutations never panic mid-update, so a poisoned guard still holds
        // consistent state
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current balance of an account
    pub fn balance(&self, id: &str) -> Result<Decimal> {
        let state = self.lock();
        state
            .accounts
            .get(id)
            .map(|account| account.balance)
            .ok_or_else(|| Error::unknown_account(id))
    }

    /// A copy of an account, credential included (used by authentication)
    pub fn account(&self, id: &str) -> Option<Account> {
        self.lock().accounts.get(id).cloned()
    }

    /// All account ids, sorted
    pub fn account_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.lock().accounts.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Reduce an account's balance
    pub fn debit(&self, id: &str, amount: Decimal) -> Result<()> {
        let mut state = self.lock();
        let account = state
            .accounts
            .get_mut(id)
            .ok_or_else(|| Error::unknown_account(id))?;
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(amount));
        }
        if account.balance < amount {
            return Err(Error::InsufficientFunds {
                account: id.to_string(),
            });
        }
        account.balance -= amount;
        Ok(())
    }

    /// Increase an account's balance
    pub fn credit(&self, id: &str, amount: Decimal) -> Result<()> {
        let mut state = self.lock();
        let account = state
            .accounts
            .get_mut(id)
            .ok_or_else(|| Error::unknown_account(id))?;
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(amount));
        }
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(Error::InvalidAmount(amount))?;
        Ok(())
    }

    /// Atomically apply a transfer and append it to the log
    ///
    /// Preconditions are checked in a fixed order: both accounts exist, the
    /// amount is positive, the source balance covers it. Either the debit,
    /// the credit, and the log append all happen under this one lock
    /// acquisition, or nothing does. Self-transfers are permitted: the
    /// balances are untouched but the record still lands in the log.
    pub fn commit_transfer(&self, record: Transaction) -> Result<Transaction> {
        let mut state = self.lock();

        let available = state
            .accounts
            .get(&record.from)
            .map(|account| account.balance)
            .ok_or_else(|| Error::unknown_account(&record.from))?;
        let destination = state
            .accounts
            .get(&record.to)
            .map(|account| account.balance)
            .ok_or_else(|| Error::unknown_account(&record.to))?;

        if record.amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(record.amount));
        }
        if available < record.amount {
            return Err(Error::InsufficientFunds {
                account: record.from.clone(),
            });
        }

        if !record.is_self_transfer() {
            // Compute both sides before touching either, so an overflow on
            // the credit cannot leave a lone debit behind
            let debited = available - record.amount;
            let credited = destination
                .checked_add(record.amount)
                .ok_or(Error::InvalidAmount(record.amount))?;
            if let Some(from) = state.accounts.get_mut(&record.from) {
                from.balance = debited;
            }
            if let Some(to) = state.accounts.get_mut(&record.to) {
                to.balance = credited;
            }
        }

        state.transactions.push(record.clone());
        Ok(record)
    }

    /// The full transaction log in append order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.lock().transactions.clone()
    }

    /// Number of records in the transaction log
    pub fn transaction_count(&self) -> usize {
        self.lock().transactions.len()
    }

    /// Sum of all balances (conserved across transfers)
    pub fn total_balance(&self) -> Decimal {
        self.lock()
            .accounts
            .values()
            .map(|account| account.balance)
            .sum()
    }

    /// Capture accounts and log in one consistent view
    pub fn snapshot(&self) -> LedgerSnapshot {
        let state = self.lock();
        let accounts = state
            .accounts
            .values()
            .map(|account| {
                (
                    account.id.clone(),
                    AccountRecord {
                        balance: account.balance,
                        credential_hash: account.credential.clone(),
                    },
                )
            })
            .collect();
        LedgerSnapshot {
            accounts,
            transactions: state.transactions.clone(),
        }
    }

    /// Replace accounts and log wholesale with a loaded snapshot
    pub fn restore(&self, snapshot: LedgerSnapshot) {
        let accounts = snapshot
            .accounts
            .into_iter()
            .map(|(id, record)| {
                (
                    id.clone(),
                    Account::new(id, record.balance, record.credential_hash),
                )
            })
            .collect();
        let mut state = self.lock();
        state.accounts = accounts;
        state.transactions = snapshot.transactions;
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Transfer service - validated, attributed balance transfers
//!
//! Orchestrates the transfer protocol on top of the store's atomic commit.
//! A transfer requires an active session whose identity owns the source
//! account. The session token is copied onto the record purely for
//! attribution; it carries no authorization weight.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::{SessionContext, Transaction};
use crate::store::LedgerStore;

/// Transfer service
pub struct TransferService {
    store: Arc<LedgerStore>,
}

impl TransferService {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// Execute a transfer from the session owner's account
    ///
    /// Fails with `NotAuthorized` when no session is active or the session
    /// identity is not `from`. After authorization, preconditions follow the
    /// store's fixed order: accounts exist, amount positive, funds
    /// sufficient. On success the committed record is returned; on any
    /// failure nothing is mutated and nothing is logged.
    pub fn transfer(
        &self,
        session: &SessionContext,
        from: &str,
        to: &str,
        amount: Decimal,
        attribution: Option<String>,
    ) -> Result<Transaction> {
        let current = session
            .current()
            .ok_or_else(|| Error::NotAuthorized("no active session".to_string()))?;
        if current.identity != from {
            return Err(Error::NotAuthorized(format!(
                "session does not own account {}",
                from
            )));
        }

        let token = attribution.or(Some(current.token));
        self.store
            .commit_transfer(Transaction::new(from, to, amount, token))
    }

    /// The ordered transaction log, read-only
    pub fn transactions(&self) -> Vec<Transaction> {
        self.store.transactions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Account, CredentialHash, Session};

    fn fixture() -> (TransferService, Arc<LedgerStore>, SessionContext) {
        let credential = CredentialHash::derive("1234").unwrap();
        let store = Arc::new(LedgerStore::with_accounts(vec![
            Account::new("alice", Decimal::new(100000, 2), credential.clone()),
            Account::new("bob", Decimal::new(50000, 2), credential),
        ]));
        let service = TransferService::new(Arc::clone(&store));
        (service, store, SessionContext::new())
    }

    fn login(session: &SessionContext, identity: &str) -> Session {
        let issued = Session::issue(identity);
        session.replace(issued.clone());
        issued
    }

    #[test]
    fn test_transfer_requires_session() {
        let (service, store, session) = fixture();
        let err = service
            .transfer(&session, "alice", "bob", Decimal::new(100, 2), None)
            .unwrap_err();
        assert!(matches!(err, Error::NotAuthorized(_)));
        assert_eq!(store.transaction_count(), 0);
        assert_eq!(store.balance("alice").unwrap(), Decimal::new(100000, 2));
    }

    #[test]
    fn test_transfer_requires_source_ownership() {
        let (service, store, session) = fixture();
        login(&session, "bob");
        let err = service
            .transfer(&session, "alice", "bob", Decimal::new(100, 2), None)
            .unwrap_err();
        assert!(matches!(err, Error::NotAuthorized(_)));
        assert_eq!(store.transaction_count(), 0);
    }

    #[test]
    fn test_successful_transfer_conserves_total() {
        let (service, store, session) = fixture();
        login(&session, "alice");

        let record = service
            .transfer(&session, "alice", "bob", Decimal::new(20000, 2), None)
            .unwrap();

        assert_eq!(record.from, "alice");
        assert_eq!(record.to, "bob");
        assert_eq!(store.balance("alice").unwrap(), Decimal::new(80000, 2));
        assert_eq!(store.balance("bob").unwrap(), Decimal::new(70000, 2));
        assert_eq!(store.total_balance(), Decimal::new(150000, 2));
        assert_eq!(service.transactions().len(), 1);
    }

    #[test]
    fn test_session_token_recorded_by_default() {
        let (service, _store, session) = fixture();
        let issued = login(&session, "alice");

        let record = service
            .transfer(&session, "alice", "bob", Decimal::new(100, 2), None)
            .unwrap();
        assert_eq!(record.token.as_deref(), Some(issued.token.as_str()));
    }

    #[test]
    fn test_explicit_attribution_wins_over_session_token() {
        let (service, _store, session) = fixture();
        login(&session, "alice");

        let record = service
            .transfer(
                &session,
                "alice",
                "bob",
                Decimal::new(100, 2),
                Some("batch-42".to_string()),
            )
            .unwrap();
        assert_eq!(record.token.as_deref(), Some("batch-42"));
    }

    #[test]
    fn test_invalid_amount_rejected() {
        let (service, store, session) = fixture();
        login(&session, "alice");

        let err = service
            .transfer(&session, "alice", "bob", Decimal::ZERO, None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAmount(_)));
        assert_eq!(store.transaction_count(), 0);
    }

    #[test]
    fn test_insufficient_funds_leaves_state_unchanged() {
        let (service, store, session) = fixture();
        login(&session, "alice");

        let err = service
            .transfer(&session, "alice", "bob", Decimal::new(1000000, 2), None)
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds { .. }));
        assert_eq!(store.balance("alice").unwrap(), Decimal::new(100000, 2));
        assert_eq!(store.balance("bob").unwrap(), Decimal::new(50000, 2));
        assert_eq!(store.transaction_count(), 0);
    }

    #[test]
    fn test_self_transfer_permitted_and_logged() {
        let (service, store, session) = fixture();
        login(&session, "alice");

        service
            .transfer(&session, "alice", "alice", Decimal::new(5000, 2), None)
            .unwrap();
        assert_eq!(store.balance("alice").unwrap(), Decimal::new(100000, 2));
        assert_eq!(store.transaction_count(), 1);
    }
}

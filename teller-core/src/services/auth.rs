//! Authentication service
//!
//! Validates a presented PIN against the stored credential hash and installs
//! a fresh session on success. Two side-channel defenses:
//!
//! - an unknown account still pays for a hash verification against a
//!   pre-derived decoy, so account existence does not show up in timing;
//! - both outcomes are padded to the same fixed latency floor with a literal
//!   sleep, so success and failure are indistinguishable by duration.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::DEFAULT_AUTH_DELAY_MS;
use crate::domain::result::{Error, Result};
use crate::domain::{CredentialHash, Session, SessionContext};
use crate::store::LedgerStore;

/// PIN the decoy hash is derived from; its only job is costing the same as
/// a real verification
const DECOY_PIN: &str = "decoy";

/// Authentication service
pub struct AuthService {
    store: Arc<LedgerStore>,
    latency_floor: Duration,
    decoy: CredentialHash,
}

impl AuthService {
    pub fn new(store: Arc<LedgerStore>) -> Result<Self> {
        Ok(Self {
            store,
            latency_floor: Duration::from_millis(DEFAULT_AUTH_DELAY_MS),
            decoy: CredentialHash::derive(DECOY_PIN)?,
        })
    }

    /// Override the latency floor (settings, tests)
    pub fn with_latency_floor(mut self, floor: Duration) -> Self {
        self.latency_floor = floor;
        self
    }

    /// Authenticate an identifier/PIN pair
    ///
    /// On success a new session replaces whatever the context held; on
    /// failure the context is left untouched. Wrong PIN and unknown account
    /// both return `AuthFailure`.
    pub fn authenticate(
        &self,
        session: &SessionContext,
        id: &str,
        pin: &str,
    ) -> Result<Session> {
        let started = Instant::now();

        let verified = match self.store.account(id) {
            Some(account) => account.credential.verify(pin),
            None => {
                // Equivalent-cost comparison for a nonexistent account
                let _ = self.decoy.verify(pin);
                false
            }
        };

        self.pad_to_floor(started);

        if !verified {
            return Err(Error::AuthFailure);
        }

        let issued = Session::issue(id);
        session.replace(issued.clone());
        Ok(issued)
    }

    /// Sleep out the remainder of the latency floor
    fn pad_to_floor(&self, started: Instant) {
        if let Some(remaining) = self.latency_floor.checked_sub(started.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Account;
    use rust_decimal::Decimal;

    fn service() -> (AuthService, SessionContext) {
        let credential = CredentialHash::derive("1234").unwrap();
        let store = Arc::new(LedgerStore::with_accounts(vec![Account::new(
            "alice",
            Decimal::new(100000, 2),
            credential,
        )]));
        let auth = AuthService::new(store)
            .unwrap()
            .with_latency_floor(Duration::ZERO);
        (auth, SessionContext::new())
    }

    #[test]
    fn test_successful_login_installs_session() {
        let (auth, session) = service();
        let issued = auth.authenticate(&session, "alice", "1234").unwrap();
        assert_eq!(issued.identity, "alice");
        assert_eq!(session.current().unwrap().token, issued.token);
    }

    #[test]
    fn test_wrong_pin_and_unknown_account_are_indistinguishable() {
        let (auth, session) = service();
        let wrong_pin = auth.authenticate(&session, "alice", "0000").unwrap_err();
        let unknown = auth.authenticate(&session, "mallory", "0000").unwrap_err();
        assert_eq!(wrong_pin.to_string(), unknown.to_string());
        assert!(matches!(wrong_pin, Error::AuthFailure));
        assert!(matches!(unknown, Error::AuthFailure));
    }

    #[test]
    fn test_failure_leaves_session_untouched() {
        let (auth, session) = service();
        auth.authenticate(&session, "alice", "1234").unwrap();
        let before = session.current().unwrap();

        let _ = auth.authenticate(&session, "alice", "9999").unwrap_err();
        assert_eq!(session.current().unwrap(), before);
    }

    #[test]
    fn test_relogin_replaces_session() {
        let (auth, session) = service();
        let first = auth.authenticate(&session, "alice", "1234").unwrap();
        let second = auth.authenticate(&session, "alice", "1234").unwrap();
        assert_ne!(first.token, second.token);
        assert_eq!(session.current().unwrap().token, second.token);
    }

    #[test]
    fn test_latency_floor_applies_to_both_outcomes() {
        let (auth, session) = service();
        let auth = auth.with_latency_floor(Duration::from_millis(50));

        let started = Instant::now();
        auth.authenticate(&session, "alice", "1234").unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));

        let started = Instant::now();
        let _ = auth.authenticate(&session, "mallory", "1234").unwrap_err();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}

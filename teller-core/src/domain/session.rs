//! Session domain model
//!
//! A session is the ephemeral record of a successful authentication. At most
//! one is active per context; it is never persisted.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::Rng;

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Account identifier the session authenticates as
    pub identity: String,
    /// Opaque random token, display/attribution only
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    /// Issue a fresh session for an identity with a random token
    pub fn issue(identity: impl Into<String>) -> Self {
        let raw: [u8; 16] = rand::thread_rng().gen();
        Self {
            identity: identity.into(),
            token: hex::encode(raw),
            issued_at: Utc::now(),
        }
    }
}

/// Single-slot holder for the active session
///
/// An explicit value owned by the context and threaded through calls, never
/// a process-wide static. A multi-client embedding holds one per connection.
#[derive(Debug, Default)]
pub struct SessionContext {
    current: Mutex<Option<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active session, if any
    pub fn current(&self) -> Option<Session> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Install a session, replacing any prior one
    pub fn replace(&self, session: Session) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(session);
    }

    /// Invalidate the active session (logout)
    pub fn clear(&self) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

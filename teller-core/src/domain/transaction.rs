//! Transaction domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single committed transfer in the audit log
///
/// Immutable once appended. Insertion order is the canonical audit order.
/// The token is an optional attribution hint copied from the caller's
/// session; it carries no authorization weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: String,
    pub to: String,
    pub amount: Decimal,
    /// Wall-clock time at commit, ISO-8601 in the persisted form
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Transaction {
    /// Create a new record stamped with the current wall-clock time
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        amount: Decimal,
        token: Option<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
            timestamp: Utc::now(),
            token,
        }
    }

    /// True if source and destination are the same account
    pub fn is_self_transfer(&self) -> bool {
        self.from == self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_omitted_when_absent() {
        let tx = Transaction::new("alice", "bob", Decimal::new(20000, 2), None);
        let json = serde_json::to_string(&tx).unwrap();
        assert!(!json.contains("token"));

        let tx = Transaction::new("alice", "bob", Decimal::new(20000, 2), Some("abcd".into()));
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"token\":\"abcd\""));
    }

    #[test]
    fn test_self_transfer_detection() {
        let tx = Transaction::new("alice", "alice", Decimal::ONE, None);
        assert!(tx.is_self_transfer());
    }
}

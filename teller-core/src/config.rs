//! Configuration management
//!
//! Settings live in `settings.json` inside the teller directory:
//! ```json
//! {
//!   "app": { "authDelayMs": 100 },
//!   "seedAccounts": [ { "id": "alice", "balance": "1000.00", "pin": "1234" } ]
//! }
//! ```
//! A missing file yields the built-in defaults. Seed accounts are design-time
//! configuration, not a secret policy: the PINs here are hashed the moment
//! the store is seeded and never kept in memory beyond that.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::result::Result;

/// Default latency floor for authentication, in milliseconds
pub const DEFAULT_AUTH_DELAY_MS: u64 = 100;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    seed_accounts: Vec<SeedAccount>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    auth_delay_ms: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// A design-time account seed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedAccount {
    pub id: String,
    pub balance: Decimal,
    pub pin: String,
}

impl SeedAccount {
    fn new(id: &str, balance: Decimal, pin: &str) -> Self {
        Self {
            id: id.to_string(),
            balance,
            pin: pin.to_string(),
        }
    }
}

/// Teller configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Fixed minimum latency for both authentication outcomes
    pub auth_delay_ms: u64,
    pub seed_accounts: Vec<SeedAccount>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_delay_ms: DEFAULT_AUTH_DELAY_MS,
            seed_accounts: Self::default_seeds(),
        }
    }
}

impl Config {
    /// Load config from the teller directory
    ///
    /// The auth delay can be overridden via the TELLER_AUTH_DELAY_MS
    /// environment variable (for CI/testing).
    pub fn load(teller_dir: &Path) -> Result<Self> {
        let settings_path = teller_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let auth_delay_ms = std::env::var("TELLER_AUTH_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(raw.app.auth_delay_ms)
            .unwrap_or(DEFAULT_AUTH_DELAY_MS);

        let seed_accounts = if raw.seed_accounts.is_empty() {
            Self::default_seeds()
        } else {
            raw.seed_accounts
        };

        Ok(Self {
            auth_delay_ms,
            seed_accounts,
        })
    }

    /// Built-in seed accounts
    fn default_seeds() -> Vec<SeedAccount> {
        vec![
            SeedAccount::new("alice", Decimal::new(100000, 2), "1234"),
            SeedAccount::new("bob", Decimal::new(50000, 2), "5678"),
            SeedAccount::new("charlie", Decimal::new(200000, 2), "9999"),
            SeedAccount::new("admin", Decimal::new(100000000, 2), "0000"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_settings_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.auth_delay_ms, DEFAULT_AUTH_DELAY_MS);
        assert_eq!(config.seed_accounts.len(), 4);
        assert_eq!(config.seed_accounts[0].id, "alice");
        assert_eq!(config.seed_accounts[0].balance, Decimal::new(100000, 2));
    }

    #[test]
    fn test_settings_file_overrides_seeds() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{
              "app": { "authDelayMs": 5 },
              "seedAccounts": [ { "id": "dana", "balance": "42.50", "pin": "1111" } ]
            }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.auth_delay_ms, 5);
        assert_eq!(config.seed_accounts.len(), 1);
        assert_eq!(config.seed_accounts[0].id, "dana");
        assert_eq!(config.seed_accounts[0].balance, Decimal::new(4250, 2));
    }

    #[test]
    fn test_unparseable_settings_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.seed_accounts.len(), 4);
    }
}

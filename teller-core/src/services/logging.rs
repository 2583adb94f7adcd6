//! Logging service - structured event logging to JSON lines
//!
//! Provides a privacy-safe operational log stored as one JSON object per
//! line in `logs/events.jsonl` under the teller directory. No secrets
//! (PINs, session tokens) and no monetary amounts are ever logged; events
//! carry at most an account identifier and an error message.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;

/// Counter for generating unique IDs within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique ID based on timestamp + counter
fn generate_id() -> u64 {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    // Lower 48 bits of timestamp, upper 16 bits of counter
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    (timestamp << 16) | counter
}

/// Current unix timestamp in milliseconds
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Detect the current platform
fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// A log event to be recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl LogEvent {
    /// Create a new log event with just an event name
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            account: None,
            command: None,
            error_message: None,
        }
    }

    /// Set the account context
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Set the command context (for CLI events)
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set error information
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

/// A log entry as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub account: Option<String>,
    pub command: Option<String>,
    pub error_message: Option<String>,
}

/// Service for structured event logging
pub struct LoggingService {
    path: PathBuf,
    app_version: String,
    platform: &'static str,
}

impl LoggingService {
    /// Create the service, ensuring the logs directory exists
    pub fn new(teller_dir: &Path, app_version: &str) -> Result<Self> {
        let logs_dir = teller_dir.join("logs");
        fs::create_dir_all(&logs_dir)?;
        Ok(Self {
            path: logs_dir.join("events.jsonl"),
            app_version: app_version.to_string(),
            platform: detect_platform(),
        })
    }

    /// Append an event to the log file
    pub fn log(&self, event: LogEvent) -> Result<()> {
        let entry = LogEntry {
            id: generate_id(),
            timestamp: now_ms(),
            app_version: self.app_version.clone(),
            platform: self.platform.to_string(),
            event: event.event,
            account: event.account,
            command: event.command,
            error_message: event.error_message,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(&entry)?)?;
        Ok(())
    }

    /// Path of the log file (for doctor-style inspection)
    pub fn log_path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_appends_one_line_per_event() {
        let dir = TempDir::new().unwrap();
        let service = LoggingService::new(dir.path(), "0.1.0").unwrap();

        service
            .log(LogEvent::new("login_success").with_account("alice"))
            .unwrap();
        service
            .log(
                LogEvent::new("transfer_failed")
                    .with_command("transfer")
                    .with_error("Insufficient funds in alice"),
            )
            .unwrap();

        let content = fs::read_to_string(service.log_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: LogEntry = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.event, "login_success");
        assert_eq!(first.account.as_deref(), Some("alice"));

        let second: LogEntry = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.command.as_deref(), Some("transfer"));
        assert!(second.error_message.is_some());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
    }
}

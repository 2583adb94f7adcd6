//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies beyond hashing.

mod account;
mod credential;
mod session;
mod snapshot;
mod transaction;
pub mod result;

pub use account::Account;
pub use credential::CredentialHash;
pub use session::{Session, SessionContext};
pub use snapshot::{AccountRecord, LedgerSnapshot};
pub use transaction::Transaction;

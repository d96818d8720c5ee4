pub(crate) mod db;
pub mod gate;
pub mod index;
pub mod record;

pub use gate::{InitGate, InitPhase};
pub use index::{IdentityLedger, LedgerEntry};
pub use record::IdentityRecord;

/// Failures raised by the identity ledger. Cloneable so a failed
/// initialization can be handed to every caller that waited on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Store not available")]
    Unavailable,
    #[error("Open: {0}")]
    Open(String),
    #[error("Transaction: {0}")]
    Transaction(String),
    #[error("Cursor: {0}")]
    Cursor(String),
    #[error("Serialize: {0}")]
    Serialization(String),
    #[error("Task: {0}")]
    Task(String),
}

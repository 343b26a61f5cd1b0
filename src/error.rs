// Ledger errors - every failure the core can report to the presentation layer
//
// None of these are fatal: the coordinator returns them, the UI shows them.

use crate::friend::FriendId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Input rejected before any state was touched
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// Split attempted while no friend is selected
    #[error("Select a friend before splitting a bill")]
    NoSelection,

    /// Balance update targeted an id the registry never issued
    #[error("Friend not found: {0}")]
    NotFound(FriendId),
}

impl LedgerError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        LedgerError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

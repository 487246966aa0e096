//! Domain error types

use thiserror::Error;

/// Validation failures detected before a vote reaches the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Identifier is not a decimal number
    #[error("{field} field must be a number, got {value:?}")]
    InvalidIdentifier {
        /// Name of the offending input
        field: String,
        /// The rejected text
        value: String,
    },

    /// Direction is neither "positive" nor "negative"
    #[error("invalid vote type: {0:?}")]
    InvalidDirection(String),

    /// Voter and target are the same user
    #[error("cant vote for yourself")]
    SelfVote,
}

//! Vote header decoding.
//!
//! The `vote` header carries standard base64 of `"<voter_id>;<direction>"`,
//! for example `base64("7;positive")`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use credibility_domain::{Direction, DomainError, UserId};
use thiserror::Error;

/// Why a vote header could not be decoded
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Not valid base64
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes are not UTF-8
    #[error("decoded vote is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Not exactly `voter;direction`
    #[error("invalid vote header: expected 2 fields, found {0}")]
    FieldCount(usize),

    /// Voter ID or direction rejected
    #[error(transparent)]
    Field(#[from] DomainError),
}

/// A decoded vote header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotePayload {
    /// Who is voting
    pub voter: UserId,
    /// Which way
    pub direction: Direction,
}

/// Decode the `vote` header value
pub fn decode_vote(encoded: &str) -> Result<VotePayload, PayloadError> {
    let raw = String::from_utf8(STANDARD.decode(encoded)?)?;

    let fields: Vec<&str> = raw.split(';').collect();
    let [voter, direction] = fields.as_slice() else {
        return Err(PayloadError::FieldCount(fields.len()));
    };

    Ok(VotePayload {
        voter: UserId::parse(voter, "user_id encoded")?,
        direction: Direction::parse(direction)?,
    })
}

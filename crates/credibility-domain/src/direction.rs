//! Direction module - which way a vote points

use crate::DomainError;
use std::fmt;
use std::str::FromStr;

/// Direction of a credibility vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Vouches for the target
    Positive,

    /// Vouches against the target
    Negative,
}

impl Direction {
    /// Both directions, positive first
    pub const ALL: [Direction; 2] = [Direction::Positive, Direction::Negative];

    /// Wire and column name ("positive" / "negative")
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Positive => "positive",
            Direction::Negative => "negative",
        }
    }

    /// Capitalized label reported back to viewers ("Positive" / "Negative")
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Positive => "Positive",
            Direction::Negative => "Negative",
        }
    }

    /// The other direction
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }

    /// Parse a direction from its wire name
    ///
    /// Matching is exact: "Positive" or " positive" are rejected.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "positive" => Ok(Direction::Positive),
            "negative" => Ok(Direction::Negative),
            other => Err(DomainError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

//! User identifier module - shared by voters and targets

use crate::DomainError;
use std::fmt;

/// Numeric identifier of a user
///
/// Voters and targets share this representation; only their role in a
/// [`VoteRequest`](crate::VoteRequest) tells them apart. Parsing accepts a
/// signed 64-bit decimal integer with an optional leading sign, and the
/// canonical form (no sign for positives, no leading zeros) is what gets
/// stored and compared.
///
/// Comparison is numeric, not textual: "05" and "5" are the same user, so
/// voter "09" on target "9" is a self-vote. Older deployments that compared
/// the raw header strings treated those as distinct users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Create a UserId from a raw value
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parse a UserId from its decimal string form
    ///
    /// `field` names the input in the returned error.
    ///
    /// # Examples
    ///
    /// ```
    /// use credibility_domain::UserId;
    ///
    /// let id = UserId::parse("2017", "target_id").unwrap();
    /// assert_eq!(id.value(), 2017);
    /// assert!(UserId::parse("abc", "target_id").is_err());
    /// ```
    pub fn parse(s: &str, field: &str) -> Result<Self, DomainError> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidIdentifier {
                field: field.to_string(),
                value: s.to_string(),
            })
    }

    /// Get the raw value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_signed_decimal() {
        assert_eq!(UserId::parse("42", "id").unwrap(), UserId::new(42));
        assert_eq!(UserId::parse("+42", "id").unwrap(), UserId::new(42));
        assert_eq!(UserId::parse("-3", "id").unwrap(), UserId::new(-3));
        assert_eq!(UserId::parse("007", "id").unwrap(), UserId::new(7));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for bad in ["", " 1", "1.5", "abc", "12a", "99999999999999999999"] {
            let err = UserId::parse(bad, "target_id").unwrap_err();
            assert_eq!(
                err,
                DomainError::InvalidIdentifier {
                    field: "target_id".to_string(),
                    value: bad.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_leading_zeros_name_the_same_user() {
        assert_eq!(UserId::parse("05", "id").unwrap(), UserId::parse("5", "id").unwrap());
        assert_eq!(UserId::parse("09", "id").unwrap(), UserId::parse("9", "id").unwrap());
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(UserId::parse("+0012", "id").unwrap().to_string(), "12");
    }
}

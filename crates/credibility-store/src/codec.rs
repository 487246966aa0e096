//! Column encoding for voter lists
//!
//! Lists are stored as semicolon-joined decimal IDs. The empty string is the
//! empty list. This is the only place that knows about the joined format.

use crate::StoreError;
use credibility_domain::{UserId, VoterList};

const SEPARATOR: char = ';';

/// Join a voter list into its column form
pub fn join_voters(voters: &VoterList) -> String {
    voters
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

/// Split a column back into a voter list
///
/// Any entry that is not a decimal ID makes the whole column invalid.
pub fn split_voters(column: &str) -> Result<VoterList, StoreError> {
    if column.is_empty() {
        return Ok(VoterList::new());
    }

    column
        .split(SEPARATOR)
        .map(|entry| {
            UserId::parse(entry, "voter").map_err(|_| {
                StoreError::InvalidData(format!("Bad voter entry {:?} in list {:?}", entry, column))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(ids: &[i64]) -> VoterList {
        ids.iter().copied().map(UserId::new).collect()
    }

    #[test]
    fn test_empty_column_is_empty_list() {
        assert!(split_voters("").unwrap().is_empty());
        assert_eq!(join_voters(&VoterList::new()), "");
    }

    #[test]
    fn test_join_keeps_order() {
        assert_eq!(join_voters(&list(&[12, 3, 456])), "12;3;456");
    }

    #[test]
    fn test_split_keeps_order() {
        assert_eq!(split_voters("12;3;456").unwrap(), list(&[12, 3, 456]));
    }

    #[test]
    fn test_split_rejects_corrupt_entries() {
        assert!(matches!(split_voters("1;;2"), Err(StoreError::InvalidData(_))));
        assert!(matches!(split_voters("1;x"), Err(StoreError::InvalidData(_))));
        assert!(matches!(split_voters(";"), Err(StoreError::InvalidData(_))));
    }
}

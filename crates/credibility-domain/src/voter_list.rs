//! Voter list module - ordered, duplicate-free sequence of voters

use crate::UserId;

/// Ordered sequence of voters for one direction on one target
///
/// Insertion order is preserved and a voter appears at most once.
/// Removing a voter keeps the relative order of the remaining entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoterList(Vec<UserId>);

impl VoterList {
    /// Create an empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Index of `voter` in the list, if present
    pub fn position(&self, voter: UserId) -> Option<usize> {
        self.0.iter().position(|v| *v == voter)
    }

    /// Whether `voter` is in the list
    pub fn contains(&self, voter: UserId) -> bool {
        self.position(voter).is_some()
    }

    /// Append `voter` at the end
    ///
    /// Returns false and leaves the list untouched if already present.
    pub fn push(&mut self, voter: UserId) -> bool {
        if self.contains(voter) {
            return false;
        }
        self.0.push(voter);
        true
    }

    /// Remove `voter`, returning whether it was present
    pub fn remove(&mut self, voter: UserId) -> bool {
        match self.position(voter) {
            Some(idx) => {
                self.0.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Number of voters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no voters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate voters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter()
    }
}

/// Collecting drops repeated voters, keeping the first occurrence.
impl FromIterator<UserId> for VoterList {
    fn from_iter<I: IntoIterator<Item = UserId>>(iter: I) -> Self {
        let mut list = VoterList::new();
        for voter in iter {
            list.push(voter);
        }
        list
    }
}

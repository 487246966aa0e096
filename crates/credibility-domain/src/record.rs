//! Credibility record module - per-target voter state

use crate::{Direction, UserId, VoterList};

/// Positive and negative voters for one target
///
/// A voter appears in at most one of the two lists. The engine is the only
/// code path that mutates a record, and it preserves this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredibilityRecord {
    /// The user being rated
    pub target: UserId,

    /// Voters vouching for the target
    pub positive: VoterList,

    /// Voters vouching against the target
    pub negative: VoterList,
}

impl CredibilityRecord {
    /// Record for a target nobody has voted on yet
    pub fn empty(target: UserId) -> Self {
        Self {
            target,
            positive: VoterList::new(),
            negative: VoterList::new(),
        }
    }

    /// The voter list for `direction`
    pub fn voters(&self, direction: Direction) -> &VoterList {
        match direction {
            Direction::Positive => &self.positive,
            Direction::Negative => &self.negative,
        }
    }

    pub(crate) fn voters_mut(&mut self, direction: Direction) -> &mut VoterList {
        match direction {
            Direction::Positive => &mut self.positive,
            Direction::Negative => &mut self.negative,
        }
    }

    /// The direction `voter` previously voted, if any
    ///
    /// Positive is checked first, so a record that somehow lists the voter
    /// twice reports Positive.
    pub fn stance_of(&self, voter: UserId) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| self.voters(*d).contains(voter))
    }
}

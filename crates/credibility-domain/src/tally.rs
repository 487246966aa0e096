//! Tally projection - read-only summary of a target's record

use crate::{CredibilityRecord, Direction, UserId};

/// Vote counts for a target, plus the viewer's own vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    /// Number of positive votes
    pub positives: usize,

    /// Number of negative votes
    pub negatives: usize,

    /// How the viewer voted, if they did
    pub voted: Option<Direction>,
}

/// Summarize `record` as seen by `viewer`
///
/// An absent record tallies as zero votes either way.
pub fn tally(record: Option<&CredibilityRecord>, viewer: Option<UserId>) -> Tally {
    let Some(record) = record else {
        return Tally::default();
    };

    Tally {
        positives: record.positive.len(),
        negatives: record.negative.len(),
        voted: viewer.and_then(|v| record.stance_of(v)),
    }
}

//! Vote transition engine
//!
//! Pure decision logic: given a target's current record and a vote request,
//! compute the next record. One vote per (voter, target) pair; a vote may be
//! switched to the other direction but never duplicated.

use crate::{CredibilityRecord, Direction, DomainError, UserId};

/// A validated request to vote on a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteRequest {
    voter: UserId,
    target: UserId,
    direction: Direction,
}

impl VoteRequest {
    /// Build a request, rejecting self-votes
    pub fn new(voter: UserId, target: UserId, direction: Direction) -> Result<Self, DomainError> {
        if voter == target {
            return Err(DomainError::SelfVote);
        }
        Ok(Self {
            voter,
            target,
            direction,
        })
    }

    /// The user casting the vote
    pub fn voter(&self) -> UserId {
        self.voter
    }

    /// The user being rated
    pub fn target(&self) -> UserId {
        self.target
    }

    /// Requested direction
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// What a vote did to the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The vote was added or switched
    Recorded,

    /// The voter already holds this vote; nothing changed
    AlreadyVoted,
}

/// Result of applying a vote to a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Record after the vote
    pub record: CredibilityRecord,

    /// What happened
    pub outcome: VoteOutcome,

    /// True when no record existed before this vote
    pub created: bool,

    /// Direction of the vote that was applied
    pub direction: Direction,

    /// The list the voter was moved out of, for switched votes
    pub switched_from: Option<Direction>,
}

impl Transition {
    /// Lists whose contents differ from the previous record
    ///
    /// The list the voter left comes first, so persisting in this order never
    /// shows the voter on both sides.
    pub fn changed_lists(&self) -> Vec<Direction> {
        if self.outcome == VoteOutcome::AlreadyVoted {
            return Vec::new();
        }
        self.switched_from
            .into_iter()
            .chain(std::iter::once(self.direction))
            .collect()
    }
}

/// Apply `request` to the target's current record
///
/// `current` is `None` when nobody has voted on the target yet, which is
/// the same as a record with two empty lists.
///
/// # Examples
///
/// ```
/// use credibility_domain::{apply, Direction, UserId, VoteOutcome, VoteRequest};
///
/// let request = VoteRequest::new(UserId::new(5), UserId::new(9), Direction::Positive).unwrap();
/// let first = apply(None, &request);
/// assert_eq!(first.outcome, VoteOutcome::Recorded);
///
/// let second = apply(Some(&first.record), &request);
/// assert_eq!(second.outcome, VoteOutcome::AlreadyVoted);
/// ```
pub fn apply(current: Option<&CredibilityRecord>, request: &VoteRequest) -> Transition {
    let created = current.is_none();
    let mut record = current
        .cloned()
        .unwrap_or_else(|| CredibilityRecord::empty(request.target()));

    let wanted = request.direction();
    let voter = request.voter();

    if record.voters(wanted).contains(voter) {
        return Transition {
            record,
            outcome: VoteOutcome::AlreadyVoted,
            created,
            direction: wanted,
            switched_from: None,
        };
    }

    let other = wanted.opposite();
    let switched_from = record.voters_mut(other).remove(voter).then_some(other);
    record.voters_mut(wanted).push(voter);

    Transition {
        record,
        outcome: VoteOutcome::Recorded,
        created,
        direction: wanted,
        switched_from,
    }
}

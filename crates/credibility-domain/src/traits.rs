//! Trait definitions for external interactions
//!
//! These traits define the boundary between vote logic and persistence.
//! Implementations live in other crates (credibility-store).

use crate::{apply, CredibilityRecord, Direction, UserId, VoteOutcome, VoteRequest, VoterList};

/// Per-target voter-list persistence
pub trait VoteStore {
    /// Error type for store operations
    type Error;

    /// Fetch the record for `target`, or `None` if nobody voted on it yet
    fn fetch_lists(&self, target: UserId) -> Result<Option<CredibilityRecord>, Self::Error>;

    /// Replace the whole `direction` list of an existing record
    fn overwrite_list(
        &mut self,
        target: UserId,
        direction: Direction,
        voters: &VoterList,
    ) -> Result<(), Self::Error>;

    /// Create the record for `target` holding a single vote
    fn create_row(
        &mut self,
        target: UserId,
        voter: UserId,
        direction: Direction,
    ) -> Result<(), Self::Error>;
}

/// Fetch, apply and persist one vote against `store`
///
/// Callers wanting the switch to land atomically pass a store that is
/// scoped to a single transaction.
pub fn cast_vote<S: VoteStore + ?Sized>(
    store: &mut S,
    request: &VoteRequest,
) -> Result<VoteOutcome, S::Error> {
    let current = store.fetch_lists(request.target())?;
    let transition = apply(current.as_ref(), request);

    if transition.outcome == VoteOutcome::AlreadyVoted {
        return Ok(VoteOutcome::AlreadyVoted);
    }

    if transition.created {
        store.create_row(request.target(), request.voter(), request.direction())?;
    } else {
        for direction in transition.changed_lists() {
            store.overwrite_list(
                request.target(),
                direction,
                transition.record.voters(direction),
            )?;
        }
    }

    Ok(transition.outcome)
}

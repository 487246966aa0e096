//! Integration tests for credibility-store
//!
//! These tests drive full vote cycles through SQLite and read the rows back.

use credibility_domain::traits::VoteStore;
use credibility_domain::{tally, Direction, UserId, VoteOutcome, VoteRequest, VoterList};
use credibility_store::SqliteStore;

fn vote(voter: i64, target: i64, direction: Direction) -> VoteRequest {
    VoteRequest::new(UserId::new(voter), UserId::new(target), direction).unwrap()
}

fn list(ids: &[i64]) -> VoterList {
    ids.iter().copied().map(UserId::new).collect()
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_absent_target_reads_as_none() {
    let store = SqliteStore::new(":memory:").unwrap();
    assert_eq!(store.fetch_record(UserId::new(9)).unwrap(), None);
}

#[test]
fn test_first_vote_creates_row() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let outcome = store.cast_vote(&vote(5, 9, Direction::Positive)).unwrap();
    assert_eq!(outcome, VoteOutcome::Recorded);

    let record = store.fetch_record(UserId::new(9)).unwrap().unwrap();
    assert_eq!(record.positive, list(&[5]));
    assert!(record.negative.is_empty());

    let summary = tally(Some(&record), Some(UserId::new(5)));
    assert_eq!((summary.positives, summary.negatives), (1, 0));
    assert_eq!(summary.voted, Some(Direction::Positive));
}

#[test]
fn test_repeat_vote_is_noop() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    store.cast_vote(&vote(5, 9, Direction::Positive)).unwrap();
    let outcome = store.cast_vote(&vote(5, 9, Direction::Positive)).unwrap();

    assert_eq!(outcome, VoteOutcome::AlreadyVoted);
    let record = store.fetch_record(UserId::new(9)).unwrap().unwrap();
    assert_eq!(record.positive, list(&[5]));
}

#[test]
fn test_switch_moves_voter() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    store.cast_vote(&vote(5, 9, Direction::Positive)).unwrap();
    store.cast_vote(&vote(6, 9, Direction::Positive)).unwrap();
    let outcome = store.cast_vote(&vote(5, 9, Direction::Negative)).unwrap();

    assert_eq!(outcome, VoteOutcome::Recorded);
    let record = store.fetch_record(UserId::new(9)).unwrap().unwrap();
    assert_eq!(record.positive, list(&[6]));
    assert_eq!(record.negative, list(&[5]));
}

#[test]
fn test_targets_are_independent() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    store.cast_vote(&vote(1, 10, Direction::Positive)).unwrap();
    store.cast_vote(&vote(1, 20, Direction::Negative)).unwrap();

    let first = store.fetch_record(UserId::new(10)).unwrap().unwrap();
    let second = store.fetch_record(UserId::new(20)).unwrap().unwrap();
    assert_eq!(first.positive, list(&[1]));
    assert!(first.negative.is_empty());
    assert!(second.positive.is_empty());
    assert_eq!(second.negative, list(&[1]));
}

#[test]
fn test_collaborator_operations() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let target = UserId::new(77);

    store
        .create_row(target, UserId::new(3), Direction::Negative)
        .unwrap();
    store
        .overwrite_list(target, Direction::Positive, &list(&[8, 2]))
        .unwrap();

    let record = store.fetch_lists(target).unwrap().unwrap();
    assert_eq!(record.positive, list(&[8, 2]));
    assert_eq!(record.negative, list(&[3]));
}

#[test]
fn test_votes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credibility.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.cast_vote(&vote(5, 9, Direction::Negative)).unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    let record = store.fetch_record(UserId::new(9)).unwrap().unwrap();
    assert_eq!(record.negative, list(&[5]));
}

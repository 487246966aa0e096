//! Credibility Storage Layer
//!
//! Implements the VoteStore trait on SQLite.
//!
//! # Architecture
//!
//! - One `credibility` row per rated user, created on the first vote
//! - Voter lists stored as semicolon-joined text (see [`codec`])
//! - Each vote's read-modify-write runs in one `IMMEDIATE` transaction
//!
//! # Examples
//!
//! ```no_run
//! use credibility_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for votes
//! ```

#![warn(missing_docs)]

pub mod codec;

use codec::{join_voters, split_voters};
use credibility_domain::traits::{cast_vote, VoteStore};
use credibility_domain::{CredibilityRecord, Direction, UserId, VoteOutcome, VoteRequest, VoterList};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Row expected to exist is missing
    #[error("No credibility row for target {0}")]
    NotFound(UserId),

    /// Stored data could not be decoded
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of VoteStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a SqliteStore across
/// tasks behind a mutex.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Cast one vote as a single unit of work
    ///
    /// The fetch, the engine decision and every list write share one
    /// transaction, so a switched vote either fully lands or not at all and
    /// concurrent writers cannot interleave.
    pub fn cast_vote(&mut self, request: &VoteRequest) -> Result<VoteOutcome, StoreError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let outcome = cast_vote(&mut Scoped { conn: &tx }, request)?;

        tx.commit()?;
        debug!(
            voter = %request.voter(),
            target = %request.target(),
            direction = %request.direction(),
            ?outcome,
            "Vote committed"
        );
        Ok(outcome)
    }

    /// Fetch the record for `target`
    pub fn fetch_record(&self, target: UserId) -> Result<Option<CredibilityRecord>, StoreError> {
        fetch(&self.conn, target)
    }

    /// Check the database answers a trivial query
    pub fn ping(&self) -> Result<(), StoreError> {
        self.conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }
}

impl VoteStore for SqliteStore {
    type Error = StoreError;

    fn fetch_lists(&self, target: UserId) -> Result<Option<CredibilityRecord>, Self::Error> {
        fetch(&self.conn, target)
    }

    fn overwrite_list(
        &mut self,
        target: UserId,
        direction: Direction,
        voters: &VoterList,
    ) -> Result<(), Self::Error> {
        overwrite(&self.conn, target, direction, voters)
    }

    fn create_row(
        &mut self,
        target: UserId,
        voter: UserId,
        direction: Direction,
    ) -> Result<(), Self::Error> {
        create(&self.conn, target, voter, direction)
    }
}

/// VoteStore view over a connection already inside a transaction
struct Scoped<'a> {
    conn: &'a Connection,
}

impl VoteStore for Scoped<'_> {
    type Error = StoreError;

    fn fetch_lists(&self, target: UserId) -> Result<Option<CredibilityRecord>, Self::Error> {
        fetch(self.conn, target)
    }

    fn overwrite_list(
        &mut self,
        target: UserId,
        direction: Direction,
        voters: &VoterList,
    ) -> Result<(), Self::Error> {
        overwrite(self.conn, target, direction, voters)
    }

    fn create_row(
        &mut self,
        target: UserId,
        voter: UserId,
        direction: Direction,
    ) -> Result<(), Self::Error> {
        create(self.conn, target, voter, direction)
    }
}

fn fetch(conn: &Connection, target: UserId) -> Result<Option<CredibilityRecord>, StoreError> {
    debug!(target = %target, "Fetching credibility row");

    let row = conn
        .query_row(
            "SELECT positive, negative FROM credibility WHERE torn_id = ?1",
            params![target.value()],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()?;

    match row {
        Some((positive, negative)) => Ok(Some(CredibilityRecord {
            target,
            positive: split_voters(&positive)?,
            negative: split_voters(&negative)?,
        })),
        None => Ok(None),
    }
}

fn overwrite(
    conn: &Connection,
    target: UserId,
    direction: Direction,
    voters: &VoterList,
) -> Result<(), StoreError> {
    // Column name comes from the closed Direction enum, never from input.
    let sql = format!(
        "UPDATE credibility SET {} = ?1 WHERE torn_id = ?2",
        direction.as_str()
    );
    let joined = join_voters(voters);
    debug!(target = %target, %direction, voters = %joined, "Overwriting voter list");

    let changed = conn.execute(&sql, params![joined, target.value()])?;
    if changed == 0 {
        return Err(StoreError::NotFound(target));
    }
    Ok(())
}

fn create(
    conn: &Connection,
    target: UserId,
    voter: UserId,
    direction: Direction,
) -> Result<(), StoreError> {
    let voter = voter.to_string();
    let (positive, negative) = match direction {
        Direction::Positive => (voter.as_str(), ""),
        Direction::Negative => ("", voter.as_str()),
    };
    debug!(target = %target, %direction, voter = %voter, "Creating credibility row");

    conn.execute(
        "INSERT INTO credibility (torn_id, positive, negative) VALUES (?1, ?2, ?3)",
        params![target.value(), positive, negative],
    )?;
    Ok(())
}

//! Credibility Domain Layer
//!
//! This crate contains the vote-state logic for the credibility service.
//! It has no runtime dependencies beyond error derivation and defines the
//! value objects, the transition engine and the store trait that the other
//! crates build on.
//!
//! ## Key Concepts
//!
//! - **Target**: the user being rated
//! - **Voter**: the user casting a vote; one vote per (voter, target) pair
//! - **Direction**: positive or negative
//! - **Credibility record**: ordered positive and negative voter lists for a target
//! - **Tally**: counts plus the viewer's own vote
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Persistence lives behind [`traits::VoteStore`]
//! - Wire formats (HTTP headers, semicolon-joined columns) live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod direction;
pub mod engine;
pub mod error;
pub mod id;
pub mod record;
pub mod tally;
pub mod traits;
pub mod voter_list;

// Re-exports for convenience
pub use direction::Direction;
pub use engine::{apply, Transition, VoteOutcome, VoteRequest};
pub use error::DomainError;
pub use id::UserId;
pub use record::CredibilityRecord;
pub use tally::{tally, Tally};
pub use traits::{cast_vote, VoteStore};
pub use voter_list::VoterList;

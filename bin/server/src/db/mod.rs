//! Persistence boundary for the milestone board.
//!
//! This module provides data access for:
//! - Milestone records (list, fetch, create, update, delete)
//! - Administrator-privilege lookup by user ID
//!
//! The traits are the seam for the persistence collaborator; the
//! Postgres implementations live alongside them. The store is the single
//! source of truth and serializes conflicting writes itself (last-write-wins
//! is acceptable for this domain; no optimistic-concurrency token is kept).

pub mod milestone;
pub mod profile;

pub use milestone::{Milestone, PgMilestoneStore};
pub use profile::PgPrivilegeStore;

use async_trait::async_trait;
use milestone_board_core::{MilestoneId, UserId};
use std::fmt;

/// Error from an underlying store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    /// What the store reported.
    pub details: String,
}

impl StoreError {
    /// Creates a store error from any displayable cause.
    #[must_use]
    pub fn new(details: impl fmt::Display) -> Self {
        Self {
            details: details.to_string(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store operation failed: {}", self.details)
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::new(e)
    }
}

/// Store operations for milestone records.
#[async_trait]
pub trait MilestoneStore: Send + Sync {
    /// Lists all milestones, ordered by event date descending (newest event
    /// first), then by creation time descending as a tiebreak.
    async fn list(&self) -> Result<Vec<Milestone>, StoreError>;

    /// Fetches one milestone by ID.
    async fn find(&self, id: MilestoneId) -> Result<Option<Milestone>, StoreError>;

    /// Persists a new milestone record.
    async fn create(&self, milestone: &Milestone) -> Result<(), StoreError>;

    /// Replaces an existing record. Returns false if no record matched.
    async fn update(&self, milestone: &Milestone) -> Result<bool, StoreError>;

    /// Deletes a record. Returns false if no record matched.
    async fn delete(&self, id: MilestoneId) -> Result<bool, StoreError>;
}

/// Administrator-privilege lookup.
#[async_trait]
pub trait PrivilegeStore: Send + Sync {
    /// Returns true if the user currently holds administrator privilege.
    ///
    /// Absence of a privilege record means "not an administrator".
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, StoreError>;
}

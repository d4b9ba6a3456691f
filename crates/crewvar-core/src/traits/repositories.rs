//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the implementation. The concurrency rules of the lifecycle
//! live at this boundary: `create_pending` owns the one-active-request-
//! per-pair constraint and `mark_responded` is a compare-and-set that
//! only ever flips a pending row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{ConnectionRequest, ConnectionStatus, CrewProfile, OnboardingStatus};
use crate::error::DomainError;
use crate::value_objects::{PairKey, RequestId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by user id
    async fn find_by_id(&self, user_id: UserId) -> RepoResult<Option<CrewProfile>>;

    /// List profiles currently assigned to a ship
    async fn find_by_ship(&self, ship: &str) -> RepoResult<Vec<CrewProfile>>;

    /// Create a new profile
    async fn create(&self, profile: &CrewProfile) -> RepoResult<()>;

    /// Update an existing profile
    async fn update(&self, profile: &CrewProfile) -> RepoResult<()>;

    /// Stamp the last-seen timestamp
    async fn update_last_seen(&self, user_id: UserId, at: DateTime<Utc>) -> RepoResult<()>;
}

// ============================================================================
// Onboarding Repository
// ============================================================================

#[async_trait]
pub trait OnboardingRepository: Send + Sync {
    /// Find the onboarding record for a user
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Option<OnboardingStatus>>;

    /// Write the full record, creating it if absent (idempotent upsert)
    ///
    /// The whole record is written in one atomic statement so the cached
    /// progress can never drift from the flags it was computed from.
    async fn upsert(&self, status: &OnboardingStatus) -> RepoResult<()>;
}

// ============================================================================
// Connection Repository
// ============================================================================

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Find request by id
    async fn find_by_id(&self, id: RequestId) -> RepoResult<Option<ConnectionRequest>>;

    /// Find the active (pending or accepted) request for a pair, if any
    async fn find_active_by_pair(&self, pair: PairKey) -> RepoResult<Option<ConnectionRequest>>;

    /// Find the most recent request for a pair regardless of status
    async fn find_latest_by_pair(&self, pair: PairKey) -> RepoResult<Option<ConnectionRequest>>;

    /// Insert a pending request
    ///
    /// Enforces the at-most-one-active-request-per-pair invariant: of two
    /// concurrent calls for the same pair exactly one wins, the other
    /// fails with `RequestAlreadyPending` (or `AlreadyConnected` when the
    /// occupying record is accepted).
    async fn create_pending(&self, request: &ConnectionRequest) -> RepoResult<()>;

    /// Compare-and-set a pending request to a terminal status
    ///
    /// Only flips a row whose current status is pending; returns the
    /// updated record, or `None` when the guard missed (already responded
    /// or deleted). No side effects on a miss.
    async fn mark_responded(
        &self,
        id: RequestId,
        status: ConnectionStatus,
    ) -> RepoResult<Option<ConnectionRequest>>;

    /// Delete a request (requester cancel, or block cleanup)
    async fn delete(&self, id: RequestId) -> RepoResult<()>;

    /// Pending requests awaiting a receiver's response
    async fn list_pending_for(&self, receiver_id: UserId) -> RepoResult<Vec<ConnectionRequest>>;

    /// Accepted connections a user is a party of
    async fn list_accepted_for(&self, user_id: UserId) -> RepoResult<Vec<ConnectionRequest>>;
}

// ============================================================================
// Block Repository
// ============================================================================

/// Block record (directional; a pair is blocked if either direction exists)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub blocker_id: UserId,
    pub blocked_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Block {
    /// Create a block record stamped now
    pub fn new(blocker_id: UserId, blocked_id: UserId) -> Self {
        Self {
            blocker_id,
            blocked_id,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait BlockRepository: Send + Sync {
    /// Check whether either side of the pair has blocked the other
    async fn is_blocked(&self, pair: PairKey) -> RepoResult<bool>;

    /// Find a specific directional block record
    async fn find(&self, blocker_id: UserId, blocked_id: UserId) -> RepoResult<Option<Block>>;

    /// Create a block record; idempotent when it already exists
    async fn create(&self, block: &Block) -> RepoResult<()>;

    /// Remove a directional block record
    async fn delete(&self, blocker_id: UserId, blocked_id: UserId) -> RepoResult<()>;

    /// List the users blocked by a given user
    async fn list_blocked_by(&self, blocker_id: UserId) -> RepoResult<Vec<Block>>;
}

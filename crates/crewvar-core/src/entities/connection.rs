//! Connection request entity - a mutual-approval request between two crew
//!
//! Lifecycle: pending -> accepted | declined. A declined record may be
//! superseded by a new request; accepted and pending records are "active"
//! and unique per pair. Blocks live outside the record and override its
//! state at read time.

use chrono::{DateTime, Utc};

use crate::value_objects::{ConnectionState, PairKey, RequestId, UserId};

/// Stored status of a connection request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Declined,
}

impl ConnectionStatus {
    /// Database string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    /// Parse the database string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }

    /// Pending and accepted records occupy the pair's uniqueness slot
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ConnectionStatus> for ConnectionState {
    fn from(status: ConnectionStatus) -> Self {
        match status {
            ConnectionStatus::Pending => Self::Pending,
            ConnectionStatus::Accepted => Self::Accepted,
            ConnectionStatus::Declined => Self::Declined,
        }
    }
}

/// Connection request entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRequest {
    pub id: RequestId,
    pub requester_id: UserId,
    pub receiver_id: UserId,
    pub status: ConnectionStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl ConnectionRequest {
    /// Maximum length of the optional introduction message
    pub const MAX_MESSAGE_LEN: usize = 500;

    /// Create a new pending request
    pub fn new(
        id: RequestId,
        requester_id: UserId,
        receiver_id: UserId,
        message: Option<String>,
    ) -> Self {
        Self {
            id,
            requester_id,
            receiver_id,
            status: ConnectionStatus::Pending,
            message,
            created_at: Utc::now(),
            responded_at: None,
        }
    }

    /// The unordered pair this request belongs to
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.requester_id, self.receiver_id)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ConnectionStatus::Pending
    }

    #[inline]
    pub fn is_accepted(&self) -> bool {
        self.status == ConnectionStatus::Accepted
    }

    /// Check if a user is one of the two parties
    pub fn is_party(&self, user_id: UserId) -> bool {
        self.requester_id == user_id || self.receiver_id == user_id
    }

    /// The other party from the given user's point of view
    pub fn counterparty(&self, user_id: UserId) -> Option<UserId> {
        if user_id == self.requester_id {
            Some(self.receiver_id)
        } else if user_id == self.receiver_id {
            Some(self.requester_id)
        } else {
            None
        }
    }

    /// Effective state of the pair, ignoring blocks
    pub fn state(&self) -> ConnectionState {
        self.status.into()
    }
}

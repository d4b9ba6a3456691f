//! Connection request database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the connection_requests table
///
/// `user_lo` / `user_hi` are the normalized pair columns the partial
/// unique index on active requests is built over.
#[derive(Debug, Clone, FromRow)]
pub struct ConnectionRequestModel {
    pub id: i64,
    pub user_lo: i64,
    pub user_hi: i64,
    pub requester_id: i64,
    pub receiver_id: i64,
    /// 'pending', 'accepted' or 'declined'
    pub status: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl ConnectionRequestModel {
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == "pending"
    }
}

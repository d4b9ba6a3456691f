//! Connection request entity <-> model mapper

use crewvar_core::entities::{ConnectionRequest, ConnectionStatus};
use crewvar_core::value_objects::{RequestId, UserId};

use crate::models::ConnectionRequestModel;

/// Convert database status string to ConnectionStatus enum
///
/// The column carries a CHECK constraint; anything unexpected falls back
/// to pending, which grants nothing.
fn parse_status(status: &str) -> ConnectionStatus {
    ConnectionStatus::parse(status).unwrap_or(ConnectionStatus::Pending)
}

/// Convert ConnectionRequestModel to ConnectionRequest entity
impl From<ConnectionRequestModel> for ConnectionRequest {
    fn from(model: ConnectionRequestModel) -> Self {
        ConnectionRequest {
            id: RequestId::new(model.id),
            requester_id: UserId::new(model.requester_id),
            receiver_id: UserId::new(model.receiver_id),
            status: parse_status(&model.status),
            message: model.message,
            created_at: model.created_at,
            responded_at: model.responded_at,
        }
    }
}

/// Convert ConnectionRequest entity reference to values for database insertion
pub struct ConnectionRequestInsert<'a> {
    pub id: i64,
    pub user_lo: i64,
    pub user_hi: i64,
    pub requester_id: i64,
    pub receiver_id: i64,
    pub status: &'static str,
    pub message: Option<&'a str>,
}

impl<'a> ConnectionRequestInsert<'a> {
    pub fn new(request: &'a ConnectionRequest) -> Self {
        let pair = request.pair_key();
        Self {
            id: request.id.into_inner(),
            user_lo: pair.lo().into_inner(),
            user_hi: pair.hi().into_inner(),
            requester_id: request.requester_id.into_inner(),
            receiver_id: request.receiver_id.into_inner(),
            status: request.status.as_str(),
            message: request.message.as_deref(),
        }
    }
}

//! Notification events handed to the notification collaborator
//!
//! The lifecycle dispatches exactly two kinds: a request notification to
//! the receiver when a request is sent, and an accepted notification to
//! both parties when the receiver accepts. Declines are silent on purpose;
//! there is no notification kind for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::value_objects::{RequestId, UserId};

/// Kind of notification dispatched by the connection lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ConnectionRequest,
    ConnectionAccepted,
}

impl NotificationKind {
    /// Wire string, as consumed by the notification collaborator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectionRequest => "connection_request",
            Self::ConnectionAccepted => "connection_accepted",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One notification addressed to one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Notification to the receiver of a freshly sent request
    pub fn connection_request(
        receiver_id: UserId,
        requester_id: UserId,
        request_id: RequestId,
        message: Option<&str>,
    ) -> Self {
        Self {
            user_id: receiver_id,
            kind: NotificationKind::ConnectionRequest,
            payload: json!({
                "request_id": request_id.to_string(),
                "requester_id": requester_id.to_string(),
                "message": message,
            }),
            created_at: Utc::now(),
        }
    }

    /// Notification to one party of an accepted connection
    pub fn connection_accepted(
        user_id: UserId,
        counterparty_id: UserId,
        request_id: RequestId,
    ) -> Self {
        Self {
            user_id,
            kind: NotificationKind::ConnectionAccepted,
            payload: json!({
                "request_id": request_id.to_string(),
                "counterparty_id": counterparty_id.to_string(),
            }),
            created_at: Utc::now(),
        }
    }
}

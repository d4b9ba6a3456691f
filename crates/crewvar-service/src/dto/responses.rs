//! Response DTOs for service operations

use chrono::{DateTime, Utc};
use serde::Serialize;

use crewvar_core::entities::{BasicProfile, ConnectionStatus, ExtendedProfile};
use crewvar_core::value_objects::{ConnectionState, RequestId, UserId};

/// Onboarding record as shown to the UI
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingStatusResponse {
    pub user_id: UserId,
    pub email_verified: bool,
    pub profile_photo: bool,
    pub display_name: bool,
    pub department: bool,
    pub role: bool,
    pub ship_assignment: bool,
    pub completed: bool,
    pub progress: u8,
    /// Names of unmet requirements, highest priority first
    pub missing: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of the onboarding gate for one navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    /// Gated features may be used
    Allowed,
    /// Send the user to the onboarding flow with the actionable checklist
    Redirect { progress: u8, missing: Vec<String> },
}

impl GateDecision {
    #[inline]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Connection request as shown to either party
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionRequestResponse {
    pub id: RequestId,
    pub requester_id: UserId,
    pub receiver_id: UserId,
    pub status: ConnectionStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

/// A blocked counterparty
#[derive(Debug, Clone, Serialize)]
pub struct BlockResponse {
    pub blocked_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// A profile rendered for a specific viewer
///
/// `extended` is present only when the viewer's visibility level allows it;
/// the serialized payload simply omits the key otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileViewResponse {
    pub connection_state: ConnectionState,
    pub basic: BasicProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<ExtendedProfile>,
}

//! Request DTOs for service operations
//!
//! All request DTOs implement `Deserialize`; those carrying free-form
//! input also implement `Validate`.

use serde::Deserialize;
use validator::Validate;

use crewvar_core::entities::{ConnectionStatus, OnboardingUpdate};
use crewvar_core::value_objects::UserId;

// ============================================================================
// Onboarding Requests
// ============================================================================

/// Partial update of the onboarding requirement flags
///
/// Progress has no field here: it is always recomputed from the flags,
/// whatever the caller sends alongside them is dropped at the serde layer.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UpdateOnboardingRequest {
    pub email_verified: Option<bool>,
    pub profile_photo: Option<bool>,
    pub display_name: Option<bool>,
    pub department: Option<bool>,
    pub role: Option<bool>,
    pub ship_assignment: Option<bool>,
}

impl From<UpdateOnboardingRequest> for OnboardingUpdate {
    fn from(request: UpdateOnboardingRequest) -> Self {
        OnboardingUpdate {
            email_verified: request.email_verified,
            profile_photo: request.profile_photo,
            display_name: request.display_name,
            department: request.department,
            role: request.role,
            ship_assignment: request.ship_assignment,
        }
    }
}

// ============================================================================
// Connection Requests
// ============================================================================

/// Send a connection request to another crew member
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendConnectionRequest {
    pub receiver_id: UserId,

    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
}

/// The receiver's decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionDecision {
    Accepted,
    Declined,
}

impl From<ConnectionDecision> for ConnectionStatus {
    fn from(decision: ConnectionDecision) -> Self {
        match decision {
            ConnectionDecision::Accepted => Self::Accepted,
            ConnectionDecision::Declined => Self::Declined,
        }
    }
}

/// Respond to a pending connection request
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RespondConnectionRequest {
    pub decision: ConnectionDecision,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Create a profile for a newly registered account
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 2, max = 50, message = "Display name must be 2-50 characters"))]
    pub display_name: String,
}

/// Update current profile
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 50, message = "Display name must be 2-50 characters"))]
    pub display_name: Option<String>,

    /// Avatar hash or null to keep current
    pub avatar: Option<String>,

    pub ship: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub subcategory: Option<String>,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,

    pub photos: Option<Vec<String>>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub snapchat: Option<String>,
    pub website: Option<String>,

    /// Set by the auth collaborator's verification callback
    pub email_verified: Option<bool>,
}

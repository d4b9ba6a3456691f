//! Entity to response mappers

use crewvar_core::entities::{ConnectionRequest, CrewProfile, OnboardingStatus, ProfileView};
use crewvar_core::traits::Block;
use crewvar_core::value_objects::{ConnectionState, VisibilityLevel};

use super::responses::{
    BlockResponse, ConnectionRequestResponse, OnboardingStatusResponse, ProfileViewResponse,
};

impl From<&OnboardingStatus> for OnboardingStatusResponse {
    fn from(status: &OnboardingStatus) -> Self {
        Self {
            user_id: status.user_id,
            email_verified: status.email_verified,
            profile_photo: status.profile_photo,
            display_name: status.display_name,
            department: status.department,
            role: status.role,
            ship_assignment: status.ship_assignment,
            completed: status.completed,
            progress: status.progress,
            missing: status
                .missing_requirements()
                .into_iter()
                .map(String::from)
                .collect(),
            updated_at: status.updated_at,
        }
    }
}

impl From<&ConnectionRequest> for ConnectionRequestResponse {
    fn from(request: &ConnectionRequest) -> Self {
        Self {
            id: request.id,
            requester_id: request.requester_id,
            receiver_id: request.receiver_id,
            status: request.status,
            message: request.message.clone(),
            created_at: request.created_at,
            responded_at: request.responded_at,
        }
    }
}

impl From<ConnectionRequest> for ConnectionRequestResponse {
    fn from(request: ConnectionRequest) -> Self {
        Self::from(&request)
    }
}

impl From<&Block> for BlockResponse {
    fn from(block: &Block) -> Self {
        Self {
            blocked_id: block.blocked_id,
            created_at: block.created_at,
        }
    }
}

impl ProfileViewResponse {
    /// Render a profile at the level its connection state grants
    pub fn render(profile: &CrewProfile, state: ConnectionState) -> Self {
        let view = ProfileView::resolve(profile, VisibilityLevel::for_state(state));
        Self {
            connection_state: state,
            basic: view.basic,
            extended: view.extended,
        }
    }

    /// Render a profile for its own owner (always extended)
    pub fn render_own(profile: &CrewProfile) -> Self {
        let view = ProfileView::resolve(profile, VisibilityLevel::Extended);
        Self {
            connection_state: ConnectionState::None,
            basic: view.basic,
            extended: view.extended,
        }
    }
}

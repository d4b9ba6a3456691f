//! Onboarding status entity <-> model mapper

use crewvar_core::entities::OnboardingStatus;
use crewvar_core::value_objects::UserId;

use crate::models::OnboardingStatusModel;

/// Convert OnboardingStatusModel to OnboardingStatus entity
impl From<OnboardingStatusModel> for OnboardingStatus {
    fn from(model: OnboardingStatusModel) -> Self {
        OnboardingStatus {
            user_id: UserId::new(model.user_id),
            email_verified: model.email_verified,
            profile_photo: model.profile_photo,
            display_name: model.display_name,
            department: model.department,
            role: model.role,
            ship_assignment: model.ship_assignment,
            completed: model.completed,
            progress: model.progress.clamp(0, 100) as u8,
            updated_at: model.updated_at,
        }
    }
}

//! Onboarding status database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the onboarding_status table
#[derive(Debug, Clone, FromRow)]
pub struct OnboardingStatusModel {
    pub user_id: i64,
    pub email_verified: bool,
    pub profile_photo: bool,
    pub display_name: bool,
    pub department: bool,
    pub role: bool,
    pub ship_assignment: bool,
    pub completed: bool,
    /// Cached derivation of the six flags
    pub progress: i16,
    pub updated_at: DateTime<Utc>,
}

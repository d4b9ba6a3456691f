//! Crew profile database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the profiles table
#[derive(Debug, Clone, FromRow)]
pub struct ProfileModel {
    pub user_id: i64,
    pub email: String,
    pub email_verified: bool,
    pub display_name: String,
    pub avatar: Option<String>,
    pub ship: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub subcategory: Option<String>,
    pub bio: Option<String>,
    pub photos: Vec<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub snapchat: Option<String>,
    pub website: Option<String>,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ProfileModel {
    /// Check if profile is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

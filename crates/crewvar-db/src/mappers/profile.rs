//! Crew profile entity <-> model mapper

use crewvar_core::entities::CrewProfile;
use crewvar_core::value_objects::UserId;

use crate::models::ProfileModel;

/// Convert ProfileModel to CrewProfile entity
impl From<ProfileModel> for CrewProfile {
    fn from(model: ProfileModel) -> Self {
        CrewProfile {
            user_id: UserId::new(model.user_id),
            email: model.email,
            email_verified: model.email_verified,
            display_name: model.display_name,
            avatar: model.avatar,
            ship: model.ship,
            department: model.department,
            role: model.role,
            subcategory: model.subcategory,
            last_seen_at: model.last_seen_at,
            bio: model.bio,
            photos: model.photos,
            phone: model.phone,
            instagram: model.instagram,
            snapchat: model.snapchat,
            website: model.website,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert CrewProfile entity reference to values for database insertion/update
pub struct ProfileInsert<'a> {
    pub user_id: i64,
    pub email: &'a str,
    pub email_verified: bool,
    pub display_name: &'a str,
    pub avatar: Option<&'a str>,
    pub ship: Option<&'a str>,
    pub department: Option<&'a str>,
    pub role: Option<&'a str>,
    pub subcategory: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub photos: &'a [String],
    pub phone: Option<&'a str>,
    pub instagram: Option<&'a str>,
    pub snapchat: Option<&'a str>,
    pub website: Option<&'a str>,
}

impl<'a> ProfileInsert<'a> {
    pub fn new(profile: &'a CrewProfile) -> Self {
        Self {
            user_id: profile.user_id.into_inner(),
            email: &profile.email,
            email_verified: profile.email_verified,
            display_name: &profile.display_name,
            avatar: profile.avatar.as_deref(),
            ship: profile.ship.as_deref(),
            department: profile.department.as_deref(),
            role: profile.role.as_deref(),
            subcategory: profile.subcategory.as_deref(),
            bio: profile.bio.as_deref(),
            photos: &profile.photos,
            phone: profile.phone.as_deref(),
            instagram: profile.instagram.as_deref(),
            snapchat: profile.snapchat.as_deref(),
            website: profile.website.as_deref(),
        }
    }
}

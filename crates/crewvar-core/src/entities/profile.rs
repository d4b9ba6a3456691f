//! Crew profile entity and its visibility projections
//!
//! The profile splits into two tiers: basic fields anyone aboard can see,
//! and extended fields that unlock only behind an accepted connection.
//! `ProfileView` is the per-render projection; it is never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{UserId, VisibilityLevel};

/// Crew member profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewProfile {
    pub user_id: UserId,
    pub email: String,
    pub email_verified: bool,

    // Basic tier
    pub display_name: String,
    pub avatar: Option<String>,
    pub ship: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub subcategory: Option<String>,
    pub last_seen_at: Option<DateTime<Utc>>,

    // Extended tier
    pub bio: Option<String>,
    pub photos: Vec<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub snapchat: Option<String>,
    pub website: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CrewProfile {
    /// Create a minimal profile for a newly registered account
    pub fn new(user_id: UserId, email: String, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            email,
            email_verified: false,
            display_name,
            avatar: None,
            ship: None,
            department: None,
            role: None,
            subcategory: None,
            last_seen_at: None,
            bio: None,
            photos: Vec::new(),
            phone: None,
            instagram: None,
            snapchat: None,
            website: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether an avatar has been uploaded
    #[inline]
    pub fn has_photo(&self) -> bool {
        self.avatar.as_deref().is_some_and(|a| !a.is_empty())
    }

    /// Whether a non-empty display name is set
    #[inline]
    pub fn has_display_name(&self) -> bool {
        !self.display_name.trim().is_empty()
    }

    #[inline]
    pub fn has_department(&self) -> bool {
        self.department.as_deref().is_some_and(|d| !d.is_empty())
    }

    #[inline]
    pub fn has_role(&self) -> bool {
        self.role.as_deref().is_some_and(|r| !r.is_empty())
    }

    #[inline]
    pub fn has_ship(&self) -> bool {
        self.ship.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Update the avatar hash
    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.avatar = avatar;
        self.updated_at = Utc::now();
    }

    /// Record activity for the online / last-seen indicator
    pub fn touch_last_seen(&mut self) {
        self.last_seen_at = Some(Utc::now());
    }
}

/// Fields visible to anyone aboard (level 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicProfile {
    pub user_id: UserId,
    pub display_name: String,
    pub avatar: Option<String>,
    pub ship: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub subcategory: Option<String>,
    pub last_seen_at: Option<DateTime<Utc>>,
}

/// Fields visible only behind an accepted connection (level 2)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedProfile {
    pub bio: Option<String>,
    pub photos: Vec<String>,
    pub phone: Option<String>,
    pub contact_email: String,
    pub instagram: Option<String>,
    pub snapchat: Option<String>,
    pub website: Option<String>,
}

/// Per-render projection of a profile for a given viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    pub basic: BasicProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<ExtendedProfile>,
}

impl ProfileView {
    /// Project a profile at the given visibility level
    ///
    /// The basic payload is built from basic-tier fields only; extended
    /// fields cannot leak through it regardless of level.
    pub fn resolve(profile: &CrewProfile, level: VisibilityLevel) -> Self {
        let basic = BasicProfile {
            user_id: profile.user_id,
            display_name: profile.display_name.clone(),
            avatar: profile.avatar.clone(),
            ship: profile.ship.clone(),
            department: profile.department.clone(),
            role: profile.role.clone(),
            subcategory: profile.subcategory.clone(),
            last_seen_at: profile.last_seen_at,
        };

        let extended = level.is_extended().then(|| ExtendedProfile {
            bio: profile.bio.clone(),
            photos: profile.photos.clone(),
            phone: profile.phone.clone(),
            contact_email: profile.email.clone(),
            instagram: profile.instagram.clone(),
            snapchat: profile.snapchat.clone(),
            website: profile.website.clone(),
        });

        Self { basic, extended }
    }
}

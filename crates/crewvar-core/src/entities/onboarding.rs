//! Onboarding status entity - per-user requirement flags and the gate
//!
//! `progress` is a cached derivation of the six flags, recomputed on every
//! mutation; the flags are the source of truth. The one exception is
//! `mark_complete`, the operator fast-track, which forces progress to 100
//! without touching the flags.

use chrono::{DateTime, Utc};

use crate::entities::requirement::{registry, REQUIREMENTS};
use crate::value_objects::UserId;

/// Number of tracked requirements
pub const REQUIREMENT_COUNT: u32 = REQUIREMENTS.len() as u32;

/// Per-user onboarding record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingStatus {
    pub user_id: UserId,
    pub email_verified: bool,
    pub profile_photo: bool,
    pub display_name: bool,
    pub department: bool,
    pub role: bool,
    pub ship_assignment: bool,
    /// Explicit terminal flag, distinct from "all six flags true"
    pub completed: bool,
    /// Derived 0-100; cache, never source of truth
    pub progress: u8,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of the requirement flags
///
/// Only `Some` fields are applied. Progress is not representable here:
/// callers cannot supply it, it is always recomputed from the flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnboardingUpdate {
    pub email_verified: Option<bool>,
    pub profile_photo: Option<bool>,
    pub display_name: Option<bool>,
    pub department: Option<bool>,
    pub role: Option<bool>,
    pub ship_assignment: Option<bool>,
}

impl OnboardingUpdate {
    /// Check whether the update carries no changes
    pub fn is_empty(&self) -> bool {
        self.email_verified.is_none()
            && self.profile_photo.is_none()
            && self.display_name.is_none()
            && self.department.is_none()
            && self.role.is_none()
            && self.ship_assignment.is_none()
    }
}

impl OnboardingStatus {
    /// Create a fresh record with all flags false
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            email_verified: false,
            profile_photo: false,
            display_name: false,
            department: false,
            role: false,
            ship_assignment: false,
            completed: false,
            progress: 0,
            updated_at: Utc::now(),
        }
    }

    /// Read the flag behind a registry key
    pub fn flag(&self, key: &str) -> bool {
        match key {
            "email_verified" => self.email_verified,
            "profile_photo" => self.profile_photo,
            "display_name" => self.display_name,
            "department" => self.department,
            "role" => self.role,
            "ship_assignment" => self.ship_assignment,
            _ => false,
        }
    }

    /// Number of flags currently set
    pub fn set_count(&self) -> u32 {
        [
            self.email_verified,
            self.profile_photo,
            self.display_name,
            self.department,
            self.role,
            self.ship_assignment,
        ]
        .iter()
        .filter(|f| **f)
        .count() as u32
    }

    /// Check whether every requirement flag is set
    pub fn all_flags_set(&self) -> bool {
        self.set_count() == REQUIREMENT_COUNT
    }

    /// The progress value the flags imply: round(100 * set / total)
    pub fn computed_progress(&self) -> u8 {
        ((self.set_count() * 100 + REQUIREMENT_COUNT / 2) / REQUIREMENT_COUNT) as u8
    }

    /// Recompute the cached progress from the flags
    pub fn recompute_progress(&mut self) {
        self.progress = self.computed_progress();
    }

    /// Merge a partial update, recompute progress, stamp `updated_at`
    pub fn apply(&mut self, update: &OnboardingUpdate) {
        if let Some(v) = update.email_verified {
            self.email_verified = v;
        }
        if let Some(v) = update.profile_photo {
            self.profile_photo = v;
        }
        if let Some(v) = update.display_name {
            self.display_name = v;
        }
        if let Some(v) = update.department {
            self.department = v;
        }
        if let Some(v) = update.role {
            self.role = v;
        }
        if let Some(v) = update.ship_assignment {
            self.ship_assignment = v;
        }
        self.recompute_progress();
        self.updated_at = Utc::now();
    }

    /// Operator fast-track: set `completed` and force progress to 100
    /// irrespective of the flags.
    ///
    /// This can leave a record with `completed = true` whose flags are not
    /// all set; such a record still fails `is_complete`. That mismatch is
    /// visible to operators via the flags and is accepted.
    pub fn mark_complete(&mut self) {
        self.completed = true;
        self.progress = 100;
        self.updated_at = Utc::now();
    }

    /// Gate predicate: completed flag AND all six requirement flags
    ///
    /// Both must hold. A record whose `completed` flag survived a flag
    /// reset (stale or legacy data) is not treated as complete.
    pub fn is_complete(&self) -> bool {
        self.completed && self.all_flags_set()
    }

    /// Gate predicate: whether the onboarding flow must be shown
    #[inline]
    pub fn is_required(&self) -> bool {
        !self.is_complete()
    }

    /// Names of unmet requirements, in ascending priority order
    pub fn missing_requirements(&self) -> Vec<&'static str> {
        registry()
            .iter()
            .filter(|r| !self.flag(r.key))
            .map(|r| r.name)
            .collect()
    }
}

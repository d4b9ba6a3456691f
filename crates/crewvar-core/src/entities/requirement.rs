//! Requirement registry - the fixed list of onboarding prerequisites
//!
//! Defined once, ordered by priority (1 = highest). Callers walk the
//! registry to build the "what's left to do" checklist, so the ordering
//! here is user-visible.

/// One onboarding prerequisite tracked as a boolean flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    /// Stable string key, also used as the flag column name
    pub key: &'static str,
    /// Human-readable name shown in the checklist
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    /// 1 = highest; the registry slice is sorted ascending
    pub priority: u8,
}

/// The registry, in priority order
pub const REQUIREMENTS: [Requirement; 6] = [
    Requirement {
        key: "email_verified",
        name: "Email Verification",
        description: "Verify your email address",
        required: true,
        priority: 1,
    },
    Requirement {
        key: "profile_photo",
        name: "Profile Photo",
        description: "Upload a profile photo",
        required: true,
        priority: 2,
    },
    Requirement {
        key: "display_name",
        name: "Display Name",
        description: "Set your display name",
        required: true,
        priority: 3,
    },
    Requirement {
        key: "department",
        name: "Department",
        description: "Select your department",
        required: true,
        priority: 4,
    },
    Requirement {
        key: "role",
        name: "Role",
        description: "Select your role",
        required: true,
        priority: 5,
    },
    Requirement {
        key: "ship_assignment",
        name: "Current Ship",
        description: "Select the ship you are currently on",
        required: true,
        priority: 6,
    },
];

/// The registry slice, in priority order
pub fn registry() -> &'static [Requirement] {
    &REQUIREMENTS
}

/// Look up a requirement by its stable key
pub fn find_by_key(key: &str) -> Option<&'static Requirement> {
    REQUIREMENTS.iter().find(|r| r.key == key)
}

//! Profile visibility - the access level a viewer gets on another profile
//!
//! Visibility is a binary gate keyed off the effective connection state of
//! the viewer/owner pair. Extended fields unlock only on an accepted
//! connection; a pending request grants exactly as much as no request at
//! all. There is deliberately no intermediate tier.

use serde::{Deserialize, Serialize};

/// Effective state of a user pair, as consumed by visibility and discovery
///
/// `None` means no request record exists. `Blocked` overrides whatever
/// request record exists when either side has blocked the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    None,
    Pending,
    Accepted,
    Declined,
    Blocked,
}

impl ConnectionState {
    /// String form, matching the serialized representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access level on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityLevel {
    /// Name, ship, role, department, subcategory, presence
    Basic,
    /// Basic plus bio, photos, contacts, social links
    Extended,
}

impl VisibilityLevel {
    /// Derive the level from a pair's effective connection state
    ///
    /// Extended iff accepted. Pending must behave identically to no
    /// connection at all; anything else is a disclosure bug.
    pub fn for_state(state: ConnectionState) -> Self {
        match state {
            ConnectionState::Accepted => Self::Extended,
            ConnectionState::None
            | ConnectionState::Pending
            | ConnectionState::Declined
            | ConnectionState::Blocked => Self::Basic,
        }
    }

    /// Check whether extended fields are exposed at this level
    #[inline]
    pub fn is_extended(&self) -> bool {
        matches!(self, Self::Extended)
    }
}

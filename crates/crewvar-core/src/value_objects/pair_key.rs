//! Pair key - the unordered pair of users a connection belongs to
//!
//! Connection requests, blocks, and visibility are all scoped to the pair
//! {a, b} regardless of which side initiated. Normalizing to (lo, hi) gives
//! every pair exactly one key, which is what the active-request uniqueness
//! constraint hangs off.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Normalized unordered pair of user ids (lo <= hi)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey {
    lo: UserId,
    hi: UserId,
}

impl PairKey {
    /// Create a pair key from two user ids, in either order
    pub fn new(a: UserId, b: UserId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// The smaller user id
    #[inline]
    pub const fn lo(&self) -> UserId {
        self.lo
    }

    /// The larger user id
    #[inline]
    pub const fn hi(&self) -> UserId {
        self.hi
    }

    /// Check whether a user is one side of this pair
    #[inline]
    pub fn contains(&self, user_id: UserId) -> bool {
        self.lo == user_id || self.hi == user_id
    }

    /// The other side of the pair, if the given user is part of it
    pub fn other(&self, user_id: UserId) -> Option<UserId> {
        if user_id == self.lo {
            Some(self.hi)
        } else if user_id == self.hi {
            Some(self.lo)
        } else {
            None
        }
    }

    /// Check whether both sides are the same user (self-pair)
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.lo == self.hi
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lo, self.hi)
    }
}

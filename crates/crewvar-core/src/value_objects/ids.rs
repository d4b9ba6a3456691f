//! 64-bit entity ids with a snowflake-style layout
//!
//! Structure:
//! - Bits 63-22: Timestamp (milliseconds since custom epoch)
//! - Bits 21-12: Worker ID (0-1023)
//! - Bits 11-0:  Sequence number (0-4095)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Custom epoch: 2023-06-01 00:00:00 UTC (milliseconds)
pub const ID_EPOCH: i64 = 1685577600000;

/// Error when parsing an id from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid id format")]
    InvalidFormat,
}

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(i64);

        impl $name {
            /// Create from a raw i64 value
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner i64 value
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Check if the id is zero (uninitialized)
            #[inline]
            pub const fn is_zero(&self) -> bool {
                self.0 == 0
            }

            /// Extract timestamp (milliseconds since Unix epoch)
            #[inline]
            pub fn timestamp(&self) -> i64 {
                (self.0 >> 22) + ID_EPOCH
            }

            /// Convert the embedded timestamp to DateTime<Utc>
            pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
                use chrono::{TimeZone, Utc};
                Utc.timestamp_millis_opt(self.timestamp())
                    .single()
                    .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap())
            }

            /// Parse from string representation
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                s.parse::<i64>()
                    .map($name)
                    .map_err(|_| IdParseError::InvalidFormat)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::parse(s)
            }
        }

        // Serialize as string for JSON (JavaScript BigInt safety)
        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.0.to_string())
            }
        }

        // Deserialize from string or number
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                use serde::de::{self, Visitor};

                struct IdVisitor;

                impl<'de> Visitor<'de> for IdVisitor {
                    type Value = $name;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str("a string or integer id")
                    }

                    fn visit_i64<E>(self, value: i64) -> Result<$name, E>
                    where
                        E: de::Error,
                    {
                        Ok($name(value))
                    }

                    fn visit_u64<E>(self, value: u64) -> Result<$name, E>
                    where
                        E: de::Error,
                    {
                        Ok($name(value as i64))
                    }

                    fn visit_str<E>(self, value: &str) -> Result<$name, E>
                    where
                        E: de::Error,
                    {
                        value
                            .parse::<i64>()
                            .map($name)
                            .map_err(|_| de::Error::custom("invalid id string"))
                    }
                }

                deserializer.deserialize_any(IdVisitor)
            }
        }
    };
}

id_type! {
    /// Id of a crew member account
    UserId
}

id_type! {
    /// Id of a connection request
    RequestId
}

/// Thread-safe id generator
///
/// Generates unique ids at up to 4096 per millisecond per worker using a
/// single packed atomic word (timestamp << 12 | sequence).
pub struct IdGenerator {
    worker_id: u16,
    state: AtomicI64,
}

impl IdGenerator {
    /// Create a new generator with the given worker ID
    ///
    /// # Panics
    /// Panics if worker_id >= 1024
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id < 1024, "Worker ID must be < 1024");
        Self {
            worker_id,
            state: AtomicI64::new(0),
        }
    }

    /// Generate a new unique raw id
    pub fn next_raw(&self) -> i64 {
        loop {
            let now = Self::current_timestamp();

            let claimed = self.state.fetch_update(Ordering::AcqRel, Ordering::Acquire, |prev| {
                let last = prev >> 12;
                let seq = prev & 0xFFF;
                if now > last {
                    Some(now << 12)
                } else if seq < 0xFFF {
                    // Clock stalled or moved backwards: stay on the last
                    // timestamp and burn through the sequence space.
                    Some((last << 12) | (seq + 1))
                } else {
                    None
                }
            });

            match claimed {
                Ok(prev) => {
                    let last = prev >> 12;
                    let (timestamp, sequence) = if now > last {
                        (now, 0)
                    } else {
                        (last, (prev & 0xFFF) + 1)
                    };
                    return ((timestamp - ID_EPOCH) << 22)
                        | (i64::from(self.worker_id) << 12)
                        | sequence;
                }
                Err(_) => {
                    // Sequence exhausted for this millisecond
                    std::hint::spin_loop();
                }
            }
        }
    }

    /// Generate a new unique user id
    pub fn user_id(&self) -> UserId {
        UserId::new(self.next_raw())
    }

    /// Generate a new unique request id
    pub fn request_id(&self) -> RequestId {
        RequestId::new(self.next_raw())
    }

    /// Get the worker ID of this generator
    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    #[inline]
    fn current_timestamp() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

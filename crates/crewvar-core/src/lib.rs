//! # crewvar-core
//!
//! Domain layer containing entities, value objects, repository traits, and
//! notification events. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    registry, BasicProfile, ConnectionRequest, ConnectionStatus, CrewProfile, ExtendedProfile,
    OnboardingStatus, OnboardingUpdate, ProfileView, Requirement, REQUIREMENTS,
};
pub use error::DomainError;
pub use events::{Notification, NotificationKind};
pub use traits::{
    Block, BlockRepository, ConnectionRepository, Notifier, OnboardingRepository,
    ProfileRepository, RepoResult,
};
pub use value_objects::{
    ConnectionState, IdGenerator, IdParseError, PairKey, RequestId, UserId, VisibilityLevel,
};

//! Ports - traits the infrastructure layer implements

mod notifier;
mod repositories;

pub use notifier::Notifier;
pub use repositories::{
    Block, BlockRepository, ConnectionRepository, OnboardingRepository, ProfileRepository,
    RepoResult,
};

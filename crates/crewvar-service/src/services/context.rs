//! Service context - dependency container for services
//!
//! Holds the repositories, the notification port, and the id generator
//! every service needs.

use std::sync::Arc;

use crewvar_core::traits::{
    BlockRepository, ConnectionRepository, Notifier, OnboardingRepository, ProfileRepository,
};
use crewvar_core::value_objects::RequestId;
use crewvar_core::IdGenerator;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    profile_repo: Arc<dyn ProfileRepository>,
    onboarding_repo: Arc<dyn OnboardingRepository>,
    connection_repo: Arc<dyn ConnectionRepository>,
    block_repo: Arc<dyn BlockRepository>,
    notifier: Arc<dyn Notifier>,
    id_generator: Arc<IdGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        profile_repo: Arc<dyn ProfileRepository>,
        onboarding_repo: Arc<dyn OnboardingRepository>,
        connection_repo: Arc<dyn ConnectionRepository>,
        block_repo: Arc<dyn BlockRepository>,
        notifier: Arc<dyn Notifier>,
        id_generator: Arc<IdGenerator>,
    ) -> Self {
        Self {
            profile_repo,
            onboarding_repo,
            connection_repo,
            block_repo,
            notifier,
            id_generator,
        }
    }

    /// Get the profile repository
    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    /// Get the onboarding repository
    pub fn onboarding_repo(&self) -> &dyn OnboardingRepository {
        self.onboarding_repo.as_ref()
    }

    /// Get the connection repository
    pub fn connection_repo(&self) -> &dyn ConnectionRepository {
        self.connection_repo.as_ref()
    }

    /// Get the block repository
    pub fn block_repo(&self) -> &dyn BlockRepository {
        self.block_repo.as_ref()
    }

    /// Get the notification port
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Generate a new connection request id
    pub fn generate_request_id(&self) -> RequestId {
        self.id_generator.request_id()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("notifier", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    onboarding_repo: Option<Arc<dyn OnboardingRepository>>,
    connection_repo: Option<Arc<dyn ConnectionRepository>>,
    block_repo: Option<Arc<dyn BlockRepository>>,
    notifier: Option<Arc<dyn Notifier>>,
    id_generator: Option<Arc<IdGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn onboarding_repo(mut self, repo: Arc<dyn OnboardingRepository>) -> Self {
        self.onboarding_repo = Some(repo);
        self
    }

    pub fn connection_repo(mut self, repo: Arc<dyn ConnectionRepository>) -> Self {
        self.connection_repo = Some(repo);
        self
    }

    pub fn block_repo(mut self, repo: Arc<dyn BlockRepository>) -> Self {
        self.block_repo = Some(repo);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn id_generator(mut self, generator: Arc<IdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.profile_repo
                .ok_or_else(|| ServiceError::validation("profile_repo is required"))?,
            self.onboarding_repo
                .ok_or_else(|| ServiceError::validation("onboarding_repo is required"))?,
            self.connection_repo
                .ok_or_else(|| ServiceError::validation("connection_repo is required"))?,
            self.block_repo
                .ok_or_else(|| ServiceError::validation("block_repo is required"))?,
            self.notifier
                .ok_or_else(|| ServiceError::validation("notifier is required"))?,
            self.id_generator.unwrap_or_default(),
        ))
    }
}

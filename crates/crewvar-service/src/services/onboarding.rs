//! Onboarding service
//!
//! Tracks per-user requirement flags and gates access to rosters and chat
//! until the profile is complete.

use crewvar_core::entities::{OnboardingStatus, OnboardingUpdate};
use crewvar_core::error::DomainError;
use crewvar_core::value_objects::UserId;
use tracing::{info, instrument, warn};

use crate::dto::{GateDecision, OnboardingStatusResponse, UpdateOnboardingRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Onboarding service
pub struct OnboardingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> OnboardingService<'a> {
    /// Create a new OnboardingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the onboarding record for a user
    ///
    /// A user with no record yet gets the all-false default view; the
    /// record itself is created lazily on the first update.
    #[instrument(skip(self))]
    pub async fn get_status(&self, user_id: UserId) -> ServiceResult<OnboardingStatusResponse> {
        let status = self.load_or_default(user_id).await?;
        Ok(OnboardingStatusResponse::from(&status))
    }

    /// Merge a partial flag update into the user's record
    ///
    /// Idempotent upsert: unknown users get a default record first, so
    /// this never fails on a missing record. Progress is recomputed from
    /// the flags on every call.
    #[instrument(skip(self, request))]
    pub async fn update_status(
        &self,
        user_id: UserId,
        request: UpdateOnboardingRequest,
    ) -> ServiceResult<OnboardingStatusResponse> {
        self.apply_update(user_id, OnboardingUpdate::from(request))
            .await
    }

    /// Re-derive the requirement flags from the profile's fields
    ///
    /// Called after profile edits so the flags track whether the
    /// corresponding fields are actually filled in.
    #[instrument(skip(self))]
    pub async fn sync_from_profile(
        &self,
        user_id: UserId,
    ) -> ServiceResult<OnboardingStatusResponse> {
        let profile = self
            .ctx
            .profile_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::ProfileNotFound(user_id))?;

        let update = OnboardingUpdate {
            email_verified: Some(profile.email_verified),
            profile_photo: Some(profile.has_photo()),
            display_name: Some(profile.has_display_name()),
            department: Some(profile.has_department()),
            role: Some(profile.has_role()),
            ship_assignment: Some(profile.has_ship()),
        };

        self.apply_update(user_id, update).await
    }

    /// Operator fast-track: mark the record completed with progress forced
    /// to 100, whatever the flags say
    ///
    /// A fast-tracked record whose flags are not all set still fails the
    /// gate; the override only affects the stored flag and progress.
    #[instrument(skip(self))]
    pub async fn mark_complete(&self, user_id: UserId) -> ServiceResult<OnboardingStatusResponse> {
        let mut status = self.load_or_default(user_id).await?;
        status.mark_complete();
        self.ctx.onboarding_repo().upsert(&status).await?;

        if !status.all_flags_set() {
            warn!(
                user_id = %user_id,
                progress = status.computed_progress(),
                "Onboarding fast-tracked with unmet requirements"
            );
        }
        info!(user_id = %user_id, "Onboarding marked complete");

        Ok(OnboardingStatusResponse::from(&status))
    }

    /// Evaluate the gate for one navigation
    ///
    /// Computed fresh from the stored record on every call; nothing is
    /// cached between requirement changes.
    #[instrument(skip(self))]
    pub async fn gate(&self, user_id: UserId) -> ServiceResult<GateDecision> {
        let status = self.load_or_default(user_id).await?;

        if status.is_complete() {
            Ok(GateDecision::Allowed)
        } else {
            Ok(GateDecision::Redirect {
                progress: status.progress,
                missing: status
                    .missing_requirements()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            })
        }
    }

    /// Guard for gated features; errors unless onboarding is complete
    #[instrument(skip(self))]
    pub async fn require_complete(&self, user_id: UserId) -> ServiceResult<()> {
        let status = self.load_or_default(user_id).await?;
        if status.is_required() {
            return Err(ServiceError::Domain(DomainError::OnboardingIncomplete));
        }
        Ok(())
    }

    async fn apply_update(
        &self,
        user_id: UserId,
        update: OnboardingUpdate,
    ) -> ServiceResult<OnboardingStatusResponse> {
        let mut status = self.load_or_default(user_id).await?;
        status.apply(&update);
        self.ctx.onboarding_repo().upsert(&status).await?;

        info!(
            user_id = %user_id,
            progress = status.progress,
            "Onboarding status updated"
        );

        Ok(OnboardingStatusResponse::from(&status))
    }

    async fn load_or_default(&self, user_id: UserId) -> ServiceResult<OnboardingStatus> {
        Ok(self
            .ctx
            .onboarding_repo()
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| OnboardingStatus::new(user_id)))
    }
}

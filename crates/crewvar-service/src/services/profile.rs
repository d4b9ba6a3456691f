//! Profile service
//!
//! Profile reads go through the visibility resolver; the shipmates
//! listing additionally filters out blocked pairs.

use chrono::Utc;
use crewvar_core::entities::CrewProfile;
use crewvar_core::error::DomainError;
use crewvar_core::value_objects::{ConnectionState, UserId};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateProfileRequest, ProfileViewResponse, UpdateProfileRequest};

use super::connection::ConnectionService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::onboarding::OnboardingService;

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    /// Create a new ProfileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a profile for a newly registered account
    #[instrument(skip(self, request))]
    pub async fn create_profile(
        &self,
        user_id: UserId,
        request: CreateProfileRequest,
    ) -> ServiceResult<ProfileViewResponse> {
        request.validate()?;

        let profile = CrewProfile::new(user_id, request.email, request.display_name);
        self.ctx.profile_repo().create(&profile).await?;

        info!(user_id = %user_id, "Profile created");

        // Seed the onboarding record from what the fresh profile provides
        OnboardingService::new(self.ctx)
            .sync_from_profile(user_id)
            .await?;

        Ok(ProfileViewResponse::render_own(&profile))
    }

    /// Partially update the caller's own profile
    ///
    /// The onboarding flags are re-derived afterwards so they track the
    /// profile fields.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: UserId,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileViewResponse> {
        request.validate()?;

        let mut profile = self
            .ctx
            .profile_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::ProfileNotFound(user_id))?;

        if let Some(display_name) = request.display_name {
            profile.display_name = display_name;
        }
        if let Some(avatar) = request.avatar {
            profile.avatar = Some(avatar);
        }
        if let Some(ship) = request.ship {
            profile.ship = Some(ship);
        }
        if let Some(department) = request.department {
            profile.department = Some(department);
        }
        if let Some(role) = request.role {
            profile.role = Some(role);
        }
        if let Some(subcategory) = request.subcategory {
            profile.subcategory = Some(subcategory);
        }
        if let Some(bio) = request.bio {
            profile.bio = Some(bio);
        }
        if let Some(photos) = request.photos {
            profile.photos = photos;
        }
        if let Some(phone) = request.phone {
            profile.phone = Some(phone);
        }
        if let Some(instagram) = request.instagram {
            profile.instagram = Some(instagram);
        }
        if let Some(snapchat) = request.snapchat {
            profile.snapchat = Some(snapchat);
        }
        if let Some(website) = request.website {
            profile.website = Some(website);
        }
        if let Some(email_verified) = request.email_verified {
            profile.email_verified = email_verified;
        }
        profile.updated_at = Utc::now();

        self.ctx.profile_repo().update(&profile).await?;

        info!(user_id = %user_id, "Profile updated");

        OnboardingService::new(self.ctx)
            .sync_from_profile(user_id)
            .await?;

        Ok(ProfileViewResponse::render_own(&profile))
    }

    /// Render a profile for a viewer at the visibility the pair's state
    /// grants
    ///
    /// Extended fields appear only on an accepted connection, or on the
    /// viewer's own profile. Pending, declined and blocked pairs see
    /// exactly the same payload as strangers.
    #[instrument(skip(self))]
    pub async fn view_profile(
        &self,
        viewer_id: UserId,
        owner_id: UserId,
    ) -> ServiceResult<ProfileViewResponse> {
        let profile = self
            .ctx
            .profile_repo()
            .find_by_id(owner_id)
            .await?
            .ok_or(DomainError::ProfileNotFound(owner_id))?;

        if viewer_id == owner_id {
            return Ok(ProfileViewResponse::render_own(&profile));
        }

        let state = ConnectionService::new(self.ctx)
            .state_for_pair(viewer_id, owner_id)
            .await?;

        Ok(ProfileViewResponse::render(&profile, state))
    }

    /// Discovery listing: everyone on a ship except the viewer and any
    /// blocked pair, each rendered through the resolver
    #[instrument(skip(self))]
    pub async fn shipmates(
        &self,
        viewer_id: UserId,
        ship: &str,
    ) -> ServiceResult<Vec<ProfileViewResponse>> {
        let profiles = self.ctx.profile_repo().find_by_ship(ship).await?;
        let connections = ConnectionService::new(self.ctx);

        let mut cards = Vec::with_capacity(profiles.len());
        for profile in profiles {
            if profile.user_id == viewer_id {
                continue;
            }

            let state = connections
                .state_for_pair(viewer_id, profile.user_id)
                .await?;
            if state == ConnectionState::Blocked {
                continue;
            }

            cards.push(ProfileViewResponse::render(&profile, state));
        }

        Ok(cards)
    }

    /// Stamp the caller's last-seen timestamp
    #[instrument(skip(self))]
    pub async fn touch_last_seen(&self, user_id: UserId) -> ServiceResult<()> {
        self.ctx
            .profile_repo()
            .update_last_seen(user_id, Utc::now())
            .await?;
        Ok(())
    }
}

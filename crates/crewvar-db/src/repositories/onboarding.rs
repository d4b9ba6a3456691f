//! PostgreSQL implementation of OnboardingRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crewvar_core::entities::OnboardingStatus;
use crewvar_core::traits::{OnboardingRepository, RepoResult};
use crewvar_core::value_objects::UserId;

use crate::models::OnboardingStatusModel;

use super::error::map_db_error;

/// PostgreSQL implementation of OnboardingRepository
#[derive(Clone)]
pub struct PgOnboardingRepository {
    pool: PgPool,
}

impl PgOnboardingRepository {
    /// Create a new PgOnboardingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OnboardingRepository for PgOnboardingRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Option<OnboardingStatus>> {
        let result = sqlx::query_as::<_, OnboardingStatusModel>(
            r"
            SELECT user_id, email_verified, profile_photo, display_name, department,
                   role, ship_assignment, completed, progress, updated_at
            FROM onboarding_status
            WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(OnboardingStatus::from))
    }

    #[instrument(skip(self, status))]
    async fn upsert(&self, status: &OnboardingStatus) -> RepoResult<()> {
        // One statement for create and update so the cached progress is
        // always written together with the flags it was derived from.
        sqlx::query(
            r"
            INSERT INTO onboarding_status (user_id, email_verified, profile_photo, display_name,
                                           department, role, ship_assignment, completed,
                                           progress, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id) DO UPDATE
            SET email_verified = EXCLUDED.email_verified,
                profile_photo = EXCLUDED.profile_photo,
                display_name = EXCLUDED.display_name,
                department = EXCLUDED.department,
                role = EXCLUDED.role,
                ship_assignment = EXCLUDED.ship_assignment,
                completed = EXCLUDED.completed,
                progress = EXCLUDED.progress,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(status.user_id.into_inner())
        .bind(status.email_verified)
        .bind(status.profile_photo)
        .bind(status.display_name)
        .bind(status.department)
        .bind(status.role)
        .bind(status.ship_assignment)
        .bind(status.completed)
        .bind(i16::from(status.progress))
        .bind(status.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

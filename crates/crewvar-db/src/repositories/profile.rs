//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crewvar_core::entities::CrewProfile;
use crewvar_core::traits::{ProfileRepository, RepoResult};
use crewvar_core::value_objects::UserId;

use crate::mappers::ProfileInsert;
use crate::models::ProfileModel;

use super::error::{map_db_error, profile_not_found};

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new PgProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, user_id: UserId) -> RepoResult<Option<CrewProfile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT user_id, email, email_verified, display_name, avatar, ship, department,
                   role, subcategory, bio, photos, phone, instagram, snapchat, website,
                   last_seen_at, created_at, updated_at, deleted_at
            FROM profiles
            WHERE user_id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CrewProfile::from))
    }

    #[instrument(skip(self))]
    async fn find_by_ship(&self, ship: &str) -> RepoResult<Vec<CrewProfile>> {
        let results = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT user_id, email, email_verified, display_name, avatar, ship, department,
                   role, subcategory, bio, photos, phone, instagram, snapchat, website,
                   last_seen_at, created_at, updated_at, deleted_at
            FROM profiles
            WHERE ship = $1 AND deleted_at IS NULL
            ORDER BY display_name ASC
            ",
        )
        .bind(ship)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(CrewProfile::from).collect())
    }

    #[instrument(skip(self, profile))]
    async fn create(&self, profile: &CrewProfile) -> RepoResult<()> {
        let values = ProfileInsert::new(profile);

        sqlx::query(
            r"
            INSERT INTO profiles (user_id, email, email_verified, display_name, avatar, ship,
                                  department, role, subcategory, bio, photos, phone, instagram,
                                  snapchat, website, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ",
        )
        .bind(values.user_id)
        .bind(values.email)
        .bind(values.email_verified)
        .bind(values.display_name)
        .bind(values.avatar)
        .bind(values.ship)
        .bind(values.department)
        .bind(values.role)
        .bind(values.subcategory)
        .bind(values.bio)
        .bind(values.photos)
        .bind(values.phone)
        .bind(values.instagram)
        .bind(values.snapchat)
        .bind(values.website)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, profile))]
    async fn update(&self, profile: &CrewProfile) -> RepoResult<()> {
        let values = ProfileInsert::new(profile);

        let result = sqlx::query(
            r"
            UPDATE profiles
            SET email = $2, email_verified = $3, display_name = $4, avatar = $5, ship = $6,
                department = $7, role = $8, subcategory = $9, bio = $10, photos = $11,
                phone = $12, instagram = $13, snapchat = $14, website = $15, updated_at = $16
            WHERE user_id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(values.user_id)
        .bind(values.email)
        .bind(values.email_verified)
        .bind(values.display_name)
        .bind(values.avatar)
        .bind(values.ship)
        .bind(values.department)
        .bind(values.role)
        .bind(values.subcategory)
        .bind(values.bio)
        .bind(values.photos)
        .bind(values.phone)
        .bind(values.instagram)
        .bind(values.snapchat)
        .bind(values.website)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(profile.user_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_last_seen(&self, user_id: UserId, at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET last_seen_at = $2
            WHERE user_id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(user_id.into_inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(user_id));
        }

        Ok(())
    }
}

//! PostgreSQL implementation of BlockRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crewvar_core::traits::{Block, BlockRepository, RepoResult};
use crewvar_core::value_objects::{PairKey, UserId};

use crate::models::BlockModel;

use super::error::map_db_error;

/// PostgreSQL implementation of BlockRepository
#[derive(Clone)]
pub struct PgBlockRepository {
    pool: PgPool,
}

impl PgBlockRepository {
    /// Create a new PgBlockRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlockRepository for PgBlockRepository {
    #[instrument(skip(self))]
    async fn is_blocked(&self, pair: PairKey) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM blocks
                WHERE (blocker_id = $1 AND blocked_id = $2)
                   OR (blocker_id = $2 AND blocked_id = $1)
            )
            ",
        )
        .bind(pair.lo().into_inner())
        .bind(pair.hi().into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn find(&self, blocker_id: UserId, blocked_id: UserId) -> RepoResult<Option<Block>> {
        let result = sqlx::query_as::<_, BlockModel>(
            r"
            SELECT blocker_id, blocked_id, created_at
            FROM blocks
            WHERE blocker_id = $1 AND blocked_id = $2
            ",
        )
        .bind(blocker_id.into_inner())
        .bind(blocked_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Block::from))
    }

    #[instrument(skip(self, block))]
    async fn create(&self, block: &Block) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO blocks (blocker_id, blocked_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (blocker_id, blocked_id) DO NOTHING
            ",
        )
        .bind(block.blocker_id.into_inner())
        .bind(block.blocked_id.into_inner())
        .bind(block.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, blocker_id: UserId, blocked_id: UserId) -> RepoResult<()> {
        sqlx::query(
            r"
            DELETE FROM blocks
            WHERE blocker_id = $1 AND blocked_id = $2
            ",
        )
        .bind(blocker_id.into_inner())
        .bind(blocked_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_blocked_by(&self, blocker_id: UserId) -> RepoResult<Vec<Block>> {
        let results = sqlx::query_as::<_, BlockModel>(
            r"
            SELECT blocker_id, blocked_id, created_at
            FROM blocks
            WHERE blocker_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(blocker_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Block::from).collect())
    }
}

//! PostgreSQL implementation of ConnectionRepository
//!
//! The one-active-request-per-pair invariant is enforced by a partial
//! unique index over (user_lo, user_hi) WHERE status IN ('pending',
//! 'accepted'); `mark_responded` is a guarded UPDATE that only flips
//! pending rows, so concurrent responders race safely.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crewvar_core::entities::{ConnectionRequest, ConnectionStatus};
use crewvar_core::error::DomainError;
use crewvar_core::traits::{ConnectionRepository, RepoResult};
use crewvar_core::value_objects::{PairKey, RequestId, UserId};

use crate::mappers::ConnectionRequestInsert;
use crate::models::ConnectionRequestModel;

use super::error::{map_db_error, map_unique_violation, request_not_found};

/// PostgreSQL implementation of ConnectionRepository
#[derive(Clone)]
pub struct PgConnectionRepository {
    pool: PgPool,
}

impl PgConnectionRepository {
    /// Create a new PgConnectionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionRepository for PgConnectionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RequestId) -> RepoResult<Option<ConnectionRequest>> {
        let result = sqlx::query_as::<_, ConnectionRequestModel>(
            r"
            SELECT id, user_lo, user_hi, requester_id, receiver_id, status, message,
                   created_at, responded_at
            FROM connection_requests
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ConnectionRequest::from))
    }

    #[instrument(skip(self))]
    async fn find_active_by_pair(&self, pair: PairKey) -> RepoResult<Option<ConnectionRequest>> {
        let result = sqlx::query_as::<_, ConnectionRequestModel>(
            r"
            SELECT id, user_lo, user_hi, requester_id, receiver_id, status, message,
                   created_at, responded_at
            FROM connection_requests
            WHERE user_lo = $1 AND user_hi = $2 AND status IN ('pending', 'accepted')
            ",
        )
        .bind(pair.lo().into_inner())
        .bind(pair.hi().into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ConnectionRequest::from))
    }

    #[instrument(skip(self))]
    async fn find_latest_by_pair(&self, pair: PairKey) -> RepoResult<Option<ConnectionRequest>> {
        let result = sqlx::query_as::<_, ConnectionRequestModel>(
            r"
            SELECT id, user_lo, user_hi, requester_id, receiver_id, status, message,
                   created_at, responded_at
            FROM connection_requests
            WHERE user_lo = $1 AND user_hi = $2
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .bind(pair.lo().into_inner())
        .bind(pair.hi().into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ConnectionRequest::from))
    }

    #[instrument(skip(self, request))]
    async fn create_pending(&self, request: &ConnectionRequest) -> RepoResult<()> {
        let values = ConnectionRequestInsert::new(request);

        sqlx::query(
            r"
            INSERT INTO connection_requests (id, user_lo, user_hi, requester_id, receiver_id,
                                             status, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(values.id)
        .bind(values.user_lo)
        .bind(values.user_hi)
        .bind(values.requester_id)
        .bind(values.receiver_id)
        .bind(values.status)
        .bind(values.message)
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::RequestAlreadyPending))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_responded(
        &self,
        id: RequestId,
        status: ConnectionStatus,
    ) -> RepoResult<Option<ConnectionRequest>> {
        let result = sqlx::query_as::<_, ConnectionRequestModel>(
            r"
            UPDATE connection_requests
            SET status = $2, responded_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING id, user_lo, user_hi, requester_id, receiver_id, status, message,
                      created_at, responded_at
            ",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ConnectionRequest::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RequestId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM connection_requests
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(request_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_pending_for(&self, receiver_id: UserId) -> RepoResult<Vec<ConnectionRequest>> {
        let results = sqlx::query_as::<_, ConnectionRequestModel>(
            r"
            SELECT id, user_lo, user_hi, requester_id, receiver_id, status, message,
                   created_at, responded_at
            FROM connection_requests
            WHERE receiver_id = $1 AND status = 'pending'
            ORDER BY created_at DESC
            ",
        )
        .bind(receiver_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ConnectionRequest::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_accepted_for(&self, user_id: UserId) -> RepoResult<Vec<ConnectionRequest>> {
        let results = sqlx::query_as::<_, ConnectionRequestModel>(
            r"
            SELECT id, user_lo, user_hi, requester_id, receiver_id, status, message,
                   created_at, responded_at
            FROM connection_requests
            WHERE (requester_id = $1 OR receiver_id = $1) AND status = 'accepted'
            ORDER BY responded_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ConnectionRequest::from).collect())
    }
}

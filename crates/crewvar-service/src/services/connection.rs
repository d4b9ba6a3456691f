//! Connection service
//!
//! Drives the request lifecycle: send, respond, cancel, block. Declines
//! are silent and blocks pre-empt every other transition.

use crewvar_core::entities::{ConnectionRequest, ConnectionStatus};
use crewvar_core::error::DomainError;
use crewvar_core::events::Notification;
use crewvar_core::traits::Block;
use crewvar_core::value_objects::{ConnectionState, PairKey, RequestId, UserId};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    BlockResponse, ConnectionRequestResponse, RespondConnectionRequest, SendConnectionRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Connection service
pub struct ConnectionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConnectionService<'a> {
    /// Create a new ConnectionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a connection request
    ///
    /// Allowed when no active request exists for the pair and neither side
    /// has blocked the other. A previously declined request does not stand
    /// in the way; resubmission is allowed immediately. Of two concurrent
    /// sends for the same pair exactly one wins; the loser gets
    /// `RequestAlreadyPending` from the store and nothing is written.
    #[instrument(skip(self, request))]
    pub async fn send_request(
        &self,
        requester_id: UserId,
        request: SendConnectionRequest,
    ) -> ServiceResult<ConnectionRequestResponse> {
        request.validate()?;
        let receiver_id = request.receiver_id;

        if requester_id == receiver_id {
            return Err(ServiceError::Domain(DomainError::CannotConnectSelf));
        }

        // Receiver must exist
        self.ctx
            .profile_repo()
            .find_by_id(receiver_id)
            .await?
            .ok_or(DomainError::ProfileNotFound(receiver_id))?;

        let pair = PairKey::new(requester_id, receiver_id);

        if self.ctx.block_repo().is_blocked(pair).await? {
            return Err(ServiceError::Domain(DomainError::PairBlocked));
        }

        // Precise conflict for the common path; the store's uniqueness
        // constraint still decides the race.
        if let Some(active) = self.ctx.connection_repo().find_active_by_pair(pair).await? {
            let err = if active.is_accepted() {
                DomainError::AlreadyConnected
            } else {
                DomainError::RequestAlreadyPending
            };
            return Err(ServiceError::Domain(err));
        }

        let connection = ConnectionRequest::new(
            self.ctx.generate_request_id(),
            requester_id,
            receiver_id,
            request.message,
        );

        self.ctx.connection_repo().create_pending(&connection).await?;

        info!(
            request_id = %connection.id,
            requester_id = %requester_id,
            receiver_id = %receiver_id,
            "Connection request sent"
        );

        self.dispatch(Notification::connection_request(
            receiver_id,
            requester_id,
            connection.id,
            connection.message.as_deref(),
        ))
        .await;

        Ok(ConnectionRequestResponse::from(connection))
    }

    /// Respond to a pending request as its receiver
    ///
    /// Accept notifies both parties; decline notifies nobody. Retrying the
    /// same decision is idempotent and dispatches nothing the second time.
    #[instrument(skip(self, request))]
    pub async fn respond(
        &self,
        actor_id: UserId,
        request_id: RequestId,
        request: RespondConnectionRequest,
    ) -> ServiceResult<ConnectionRequestResponse> {
        let decision = ConnectionStatus::from(request.decision);

        let existing = self
            .ctx
            .connection_repo()
            .find_by_id(request_id)
            .await?
            .ok_or(DomainError::RequestNotFound(request_id))?;

        if existing.receiver_id != actor_id {
            return Err(ServiceError::Domain(DomainError::NotRequestReceiver));
        }

        match self
            .ctx
            .connection_repo()
            .mark_responded(request_id, decision)
            .await?
        {
            Some(updated) => {
                info!(
                    request_id = %request_id,
                    decision = %decision,
                    "Connection request answered"
                );

                if decision == ConnectionStatus::Accepted {
                    self.dispatch(Notification::connection_accepted(
                        updated.requester_id,
                        updated.receiver_id,
                        updated.id,
                    ))
                    .await;
                    self.dispatch(Notification::connection_accepted(
                        updated.receiver_id,
                        updated.requester_id,
                        updated.id,
                    ))
                    .await;
                }
                // Declined: no notification to anyone. The requester is
                // not told; silence here is the product behavior.

                Ok(ConnectionRequestResponse::from(updated))
            }
            None => {
                // The compare-and-set missed: somebody answered first (or
                // this is a retry of our own answer).
                let current = self
                    .ctx
                    .connection_repo()
                    .find_by_id(request_id)
                    .await?
                    .ok_or(DomainError::RequestNotFound(request_id))?;

                if current.status == decision {
                    // Idempotent retry: same terminal state, no second
                    // round of notifications.
                    Ok(ConnectionRequestResponse::from(current))
                } else {
                    Err(ServiceError::Domain(DomainError::invalid_transition(
                        &current,
                    )))
                }
            }
        }
    }

    /// Cancel a pending request as its sender, returning the pair to none
    #[instrument(skip(self))]
    pub async fn cancel_request(
        &self,
        actor_id: UserId,
        request_id: RequestId,
    ) -> ServiceResult<()> {
        let existing = self
            .ctx
            .connection_repo()
            .find_by_id(request_id)
            .await?
            .ok_or(DomainError::RequestNotFound(request_id))?;

        if existing.requester_id != actor_id {
            return Err(ServiceError::Domain(DomainError::NotRequestSender));
        }

        if !existing.is_pending() {
            return Err(ServiceError::Domain(DomainError::invalid_transition(
                &existing,
            )));
        }

        self.ctx.connection_repo().delete(request_id).await?;

        info!(request_id = %request_id, actor_id = %actor_id, "Connection request cancelled");

        Ok(())
    }

    /// Block a counterparty
    ///
    /// Allowed from any state and idempotent. A pending request between
    /// the pair is withdrawn as part of the block; an accepted record is
    /// left in place but overridden to blocked at read time.
    #[instrument(skip(self))]
    pub async fn block(&self, actor_id: UserId, counterparty_id: UserId) -> ServiceResult<()> {
        if actor_id == counterparty_id {
            return Err(ServiceError::validation("Cannot block yourself"));
        }

        self.ctx
            .block_repo()
            .create(&Block::new(actor_id, counterparty_id))
            .await?;

        let pair = PairKey::new(actor_id, counterparty_id);
        if let Some(active) = self.ctx.connection_repo().find_active_by_pair(pair).await? {
            if active.is_pending() {
                self.ctx.connection_repo().delete(active.id).await?;
            }
        }

        info!(actor_id = %actor_id, counterparty_id = %counterparty_id, "User blocked");

        Ok(())
    }

    /// Remove the actor's own block on a counterparty
    #[instrument(skip(self))]
    pub async fn unblock(&self, actor_id: UserId, counterparty_id: UserId) -> ServiceResult<()> {
        self.ctx
            .block_repo()
            .delete(actor_id, counterparty_id)
            .await?;

        info!(actor_id = %actor_id, counterparty_id = %counterparty_id, "User unblocked");

        Ok(())
    }

    /// Effective state of a pair: a block on either side overrides the
    /// request record
    #[instrument(skip(self))]
    pub async fn state_for_pair(&self, a: UserId, b: UserId) -> ServiceResult<ConnectionState> {
        let pair = PairKey::new(a, b);
        if pair.is_degenerate() {
            return Ok(ConnectionState::None);
        }

        if self.ctx.block_repo().is_blocked(pair).await? {
            return Ok(ConnectionState::Blocked);
        }

        if let Some(active) = self.ctx.connection_repo().find_active_by_pair(pair).await? {
            return Ok(active.state());
        }

        let latest = self.ctx.connection_repo().find_latest_by_pair(pair).await?;
        Ok(latest.map_or(ConnectionState::None, |r| r.state()))
    }

    /// Pending requests awaiting the receiver's answer
    #[instrument(skip(self))]
    pub async fn list_pending(
        &self,
        receiver_id: UserId,
    ) -> ServiceResult<Vec<ConnectionRequestResponse>> {
        let requests = self
            .ctx
            .connection_repo()
            .list_pending_for(receiver_id)
            .await?;
        Ok(requests.iter().map(ConnectionRequestResponse::from).collect())
    }

    /// Accepted connections the user is a party of
    #[instrument(skip(self))]
    pub async fn list_connections(
        &self,
        user_id: UserId,
    ) -> ServiceResult<Vec<ConnectionRequestResponse>> {
        let requests = self
            .ctx
            .connection_repo()
            .list_accepted_for(user_id)
            .await?;
        Ok(requests.iter().map(ConnectionRequestResponse::from).collect())
    }

    /// Users the actor has blocked
    #[instrument(skip(self))]
    pub async fn list_blocked(&self, actor_id: UserId) -> ServiceResult<Vec<BlockResponse>> {
        let blocks = self.ctx.block_repo().list_blocked_by(actor_id).await?;
        Ok(blocks.iter().map(BlockResponse::from).collect())
    }

    /// Best-effort notification dispatch; failures are logged, never fatal
    async fn dispatch(&self, notification: Notification) {
        let kind = notification.kind;
        let user_id = notification.user_id;
        if let Err(error) = self.ctx.notifier().notify(notification).await {
            warn!(%error, %kind, %user_id, "Notification dispatch failed");
        }
    }
}

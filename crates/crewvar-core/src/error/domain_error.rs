//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::ConnectionRequest;
use crate::value_objects::{ConnectionState, RequestId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Profile not found: {0}")]
    ProfileNotFound(UserId),

    #[error("Connection request not found: {0}")]
    RequestNotFound(RequestId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Message too long: max {max} characters")]
    MessageTooLong { max: usize },

    #[error("Cannot send a connection request to yourself")]
    CannotConnectSelf,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the receiver may respond to a connection request")]
    NotRequestReceiver,

    #[error("Only the requester may cancel a connection request")]
    NotRequestSender,

    #[error("Onboarding must be completed first")]
    OnboardingIncomplete,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("A connection request between these users is already pending")]
    RequestAlreadyPending,

    #[error("These users are already connected")]
    AlreadyConnected,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Transition not allowed from state {from}")]
    InvalidStateTransition { from: ConnectionState },

    #[error("This pair is blocked")]
    PairBlocked,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ProfileNotFound(_) => "UNKNOWN_PROFILE",
            Self::RequestNotFound(_) => "UNKNOWN_REQUEST",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MessageTooLong { .. } => "MESSAGE_TOO_LONG",
            Self::CannotConnectSelf => "CANNOT_CONNECT_SELF",

            // Authorization
            Self::NotRequestReceiver => "NOT_REQUEST_RECEIVER",
            Self::NotRequestSender => "NOT_REQUEST_SENDER",
            Self::OnboardingIncomplete => "ONBOARDING_INCOMPLETE",

            // Conflict
            Self::RequestAlreadyPending => "REQUEST_ALREADY_PENDING",
            Self::AlreadyConnected => "ALREADY_CONNECTED",

            // Business Rules
            Self::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            Self::PairBlocked => "PAIR_BLOCKED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Build the transition error for a request in its current state
    pub fn invalid_transition(request: &ConnectionRequest) -> Self {
        Self::InvalidStateTransition {
            from: request.state(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProfileNotFound(_) | Self::RequestNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::MessageTooLong { .. } | Self::CannotConnectSelf
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotRequestReceiver | Self::NotRequestSender | Self::OnboardingIncomplete
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::RequestAlreadyPending | Self::AlreadyConnected)
    }

    /// Check if this is a rejected lifecycle transition
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::InvalidStateTransition { .. } | Self::PairBlocked)
    }
}

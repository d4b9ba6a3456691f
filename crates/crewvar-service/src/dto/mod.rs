//! Request and response DTOs

mod mappers;
mod requests;
mod responses;

pub use requests::{
    ConnectionDecision, CreateProfileRequest, RespondConnectionRequest, SendConnectionRequest,
    UpdateOnboardingRequest, UpdateProfileRequest,
};
pub use responses::{
    BlockResponse, ConnectionRequestResponse, GateDecision, OnboardingStatusResponse,
    ProfileViewResponse,
};

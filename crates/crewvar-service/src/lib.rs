//! # crewvar-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    ConnectionService, OnboardingService, ProfileService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};

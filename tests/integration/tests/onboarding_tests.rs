//! End-to-end onboarding flow tests against the in-memory backend

use crewvar_core::value_objects::UserId;
use crewvar_service::dto::{GateDecision, UpdateOnboardingRequest, UpdateProfileRequest};
use crewvar_service::{OnboardingService, ProfileService, ServiceError};
use integration_tests::TestBackend;

#[tokio::test]
async fn test_unknown_user_gets_default_record() {
    let backend = TestBackend::new();
    let service = OnboardingService::new(&backend.ctx);

    let status = service.get_status(UserId::new(42)).await.unwrap();
    assert_eq!(status.progress, 0);
    assert!(!status.completed);
    assert_eq!(status.missing.len(), 6);
}

#[tokio::test]
async fn test_update_creates_record_and_recomputes_progress() {
    let backend = TestBackend::new();
    let service = OnboardingService::new(&backend.ctx);
    let user = UserId::new(1);

    // Upsert semantics: no error for a user nobody has seen before
    let status = service
        .update_status(
            user,
            UpdateOnboardingRequest {
                email_verified: Some(true),
                display_name: Some(true),
                ..UpdateOnboardingRequest::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(status.progress, 33);
    assert_eq!(
        status.missing,
        vec!["Profile Photo", "Department", "Role", "Current Ship"]
    );

    // A later partial update keeps earlier flags and recomputes
    let status = service
        .update_status(
            user,
            UpdateOnboardingRequest {
                profile_photo: Some(true),
                ..UpdateOnboardingRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(status.progress, 50);
    assert!(status.email_verified);
}

#[tokio::test]
async fn test_gate_blocks_until_every_flag_and_completed() {
    let backend = TestBackend::new();
    let service = OnboardingService::new(&backend.ctx);
    let user = UserId::new(7);

    let all_true = UpdateOnboardingRequest {
        email_verified: Some(true),
        profile_photo: Some(true),
        display_name: Some(true),
        department: Some(true),
        role: Some(true),
        ship_assignment: Some(true),
    };
    let status = service.update_status(user, all_true).await.unwrap();
    assert_eq!(status.progress, 100);

    // All six flags but no completed flag yet: still redirected
    match service.gate(user).await.unwrap() {
        GateDecision::Redirect { progress, missing } => {
            assert_eq!(progress, 100);
            assert!(missing.is_empty());
        }
        GateDecision::Allowed => panic!("gate should not open on flags alone"),
    }
    assert!(matches!(
        service.require_complete(user).await,
        Err(ServiceError::Domain(_))
    ));

    service.mark_complete(user).await.unwrap();
    assert_eq!(service.gate(user).await.unwrap(), GateDecision::Allowed);
    service.require_complete(user).await.unwrap();

    // Losing a flag re-closes the gate despite completed remaining true
    let status = service
        .update_status(
            user,
            UpdateOnboardingRequest {
                profile_photo: Some(false),
                ..UpdateOnboardingRequest::default()
            },
        )
        .await
        .unwrap();
    assert!(status.completed);
    match service.gate(user).await.unwrap() {
        GateDecision::Redirect { missing, .. } => {
            assert_eq!(missing, vec!["Profile Photo"]);
        }
        GateDecision::Allowed => panic!("stale completed flag must not open the gate"),
    }
}

#[tokio::test]
async fn test_mark_complete_fast_track_anomaly() {
    let backend = TestBackend::new();
    let service = OnboardingService::new(&backend.ctx);
    let user = UserId::new(9);

    service
        .update_status(
            user,
            UpdateOnboardingRequest {
                email_verified: Some(true),
                ..UpdateOnboardingRequest::default()
            },
        )
        .await
        .unwrap();

    // The operator override forces progress to 100 over one set flag
    let status = service.mark_complete(user).await.unwrap();
    assert!(status.completed);
    assert_eq!(status.progress, 100);
    assert_eq!(status.missing.len(), 5);

    // But the conjunctive gate still refuses the inconsistent record
    assert!(matches!(
        service.gate(user).await.unwrap(),
        GateDecision::Redirect { .. }
    ));
}

#[tokio::test]
async fn test_profile_edits_drive_the_flags() {
    let backend = TestBackend::new();
    let user = backend.seed_profile(11, "Jonas Berg", "MS Aurora").await;

    let onboarding = OnboardingService::new(&backend.ctx);
    let status = onboarding.sync_from_profile(user).await.unwrap();
    // Fixture profile has every field filled in and email verified
    assert_eq!(status.progress, 100);

    // Clearing the ship through a profile update drops the flag
    let profiles = ProfileService::new(&backend.ctx);
    profiles
        .update_profile(
            user,
            UpdateProfileRequest {
                ship: Some(String::new()),
                ..UpdateProfileRequest::default()
            },
        )
        .await
        .unwrap();

    let status = onboarding.get_status(user).await.unwrap();
    assert!(!status.ship_assignment);
    assert_eq!(status.missing, vec!["Current Ship"]);
    assert_eq!(status.progress, 83);
}

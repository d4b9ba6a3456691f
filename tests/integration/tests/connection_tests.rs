//! Connection lifecycle tests against the in-memory backend

use crewvar_core::entities::ConnectionStatus;
use crewvar_core::error::DomainError;
use crewvar_core::events::NotificationKind;
use crewvar_core::value_objects::{ConnectionState, UserId};
use crewvar_service::dto::{
    ConnectionDecision, ConnectionRequestResponse, RespondConnectionRequest, SendConnectionRequest,
};
use crewvar_service::{ConnectionService, ServiceError};
use integration_tests::TestBackend;

fn send(receiver: UserId) -> SendConnectionRequest {
    SendConnectionRequest {
        receiver_id: receiver,
        message: Some("We met on the Alaska run".to_string()),
    }
}

fn respond(decision: ConnectionDecision) -> RespondConnectionRequest {
    RespondConnectionRequest { decision }
}

async fn seeded_pair(backend: &TestBackend) -> (UserId, UserId) {
    let a = backend.seed_profile(1, "Mira Holm", "MS Aurora").await;
    let b = backend.seed_profile(2, "Jonas Berg", "MS Aurora").await;
    (a, b)
}

fn assert_domain_err<T: std::fmt::Debug>(
    result: Result<T, ServiceError>,
    check: impl FnOnce(&DomainError) -> bool,
) {
    match result {
        Err(ServiceError::Domain(e)) if check(&e) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_send_creates_pending_and_notifies_receiver() {
    let backend = TestBackend::new();
    let (a, b) = seeded_pair(&backend).await;
    let service = ConnectionService::new(&backend.ctx);

    let response = service.send_request(a, send(b)).await.unwrap();
    assert_eq!(response.status, ConnectionStatus::Pending);
    assert_eq!(response.requester_id, a);
    assert_eq!(response.receiver_id, b);

    assert_eq!(
        backend.notifier.sent_to(b, NotificationKind::ConnectionRequest),
        1
    );
    assert_eq!(
        backend.notifier.sent_to(a, NotificationKind::ConnectionRequest),
        0
    );

    let pending = service.list_pending(b).await.unwrap();
    assert_eq!(pending.len(), 1);
}

#[tokio::test]
async fn test_duplicate_send_loses_to_the_first() {
    let backend = TestBackend::new();
    let (a, b) = seeded_pair(&backend).await;
    let service = ConnectionService::new(&backend.ctx);

    service.send_request(a, send(b)).await.unwrap();
    assert_domain_err(service.send_request(a, send(b)).await, |e| {
        matches!(e, DomainError::RequestAlreadyPending)
    });

    // Same pair from the other direction occupies the same slot
    assert_domain_err(service.send_request(b, send(a)).await, |e| {
        matches!(e, DomainError::RequestAlreadyPending)
    });

    // Exactly one pending record exists
    assert_eq!(service.list_pending(b).await.unwrap().len(), 1);
    assert_eq!(service.list_pending(a).await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_self_request_and_unknown_receiver_rejected() {
    let backend = TestBackend::new();
    let (a, _) = seeded_pair(&backend).await;
    let service = ConnectionService::new(&backend.ctx);

    assert_domain_err(service.send_request(a, send(a)).await, |e| {
        matches!(e, DomainError::CannotConnectSelf)
    });

    assert_domain_err(service.send_request(a, send(UserId::new(99))).await, |e| {
        matches!(e, DomainError::ProfileNotFound(_))
    });
}

#[tokio::test]
async fn test_accept_notifies_both_parties() {
    let backend = TestBackend::new();
    let (a, b) = seeded_pair(&backend).await;
    let service = ConnectionService::new(&backend.ctx);

    let request = service.send_request(a, send(b)).await.unwrap();
    backend.notifier.clear();

    let response = service
        .respond(b, request.id, respond(ConnectionDecision::Accepted))
        .await
        .unwrap();
    assert_eq!(response.status, ConnectionStatus::Accepted);
    assert!(response.responded_at.is_some());

    assert_eq!(
        backend.notifier.sent_to(a, NotificationKind::ConnectionAccepted),
        1
    );
    assert_eq!(
        backend.notifier.sent_to(b, NotificationKind::ConnectionAccepted),
        1
    );

    assert_eq!(
        service.state_for_pair(a, b).await.unwrap(),
        ConnectionState::Accepted
    );
    assert_eq!(service.list_connections(a).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_decline_is_silent() {
    let backend = TestBackend::new();
    let (a, b) = seeded_pair(&backend).await;
    let service = ConnectionService::new(&backend.ctx);

    let request = service.send_request(a, send(b)).await.unwrap();
    backend.notifier.clear();

    let response = service
        .respond(b, request.id, respond(ConnectionDecision::Declined))
        .await
        .unwrap();
    assert_eq!(response.status, ConnectionStatus::Declined);

    // The requester hears nothing; neither does anyone else
    assert!(backend.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_resubmission_after_decline_is_allowed() {
    let backend = TestBackend::new();
    let (a, b) = seeded_pair(&backend).await;
    let service = ConnectionService::new(&backend.ctx);

    let request = service.send_request(a, send(b)).await.unwrap();
    service
        .respond(b, request.id, respond(ConnectionDecision::Declined))
        .await
        .unwrap();
    assert_eq!(
        service.state_for_pair(a, b).await.unwrap(),
        ConnectionState::Declined
    );

    // No cooldown: a new request goes straight through
    let second = service.send_request(a, send(b)).await.unwrap();
    assert_eq!(second.status, ConnectionStatus::Pending);
    assert_eq!(
        service.state_for_pair(a, b).await.unwrap(),
        ConnectionState::Pending
    );
}

#[tokio::test]
async fn test_double_accept_is_idempotent() {
    let backend = TestBackend::new();
    let (a, b) = seeded_pair(&backend).await;
    let service = ConnectionService::new(&backend.ctx);

    let request = service.send_request(a, send(b)).await.unwrap();
    backend.notifier.clear();

    let first = service
        .respond(b, request.id, respond(ConnectionDecision::Accepted))
        .await
        .unwrap();
    let retry = service
        .respond(b, request.id, respond(ConnectionDecision::Accepted))
        .await
        .unwrap();

    assert_eq!(first.status, ConnectionStatus::Accepted);
    assert_eq!(retry.status, ConnectionStatus::Accepted);

    // One round of notifications, not two
    assert_eq!(
        backend.notifier.sent_to(a, NotificationKind::ConnectionAccepted),
        1
    );
    assert_eq!(
        backend.notifier.sent_to(b, NotificationKind::ConnectionAccepted),
        1
    );
}

#[tokio::test]
async fn test_accept_cannot_overwrite_decline() {
    let backend = TestBackend::new();
    let (a, b) = seeded_pair(&backend).await;
    let service = ConnectionService::new(&backend.ctx);

    let request = service.send_request(a, send(b)).await.unwrap();
    service
        .respond(b, request.id, respond(ConnectionDecision::Declined))
        .await
        .unwrap();

    assert_domain_err(
        service
            .respond(b, request.id, respond(ConnectionDecision::Accepted))
            .await,
        |e| {
            matches!(
                e,
                DomainError::InvalidStateTransition {
                    from: ConnectionState::Declined
                }
            )
        },
    );
}

#[tokio::test]
async fn test_only_receiver_may_respond() {
    let backend = TestBackend::new();
    let (a, b) = seeded_pair(&backend).await;
    let c = backend.seed_profile(3, "Lena Voss", "MS Aurora").await;
    let service = ConnectionService::new(&backend.ctx);

    let request = service.send_request(a, send(b)).await.unwrap();

    for actor in [a, c] {
        assert_domain_err(
            service
                .respond(actor, request.id, respond(ConnectionDecision::Accepted))
                .await,
            |e| matches!(e, DomainError::NotRequestReceiver),
        );
    }
}

#[tokio::test]
async fn test_cancel_returns_pair_to_none() {
    let backend = TestBackend::new();
    let (a, b) = seeded_pair(&backend).await;
    let service = ConnectionService::new(&backend.ctx);

    let request = service.send_request(a, send(b)).await.unwrap();

    // Only the requester may cancel
    assert_domain_err(service.cancel_request(b, request.id).await, |e| {
        matches!(e, DomainError::NotRequestSender)
    });

    service.cancel_request(a, request.id).await.unwrap();
    assert_eq!(
        service.state_for_pair(a, b).await.unwrap(),
        ConnectionState::None
    );

    // And the slot is free again
    service.send_request(a, send(b)).await.unwrap();
}

#[tokio::test]
async fn test_cancel_requires_pending() {
    let backend = TestBackend::new();
    let (a, b) = seeded_pair(&backend).await;
    let service = ConnectionService::new(&backend.ctx);

    let request = service.send_request(a, send(b)).await.unwrap();
    service
        .respond(b, request.id, respond(ConnectionDecision::Accepted))
        .await
        .unwrap();

    assert_domain_err(service.cancel_request(a, request.id).await, |e| {
        matches!(
            e,
            DomainError::InvalidStateTransition {
                from: ConnectionState::Accepted
            }
        )
    });
}

#[tokio::test]
async fn test_block_preempts_send_from_either_side() {
    let backend = TestBackend::new();
    let (a, b) = seeded_pair(&backend).await;
    let service = ConnectionService::new(&backend.ctx);

    service.block(a, b).await.unwrap();
    assert_eq!(
        service.state_for_pair(a, b).await.unwrap(),
        ConnectionState::Blocked
    );

    assert_domain_err(service.send_request(b, send(a)).await, |e| {
        matches!(e, DomainError::PairBlocked)
    });
    assert_domain_err(service.send_request(a, send(b)).await, |e| {
        matches!(e, DomainError::PairBlocked)
    });

    // Unblock restores the pair
    service.unblock(a, b).await.unwrap();
    assert_eq!(
        service.state_for_pair(a, b).await.unwrap(),
        ConnectionState::None
    );
    service.send_request(b, send(a)).await.unwrap();
}

#[tokio::test]
async fn test_block_withdraws_pending_request() {
    let backend = TestBackend::new();
    let (a, b) = seeded_pair(&backend).await;
    let service = ConnectionService::new(&backend.ctx);

    let request = service.send_request(a, send(b)).await.unwrap();
    service.block(b, a).await.unwrap();

    assert!(service.list_pending(b).await.unwrap().is_empty());
    assert_domain_err(
        service
            .respond(b, request.id, respond(ConnectionDecision::Accepted))
            .await,
        |e| matches!(e, DomainError::RequestNotFound(_)),
    );

    assert_eq!(service.list_blocked(b).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_notifier_outage_does_not_fail_transitions() {
    let backend = TestBackend::new();
    let (a, b) = seeded_pair(&backend).await;
    let service = ConnectionService::new(&backend.ctx);

    backend.notifier.set_failing(true);

    let request = service.send_request(a, send(b)).await.unwrap();
    let response: ConnectionRequestResponse = service
        .respond(b, request.id, respond(ConnectionDecision::Accepted))
        .await
        .unwrap();
    assert_eq!(response.status, ConnectionStatus::Accepted);
}

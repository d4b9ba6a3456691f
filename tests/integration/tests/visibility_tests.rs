//! Profile visibility and discovery tests against the in-memory backend

use crewvar_core::value_objects::{ConnectionState, UserId};
use crewvar_service::dto::{
    ConnectionDecision, ProfileViewResponse, RespondConnectionRequest, SendConnectionRequest,
};
use crewvar_service::{ConnectionService, ProfileService};
use integration_tests::TestBackend;

fn send(receiver: UserId) -> SendConnectionRequest {
    SendConnectionRequest {
        receiver_id: receiver,
        message: None,
    }
}

fn assert_basic_only(view: &ProfileViewResponse) {
    assert!(view.extended.is_none(), "extended tier must not leak");
    assert!(!view.basic.display_name.is_empty());
}

#[tokio::test]
async fn test_stranger_sees_basic_only() {
    let backend = TestBackend::new();
    let a = backend.seed_profile(1, "Mira Holm", "MS Aurora").await;
    let b = backend.seed_profile(2, "Jonas Berg", "MS Aurora").await;
    let profiles = ProfileService::new(&backend.ctx);

    let view = profiles.view_profile(a, b).await.unwrap();
    assert_eq!(view.connection_state, ConnectionState::None);
    assert_basic_only(&view);
}

#[tokio::test]
async fn test_pending_sees_exactly_what_a_stranger_sees() {
    let backend = TestBackend::new();
    let a = backend.seed_profile(1, "Mira Holm", "MS Aurora").await;
    let b = backend.seed_profile(2, "Jonas Berg", "MS Aurora").await;
    let profiles = ProfileService::new(&backend.ctx);

    let before = profiles.view_profile(a, b).await.unwrap();

    ConnectionService::new(&backend.ctx)
        .send_request(a, send(b))
        .await
        .unwrap();

    let pending = profiles.view_profile(a, b).await.unwrap();
    assert_eq!(pending.connection_state, ConnectionState::Pending);
    assert_basic_only(&pending);
    // Field for field, pending discloses nothing beyond the stranger view
    assert_eq!(pending.basic, before.basic);
    assert_eq!(pending.extended, before.extended);
}

#[tokio::test]
async fn test_accept_roundtrip_unlocks_extended() {
    let backend = TestBackend::new();
    let a = backend.seed_profile(1, "Mira Holm", "MS Aurora").await;
    let b = backend.seed_profile(2, "Jonas Berg", "MS Aurora").await;
    let connections = ConnectionService::new(&backend.ctx);
    let profiles = ProfileService::new(&backend.ctx);

    let request = connections.send_request(a, send(b)).await.unwrap();
    connections
        .respond(
            b,
            request.id,
            RespondConnectionRequest {
                decision: ConnectionDecision::Accepted,
            },
        )
        .await
        .unwrap();

    // Both directions unlock
    for (viewer, owner) in [(a, b), (b, a)] {
        let view = profiles.view_profile(viewer, owner).await.unwrap();
        assert_eq!(view.connection_state, ConnectionState::Accepted);
        let extended = view.extended.expect("accepted pair gets the extended tier");
        assert!(!extended.contact_email.is_empty());
        assert!(!extended.photos.is_empty());
        assert!(extended.bio.is_some());
    }
}

#[tokio::test]
async fn test_decline_roundtrip_stays_basic() {
    let backend = TestBackend::new();
    let a = backend.seed_profile(1, "Mira Holm", "MS Aurora").await;
    let b = backend.seed_profile(2, "Jonas Berg", "MS Aurora").await;
    let connections = ConnectionService::new(&backend.ctx);
    let profiles = ProfileService::new(&backend.ctx);

    let stranger_view = profiles.view_profile(a, b).await.unwrap();

    let request = connections.send_request(a, send(b)).await.unwrap();
    connections
        .respond(
            b,
            request.id,
            RespondConnectionRequest {
                decision: ConnectionDecision::Declined,
            },
        )
        .await
        .unwrap();

    let declined_view = profiles.view_profile(a, b).await.unwrap();
    assert_eq!(declined_view.connection_state, ConnectionState::Declined);
    assert_basic_only(&declined_view);
    // Identical field set to the stranger view
    assert_eq!(declined_view.basic, stranger_view.basic);
    assert_eq!(declined_view.extended, stranger_view.extended);
}

#[tokio::test]
async fn test_own_profile_always_extended() {
    let backend = TestBackend::new();
    let a = backend.seed_profile(1, "Mira Holm", "MS Aurora").await;
    let profiles = ProfileService::new(&backend.ctx);

    let view = profiles.view_profile(a, a).await.unwrap();
    assert!(view.extended.is_some());
}

#[tokio::test]
async fn test_block_hides_extended_even_when_accepted() {
    let backend = TestBackend::new();
    let a = backend.seed_profile(1, "Mira Holm", "MS Aurora").await;
    let b = backend.seed_profile(2, "Jonas Berg", "MS Aurora").await;
    let connections = ConnectionService::new(&backend.ctx);
    let profiles = ProfileService::new(&backend.ctx);

    let request = connections.send_request(a, send(b)).await.unwrap();
    connections
        .respond(
            b,
            request.id,
            RespondConnectionRequest {
                decision: ConnectionDecision::Accepted,
            },
        )
        .await
        .unwrap();

    connections.block(b, a).await.unwrap();

    let view = profiles.view_profile(a, b).await.unwrap();
    assert_eq!(view.connection_state, ConnectionState::Blocked);
    assert_basic_only(&view);
}

#[tokio::test]
async fn test_shipmates_filters_blocked_and_gates_extended() {
    let backend = TestBackend::new();
    let viewer = backend.seed_profile(1, "Mira Holm", "MS Aurora").await;
    let friend = backend.seed_profile(2, "Jonas Berg", "MS Aurora").await;
    let stranger = backend.seed_profile(3, "Lena Voss", "MS Aurora").await;
    let enemy = backend.seed_profile(4, "Petra Kroon", "MS Aurora").await;
    let _elsewhere = backend.seed_profile(5, "Oskar Lind", "MS Borealis").await;

    let connections = ConnectionService::new(&backend.ctx);
    let profiles = ProfileService::new(&backend.ctx);

    let request = connections.send_request(viewer, send(friend)).await.unwrap();
    connections
        .respond(
            friend,
            request.id,
            RespondConnectionRequest {
                decision: ConnectionDecision::Accepted,
            },
        )
        .await
        .unwrap();
    connections.block(viewer, enemy).await.unwrap();

    let cards = profiles.shipmates(viewer, "MS Aurora").await.unwrap();

    // Viewer, blocked pair and the other ship are all absent
    let ids: Vec<UserId> = cards.iter().map(|c| c.basic.user_id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&friend));
    assert!(ids.contains(&stranger));

    for card in &cards {
        if card.basic.user_id == friend {
            assert!(card.extended.is_some());
        } else {
            assert!(card.extended.is_none());
        }
    }
}

//! In-memory implementations of the data-access and notification ports
//!
//! Each store mutates under one mutex, mirroring the per-document
//! atomicity the PostgreSQL implementations get from single statements:
//! `create_pending` checks-and-inserts in one critical section and
//! `mark_responded` only flips a pending record.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crewvar_core::entities::{ConnectionRequest, ConnectionStatus, CrewProfile, OnboardingStatus};
use crewvar_core::error::DomainError;
use crewvar_core::events::{Notification, NotificationKind};
use crewvar_core::traits::{
    Block, BlockRepository, ConnectionRepository, Notifier, OnboardingRepository,
    ProfileRepository, RepoResult,
};
use crewvar_core::value_objects::{PairKey, RequestId, UserId};
use crewvar_service::{ServiceContext, ServiceContextBuilder};

// ============================================================================
// Profiles
// ============================================================================

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<UserId, CrewProfile>>,
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, user_id: UserId) -> RepoResult<Option<CrewProfile>> {
        Ok(self.profiles.lock().get(&user_id).cloned())
    }

    async fn find_by_ship(&self, ship: &str) -> RepoResult<Vec<CrewProfile>> {
        let mut profiles: Vec<CrewProfile> = self
            .profiles
            .lock()
            .values()
            .filter(|p| p.ship.as_deref() == Some(ship))
            .cloned()
            .collect();
        profiles.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(profiles)
    }

    async fn create(&self, profile: &CrewProfile) -> RepoResult<()> {
        self.profiles
            .lock()
            .insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &CrewProfile) -> RepoResult<()> {
        let mut profiles = self.profiles.lock();
        if !profiles.contains_key(&profile.user_id) {
            return Err(DomainError::ProfileNotFound(profile.user_id));
        }
        profiles.insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn update_last_seen(&self, user_id: UserId, at: DateTime<Utc>) -> RepoResult<()> {
        let mut profiles = self.profiles.lock();
        let profile = profiles
            .get_mut(&user_id)
            .ok_or(DomainError::ProfileNotFound(user_id))?;
        profile.last_seen_at = Some(at);
        Ok(())
    }
}

// ============================================================================
// Onboarding
// ============================================================================

#[derive(Default)]
pub struct InMemoryOnboardingRepository {
    records: Mutex<HashMap<UserId, OnboardingStatus>>,
}

#[async_trait]
impl OnboardingRepository for InMemoryOnboardingRepository {
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Option<OnboardingStatus>> {
        Ok(self.records.lock().get(&user_id).cloned())
    }

    async fn upsert(&self, status: &OnboardingStatus) -> RepoResult<()> {
        self.records.lock().insert(status.user_id, status.clone());
        Ok(())
    }
}

// ============================================================================
// Connections
// ============================================================================

#[derive(Default)]
pub struct InMemoryConnectionRepository {
    requests: Mutex<HashMap<RequestId, ConnectionRequest>>,
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn find_by_id(&self, id: RequestId) -> RepoResult<Option<ConnectionRequest>> {
        Ok(self.requests.lock().get(&id).cloned())
    }

    async fn find_active_by_pair(&self, pair: PairKey) -> RepoResult<Option<ConnectionRequest>> {
        Ok(self
            .requests
            .lock()
            .values()
            .find(|r| r.pair_key() == pair && r.status.is_active())
            .cloned())
    }

    async fn find_latest_by_pair(&self, pair: PairKey) -> RepoResult<Option<ConnectionRequest>> {
        Ok(self
            .requests
            .lock()
            .values()
            .filter(|r| r.pair_key() == pair)
            .max_by_key(|r| (r.created_at, r.id))
            .cloned())
    }

    async fn create_pending(&self, request: &ConnectionRequest) -> RepoResult<()> {
        // Check-and-insert under one lock, like the partial unique index
        let mut requests = self.requests.lock();
        if requests
            .values()
            .any(|r| r.pair_key() == request.pair_key() && r.status.is_active())
        {
            return Err(DomainError::RequestAlreadyPending);
        }
        requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn mark_responded(
        &self,
        id: RequestId,
        status: ConnectionStatus,
    ) -> RepoResult<Option<ConnectionRequest>> {
        let mut requests = self.requests.lock();
        match requests.get_mut(&id) {
            Some(request) if request.is_pending() => {
                request.status = status;
                request.responded_at = Some(Utc::now());
                Ok(Some(request.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, id: RequestId) -> RepoResult<()> {
        self.requests
            .lock()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::RequestNotFound(id))
    }

    async fn list_pending_for(&self, receiver_id: UserId) -> RepoResult<Vec<ConnectionRequest>> {
        let mut requests: Vec<ConnectionRequest> = self
            .requests
            .lock()
            .values()
            .filter(|r| r.receiver_id == receiver_id && r.is_pending())
            .cloned()
            .collect();
        requests.sort_by_key(|r| std::cmp::Reverse((r.created_at, r.id)));
        Ok(requests)
    }

    async fn list_accepted_for(&self, user_id: UserId) -> RepoResult<Vec<ConnectionRequest>> {
        let mut requests: Vec<ConnectionRequest> = self
            .requests
            .lock()
            .values()
            .filter(|r| r.is_party(user_id) && r.is_accepted())
            .cloned()
            .collect();
        requests.sort_by_key(|r| std::cmp::Reverse((r.responded_at, r.id)));
        Ok(requests)
    }
}

// ============================================================================
// Blocks
// ============================================================================

#[derive(Default)]
pub struct InMemoryBlockRepository {
    blocks: Mutex<HashMap<(UserId, UserId), Block>>,
}

#[async_trait]
impl BlockRepository for InMemoryBlockRepository {
    async fn is_blocked(&self, pair: PairKey) -> RepoResult<bool> {
        let blocks = self.blocks.lock();
        Ok(blocks.contains_key(&(pair.lo(), pair.hi()))
            || blocks.contains_key(&(pair.hi(), pair.lo())))
    }

    async fn find(&self, blocker_id: UserId, blocked_id: UserId) -> RepoResult<Option<Block>> {
        Ok(self.blocks.lock().get(&(blocker_id, blocked_id)).cloned())
    }

    async fn create(&self, block: &Block) -> RepoResult<()> {
        self.blocks
            .lock()
            .entry((block.blocker_id, block.blocked_id))
            .or_insert_with(|| block.clone());
        Ok(())
    }

    async fn delete(&self, blocker_id: UserId, blocked_id: UserId) -> RepoResult<()> {
        self.blocks.lock().remove(&(blocker_id, blocked_id));
        Ok(())
    }

    async fn list_blocked_by(&self, blocker_id: UserId) -> RepoResult<Vec<Block>> {
        let mut blocks: Vec<Block> = self
            .blocks
            .lock()
            .values()
            .filter(|b| b.blocker_id == blocker_id)
            .cloned()
            .collect();
        blocks.sort_by_key(|b| std::cmp::Reverse(b.created_at));
        Ok(blocks)
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Records every dispatched notification; can be told to fail so tests
/// can assert dispatch is best-effort.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    /// All notifications dispatched so far
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }

    /// Notifications of a given kind addressed to a given user
    pub fn sent_to(&self, user_id: UserId, kind: NotificationKind) -> usize {
        self.sent
            .lock()
            .iter()
            .filter(|n| n.user_id == user_id && n.kind == kind)
            .count()
    }

    /// Forget everything dispatched so far
    pub fn clear(&self) {
        self.sent.lock().clear();
    }

    /// Make subsequent dispatches fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) -> RepoResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::InternalError(
                "notification channel down".to_string(),
            ));
        }
        self.sent.lock().push(notification);
        Ok(())
    }
}

// ============================================================================
// Backend harness
// ============================================================================

/// Everything a scenario test needs: a service context wired to in-memory
/// stores, with handles kept on the pieces tests assert against.
pub struct TestBackend {
    pub ctx: ServiceContext,
    pub notifier: Arc<RecordingNotifier>,
    pub profiles: Arc<InMemoryProfileRepository>,
}

impl TestBackend {
    pub fn new() -> Self {
        let profiles = Arc::new(InMemoryProfileRepository::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let ctx = ServiceContextBuilder::new()
            .profile_repo(profiles.clone())
            .onboarding_repo(Arc::new(InMemoryOnboardingRepository::default()))
            .connection_repo(Arc::new(InMemoryConnectionRepository::default()))
            .block_repo(Arc::new(InMemoryBlockRepository::default()))
            .notifier(notifier.clone())
            .build()
            .expect("all dependencies provided");

        Self {
            ctx,
            notifier,
            profiles,
        }
    }

    /// Seed a fully filled-in profile and return its id
    pub async fn seed_profile(&self, id: i64, name: &str, ship: &str) -> UserId {
        let profile = crate::fixtures::crew_profile(id, name, ship);
        let user_id = profile.user_id;
        self.profiles
            .create(&profile)
            .await
            .expect("in-memory create never fails");
        user_id
    }
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}

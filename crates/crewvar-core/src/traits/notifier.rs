//! Notification port - the boundary to the notification collaborator

use async_trait::async_trait;

use crate::events::Notification;
use crate::traits::repositories::RepoResult;

/// Notification dispatch boundary
///
/// Dispatch is best-effort: callers log failures and carry on, a failed
/// notification never aborts the transition that produced it.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification to its addressee
    async fn notify(&self, notification: Notification) -> RepoResult<()>;
}

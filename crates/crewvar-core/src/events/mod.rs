//! Events emitted when domain state changes

mod notification;

pub use notification::{Notification, NotificationKind};

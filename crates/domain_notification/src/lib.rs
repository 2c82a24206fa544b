//! Notification Fan-out Domain
//!
//! Distributes business events into per-recipient inboxes with unread
//! tracking. Delivery is pulled, not pushed: inboxes grow append-only and
//! clients poll `list_notifications`.
//!
//! Fan-out is best-effort. A failed inbox write is logged and swallowed so
//! it never aborts the business operation that triggered it.

pub mod error;
pub mod fanout;
pub mod inbox;
pub mod notification;
pub mod ports;

pub use error::NotificationError;
pub use fanout::{NotificationService, Notifier};
pub use inbox::NotificationInbox;
pub use notification::{Notification, NotificationDraft, NotificationKind};
pub use ports::InboxPort;

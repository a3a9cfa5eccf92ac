//! Collaborator interfaces: the entity stores and the device-token notifier.
//!
//! The account layer never owns users or dialogs; it asks these traits whether
//! an entity is known and, on some paths, tells them to create one.

use async_trait::async_trait;
use tessera_tl as tl;
use tokio::sync::mpsc;

use crate::ids::{DialogId, UserId};

// ─── ServiceUser ──────────────────────────────────────────────────────────────

/// Pseudo-users that stand in when the server sends no usable sender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServiceUser {
    /// Telegram's service-notifications account.
    ServiceNotifications,
    /// The bot that posts on behalf of anonymous group admins.
    AnonymousBot,
}

impl ServiceUser {
    /// The well-known user id of this pseudo-user.
    pub fn user_id(self) -> UserId {
        match self {
            Self::ServiceNotifications => UserId(777_000),
            Self::AnonymousBot         => UserId(1_087_968_824),
        }
    }
}

// ─── UserDirectory ────────────────────────────────────────────────────────────

/// Local knowledge about users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Whether `user_id` is known locally.  Never touches the network.
    fn have_user(&self, user_id: UserId) -> bool;

    /// Whether `user_id` is known, loading it from storage or the server first
    /// if needed.
    async fn have_user_force(&self, user_id: UserId) -> bool;

    /// Make sure the pseudo-user `kind` exists locally and return its id.
    fn add_service_user(&self, kind: ServiceUser) -> UserId;

    /// Absorb users that came along with a reply.
    fn on_get_users(&self, users: Vec<tl::enums::User>, source: &'static str);
}

// ─── DialogDirectory ──────────────────────────────────────────────────────────

/// Local knowledge about conversations.
#[async_trait]
pub trait DialogDirectory: Send + Sync {
    /// Whether a full local dialog exists for `dialog_id`.
    fn have_dialog(&self, dialog_id: DialogId) -> bool;

    /// Whether at least the minimal information needed to create the dialog is
    /// known.
    fn have_dialog_info(&self, dialog_id: DialogId) -> bool;

    /// Whether the dialog exists, loading it (and creating the local dialog)
    /// first if needed.
    async fn have_dialog_force(&self, dialog_id: DialogId, source: &'static str) -> bool;

    /// Create the local dialog from whatever information is available.  Check
    /// [`have_dialog`](Self::have_dialog) afterwards; creation can fail.
    fn force_create_dialog(&self, dialog_id: DialogId, source: &'static str);
}

// ─── DeviceNotifier ───────────────────────────────────────────────────────────

/// Events the account layer emits for other components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountEvent {
    /// Other sessions were terminated; push-notification tokens must be
    /// registered again.
    ReregisterDevice,
}

/// Receiver of fire-and-forget device-token notifications.
pub trait DeviceNotifier: Send + Sync {
    fn reregister_device(&self);
}

impl DeviceNotifier for mpsc::UnboundedSender<AccountEvent> {
    fn reregister_device(&self) {
        if self.send(AccountEvent::ReregisterDevice).is_err() {
            tracing::debug!("[tessera] device notifier is gone, re-registration skipped");
        }
    }
}

/// Notifier that drops every event; used when no device manager is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDevice;

impl DeviceNotifier for NoDevice {
    fn reregister_device(&self) {}
}

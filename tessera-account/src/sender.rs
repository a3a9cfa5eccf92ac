//! Message-sender identities.
//!
//! Two directions:
//! * wire → domain: peers from a reply become [`DialogId`]s / [`MessageSender`]s,
//!   dropping the ones that cannot be used;
//! * domain → wire: a caller-supplied [`MessageSender`] is validated under a
//!   [`ValidationPolicy`] and becomes an [`Identity`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tessera_tl as tl;

use crate::directory::{DialogDirectory, ServiceUser, UserDirectory};
use crate::errors::{ServerAnomaly, ValidationError};
use crate::ids::{DialogId, DialogType, UserId};

// ─── Types ────────────────────────────────────────────────────────────────────

/// Who sent something, as shown to (or supplied by) the application.
///
/// Ids are not validated; see [`SenderResolver::resolve_sender`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MessageSender {
    User(UserId),
    Chat(DialogId),
}

/// A validated sender.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Identity {
    /// No sender.
    #[default]
    Empty,
    User(UserId),
    Chat(DialogId),
}

impl Identity {
    /// The dialog this identity names; the empty dialog id for [`Identity::Empty`].
    pub fn dialog_id(self) -> DialogId {
        match self {
            Self::Empty           => DialogId::default(),
            Self::User(user_id)   => DialogId::from_user(user_id),
            Self::Chat(dialog_id) => dialog_id,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

/// How strictly [`SenderResolver::resolve_sender`] checks its input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Require the sender to be known locally, loading it if necessary.
    pub check_access: bool,
    /// Accept a missing sender, or the `0` id, as [`Identity::Empty`].
    pub allow_empty:  bool,
}

impl ValidationPolicy {
    pub fn new(check_access: bool, allow_empty: bool) -> Self {
        Self { check_access, allow_empty }
    }
}

/// A filtered sender list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MessageSenders {
    pub total_count: usize,
    pub senders:     Vec<MessageSender>,
}

// ─── SenderResolver ───────────────────────────────────────────────────────────

/// Sender resolution against the local user and dialog stores.
///
/// Holds no state of its own; obtain one from [`crate::Account::senders`] or
/// build it directly over any pair of directories.
#[derive(Clone, Copy)]
pub struct SenderResolver<'a> {
    users:   &'a dyn UserDirectory,
    dialogs: &'a dyn DialogDirectory,
    is_bot:  bool,
}

impl<'a> SenderResolver<'a> {
    pub fn new(users: &'a dyn UserDirectory, dialogs: &'a dyn DialogDirectory, is_bot: bool) -> Self {
        Self { users, dialogs, is_bot }
    }

    // ── wire → domain ──────────────────────────────────────────────────────

    /// Turn the peers of a reply into dialog ids, keeping only the ones that can
    /// be shown.  Order is preserved.
    ///
    /// Users must already be known; this never triggers a lookup for them.
    /// Other dialogs are created locally when enough information is known.
    pub fn sender_dialog_ids(&self, peers: &[tl::enums::Peer]) -> Vec<DialogId> {
        let mut out = Vec::with_capacity(peers.len());
        for peer in peers {
            let dialog_id = DialogId::from_peer(peer);
            if !dialog_id.is_valid() {
                ServerAnomaly::InvalidPeer { peer: peer.clone() }.report();
                continue;
            }
            if dialog_id.get_type() == DialogType::User {
                let user_id = dialog_id.get_user_id();
                if !self.users.have_user(user_id) {
                    ServerAnomaly::UnknownUser { user_id: user_id.get() }.report();
                    continue;
                }
            } else {
                if !self.dialogs.have_dialog_info(dialog_id) {
                    continue;
                }
                self.dialogs.force_create_dialog(dialog_id, "sender_dialog_ids");
                if !self.dialogs.have_dialog(dialog_id) {
                    continue;
                }
            }
            out.push(dialog_id);
        }
        out
    }

    /// [`sender_dialog_ids`](Self::sender_dialog_ids) followed by
    /// [`ensure_sender_for_dialog`](Self::ensure_sender_for_dialog) on each survivor.
    pub fn convert_senders(&self, peers: &[tl::enums::Peer]) -> MessageSenders {
        let senders: Vec<_> = self
            .sender_dialog_ids(peers)
            .into_iter()
            .map(|dialog_id| self.ensure_sender_for_dialog(dialog_id, "convert_senders"))
            .collect();
        MessageSenders { total_count: senders.len(), senders }
    }

    // ── domain → wire ──────────────────────────────────────────────────────

    /// Validate a caller-supplied sender.
    ///
    /// # Panics
    /// If a chat id passes validation but has no dialog type, which would mean
    /// [`DialogId::is_valid`] and [`DialogId::get_type`] disagree.
    pub async fn resolve_sender(
        &self,
        sender: Option<&MessageSender>,
        policy: ValidationPolicy,
    ) -> Result<Identity, ValidationError> {
        let Some(sender) = sender else {
            return if policy.allow_empty { Ok(Identity::Empty) } else { Err(ValidationError::SenderEmpty) };
        };
        match *sender {
            MessageSender::User(user_id) => {
                if !user_id.is_valid() {
                    if policy.allow_empty && user_id == UserId::default() {
                        return Ok(Identity::Empty);
                    }
                    return Err(ValidationError::UserIdInvalid);
                }
                if policy.check_access && !self.users.have_user_force(user_id).await {
                    return Err(ValidationError::UserUnknown);
                }
                Ok(Identity::User(user_id))
            }
            MessageSender::Chat(dialog_id) => {
                if !dialog_id.is_valid() {
                    if policy.allow_empty && dialog_id == DialogId::default() {
                        return Ok(Identity::Empty);
                    }
                    return Err(ValidationError::ChatIdInvalid);
                }
                if policy.check_access {
                    let known = match dialog_id.get_type() {
                        DialogType::User => self.users.have_user_force(dialog_id.get_user_id()).await,
                        DialogType::Chat | DialogType::Channel | DialogType::SecretChat => {
                            self.dialogs.have_dialog_force(dialog_id, "resolve_sender").await
                        }
                        DialogType::None => unreachable!("validated {dialog_id} has no dialog type"),
                    };
                    if !known {
                        return Err(ValidationError::ChatUnknown);
                    }
                }
                Ok(Identity::Chat(dialog_id))
            }
        }
    }

    // ── projection ─────────────────────────────────────────────────────────

    /// Project a sender without touching any store.
    ///
    /// A valid, locally known dialog wins; otherwise the user is used.  An
    /// invalid user id is reported and replaced by the service-notifications
    /// user.
    pub fn sender(&self, user_id: UserId, dialog_id: DialogId, source: &'static str) -> MessageSender {
        if dialog_id.is_valid() && self.dialogs.have_dialog(dialog_id) {
            return MessageSender::Chat(dialog_id);
        }
        if user_id.is_valid() {
            return MessageSender::User(user_id);
        }
        ServerAnomaly::InvalidSender { user_id: user_id.get(), dialog_id: dialog_id.get(), source }.report();
        MessageSender::User(ServiceUser::ServiceNotifications.user_id())
    }

    /// [`sender`](Self::sender) for a bare dialog id.
    pub fn sender_for_dialog(&self, dialog_id: DialogId, source: &'static str) -> MessageSender {
        match dialog_id.get_type() {
            DialogType::User => self.sender(dialog_id.get_user_id(), DialogId::default(), source),
            _ => self.sender(UserId::default(), dialog_id, source),
        }
    }

    /// Like [`sender`](Self::sender), but first makes the stores able to answer:
    /// a valid dialog that is not known yet is created, and a bot account
    /// registers the pseudo-users used as fallback senders.
    pub fn ensure_sender(&self, user_id: UserId, dialog_id: DialogId, source: &'static str) -> MessageSender {
        if dialog_id.is_valid() && !self.dialogs.have_dialog(dialog_id) {
            ServerAnomaly::MissingDialog { dialog_id: dialog_id.get(), source }.report();
            self.dialogs.force_create_dialog(dialog_id, source);
        }
        if !user_id.is_valid() && self.is_bot {
            self.users.add_service_user(ServiceUser::AnonymousBot);
            self.users.add_service_user(ServiceUser::ServiceNotifications);
        }
        self.sender(user_id, dialog_id, source)
    }

    /// [`ensure_sender`](Self::ensure_sender) for a bare dialog id.
    pub fn ensure_sender_for_dialog(&self, dialog_id: DialogId, source: &'static str) -> MessageSender {
        match dialog_id.get_type() {
            DialogType::User => self.ensure_sender(dialog_id.get_user_id(), DialogId::default(), source),
            _ => self.ensure_sender(UserId::default(), dialog_id, source),
        }
    }
}

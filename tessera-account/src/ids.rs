//! Typed identifiers for users and dialogs.
//!
//! A [`DialogId`] packs every kind of conversation into one `i64`:
//!
//! | Kind        | Encoding                                  |
//! |-------------|-------------------------------------------|
//! | user        | `user_id` (positive)                      |
//! | basic group | `-chat_id`                                |
//! | channel     | `-1_000_000_000_000 - channel_id`         |
//! | secret chat | `-2_000_000_000_000 + secret_chat_id`     |
//!
//! `0` is the "no id" sentinel for every type and is never valid.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tessera_tl as tl;

const ZERO_CHANNEL_ID: i64     = -1_000_000_000_000;
const ZERO_SECRET_CHAT_ID: i64 = -2_000_000_000_000;

// ─── UserId ───────────────────────────────────────────────────────────────────

/// Identifier of a user or bot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserId(pub i64);

impl UserId {
    /// Largest id the server hands out for users.
    pub const MAX: i64 = (1 << 40) - 1;

    pub fn get(self) -> i64 { self.0 }

    pub fn is_valid(self) -> bool {
        0 < self.0 && self.0 <= Self::MAX
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user {}", self.0)
    }
}

// ─── ChatId / ChannelId / SecretChatId ───────────────────────────────────────

/// Identifier of a basic group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChatId(pub i64);

impl ChatId {
    pub const MAX: i64 = 999_999_999_999;

    pub fn is_valid(self) -> bool {
        0 < self.0 && self.0 <= Self::MAX
    }
}

/// Identifier of a channel or supergroup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelId(pub i64);

impl ChannelId {
    pub const MAX: i64 = 1_000_000_000_000 - (1 << 31);

    pub fn is_valid(self) -> bool {
        0 < self.0 && self.0 <= Self::MAX
    }
}

/// Identifier of an end-to-end encrypted chat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SecretChatId(pub i32);

impl SecretChatId {
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

// ─── DialogId ─────────────────────────────────────────────────────────────────

/// What kind of conversation a [`DialogId`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialogType {
    /// Not a valid dialog id.
    None,
    User,
    Chat,
    Channel,
    SecretChat,
}

/// Identifier of any conversation; see the module docs for the encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DialogId(pub i64);

impl DialogId {
    pub fn get(self) -> i64 { self.0 }

    pub fn from_user(user_id: UserId) -> Self {
        Self(user_id.0)
    }

    /// An id too large to encode gives the invalid `DialogId`.
    pub fn from_chat(chat_id: ChatId) -> Self {
        chat_id.0.checked_neg().map(Self).unwrap_or_default()
    }

    /// An id too large to encode gives the invalid `DialogId`.
    pub fn from_channel(channel_id: ChannelId) -> Self {
        ZERO_CHANNEL_ID.checked_sub(channel_id.0).map(Self).unwrap_or_default()
    }

    pub fn from_secret_chat(secret_chat_id: SecretChatId) -> Self {
        Self(ZERO_SECRET_CHAT_ID + secret_chat_id.0 as i64)
    }

    /// Decode a wire peer.  Out-of-range ids produce an invalid `DialogId`
    /// rather than an error; check [`is_valid`](Self::is_valid).
    pub fn from_peer(peer: &tl::enums::Peer) -> Self {
        match peer {
            tl::enums::Peer::User(p) => {
                let user_id = UserId(p.user_id);
                if user_id.is_valid() { Self::from_user(user_id) } else { Self::default() }
            }
            tl::enums::Peer::Chat(p) => {
                let chat_id = ChatId(p.chat_id);
                if chat_id.is_valid() { Self::from_chat(chat_id) } else { Self::default() }
            }
            tl::enums::Peer::Channel(p) => {
                let channel_id = ChannelId(p.channel_id);
                if channel_id.is_valid() { Self::from_channel(channel_id) } else { Self::default() }
            }
        }
    }

    pub fn get_type(self) -> DialogType {
        let id = self.0;
        if id < 0 {
            if -ChatId::MAX <= id {
                return DialogType::Chat;
            }
            if ZERO_CHANNEL_ID - ChannelId::MAX <= id && id < ZERO_CHANNEL_ID {
                return DialogType::Channel;
            }
            let secret = (ZERO_SECRET_CHAT_ID + i32::MIN as i64)..=(ZERO_SECRET_CHAT_ID + i32::MAX as i64);
            if secret.contains(&id) && id != ZERO_SECRET_CHAT_ID {
                return DialogType::SecretChat;
            }
        } else if 0 < id && id <= UserId::MAX {
            return DialogType::User;
        }
        DialogType::None
    }

    pub fn is_valid(self) -> bool {
        self.get_type() != DialogType::None
    }

    /// The user behind a user-typed dialog, or the empty user id.
    pub fn get_user_id(self) -> UserId {
        match self.get_type() {
            DialogType::User => UserId(self.0),
            _ => UserId::default(),
        }
    }

    pub fn get_chat_id(self) -> ChatId {
        match self.get_type() {
            DialogType::Chat => ChatId(-self.0),
            _ => ChatId::default(),
        }
    }

    pub fn get_channel_id(self) -> ChannelId {
        match self.get_type() {
            DialogType::Channel => ChannelId(ZERO_CHANNEL_ID - self.0),
            _ => ChannelId::default(),
        }
    }

    pub fn get_secret_chat_id(self) -> SecretChatId {
        match self.get_type() {
            DialogType::SecretChat => SecretChatId((self.0 - ZERO_SECRET_CHAT_ID) as i32),
            _ => SecretChatId::default(),
        }
    }
}

impl From<UserId> for DialogId {
    fn from(user_id: UserId) -> Self { Self::from_user(user_id) }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get_type() {
            DialogType::None       => write!(f, "invalid chat {}", self.0),
            DialogType::User       => write!(f, "user {}", self.0),
            DialogType::Chat       => write!(f, "basic group {}", self.get_chat_id().0),
            DialogType::Channel    => write!(f, "supergroup {}", self.get_channel_id().0),
            DialogType::SecretChat => write!(f, "secret chat {}", self.get_secret_chat_id().0),
        }
    }
}

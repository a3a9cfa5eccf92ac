//! Per-chat action bar: the strip above a conversation that offers to report
//! spam, add a contact, share the phone number, and so on.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tessera_tl::deserialize::{Buffer, Result};
use tessera_tl::{Deserializable, Serializable};

use crate::ids::DialogType;

const HAS_DISTANCE: u32 = 1 << 7;

/// Action-bar state of one dialog, as reported by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DialogActionBar {
    /// Distance to the peer in metres; `-1` if unknown.
    distance:               i32,
    can_report_spam:        bool,
    can_add_contact:        bool,
    can_block_user:         bool,
    can_share_phone_number: bool,
    can_report_location:    bool,
    can_unarchive:          bool,
    can_invite_members:     bool,
}

/// What the application should show above the chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChatActionBar {
    ReportSpam { can_unarchive: bool },
    ReportUnrelatedLocation,
    InviteMembers,
    ReportAddBlock { can_unarchive: bool, distance: i32 },
    AddContact,
    SharePhoneNumber,
}

impl Default for DialogActionBar {
    fn default() -> Self {
        Self {
            distance:               -1,
            can_report_spam:        false,
            can_add_contact:        false,
            can_block_user:         false,
            can_share_phone_number: false,
            can_report_location:    false,
            can_unarchive:          false,
            can_invite_members:     false,
        }
    }
}

impl DialogActionBar {
    /// Build the bar from server flags; `None` if there is nothing to show.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        can_report_spam:        bool,
        can_add_contact:        bool,
        can_block_user:         bool,
        can_share_phone_number: bool,
        can_report_location:    bool,
        can_unarchive:          bool,
        distance:               i32,
        can_invite_members:     bool,
    ) -> Option<Self> {
        let bar = Self {
            distance: distance.max(-1),
            can_report_spam,
            can_add_contact,
            can_block_user,
            can_share_phone_number,
            can_report_location,
            can_unarchive,
            can_invite_members,
        };
        (!bar.is_empty()).then_some(bar)
    }

    pub fn is_empty(&self) -> bool {
        !self.can_report_spam
            && !self.can_add_contact
            && !self.can_block_user
            && !self.can_share_phone_number
            && !self.can_report_location
            && !self.can_unarchive
            && !self.can_invite_members
            && self.distance < 0
    }

    pub fn can_report_spam(&self) -> bool { self.can_report_spam }
    pub fn can_unarchive(&self) -> bool { self.can_unarchive }
    pub fn distance(&self) -> Option<i32> { (self.distance >= 0).then_some(self.distance) }

    /// The single bar to display.  `hide_unarchive` is set while the chat is
    /// still in the archive; only the add-contact offer survives it.
    pub fn chat_action_bar(&self, dialog_type: DialogType, hide_unarchive: bool) -> Option<ChatActionBar> {
        if self.can_report_location {
            debug_assert_eq!(dialog_type, DialogType::Channel);
            return Some(ChatActionBar::ReportUnrelatedLocation);
        }
        if self.can_invite_members {
            return Some(ChatActionBar::InviteMembers);
        }
        if self.can_share_phone_number {
            debug_assert_eq!(dialog_type, DialogType::User);
            return Some(ChatActionBar::SharePhoneNumber);
        }
        if hide_unarchive {
            return self.can_add_contact.then_some(ChatActionBar::AddContact);
        }
        if self.can_block_user {
            debug_assert_eq!(dialog_type, DialogType::User);
            return Some(ChatActionBar::ReportAddBlock { can_unarchive: self.can_unarchive, distance: self.distance });
        }
        if self.can_add_contact {
            return Some(ChatActionBar::AddContact);
        }
        if self.can_report_spam {
            return Some(ChatActionBar::ReportSpam { can_unarchive: self.can_unarchive });
        }
        None
    }

    // ── transitions ─────────────────────────────────────────────────────────
    // Each returns whether the bar changed.

    pub fn on_dialog_unarchived(&mut self) -> bool {
        if !self.can_unarchive {
            return false;
        }
        self.can_unarchive = false;
        self.can_report_spam = false;
        self.can_block_user = false;
        true
    }

    pub fn on_user_contact_added(&mut self) -> bool {
        if !self.can_block_user && !self.can_add_contact {
            return false;
        }
        self.can_block_user = false;
        self.can_add_contact = false;
        self.distance = -1;
        true
    }

    pub fn on_user_deleted(&mut self) -> bool {
        if !self.can_share_phone_number && !self.can_block_user && !self.can_add_contact && self.distance < 0 {
            return false;
        }
        self.can_share_phone_number = false;
        self.can_block_user = false;
        self.can_add_contact = false;
        self.distance = -1;
        true
    }

    /// Writing to the peer reveals that the distance is no longer relevant.
    pub fn on_outgoing_message(&mut self) -> bool {
        if self.distance < 0 {
            return false;
        }
        self.distance = -1;
        true
    }

    fn flags(&self) -> u32 {
        [
            self.can_report_spam,
            self.can_add_contact,
            self.can_block_user,
            self.can_share_phone_number,
            self.can_report_location,
            self.can_unarchive,
            self.can_invite_members,
            self.distance >= 0,
        ]
        .iter()
        .enumerate()
        .fold(0, |acc, (bit, &set)| if set { acc | (1 << bit) } else { acc })
    }
}

// ─── Storage ──────────────────────────────────────────────────────────────────

impl Serializable for DialogActionBar {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        let flags = self.flags();
        flags.serialize(buf);
        if flags & HAS_DISTANCE != 0 {
            self.distance.serialize(buf);
        }
    }
}

impl Deserializable for DialogActionBar {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        let bit = |n: u32| flags & (1 << n) != 0;
        let distance = if flags & HAS_DISTANCE != 0 { i32::deserialize(buf)? } else { -1 };
        Ok(Self {
            distance,
            can_report_spam:        bit(0),
            can_add_contact:        bit(1),
            can_block_user:         bit(2),
            can_share_phone_number: bit(3),
            can_report_location:    bit(4),
            can_unarchive:          bit(5),
            can_invite_members:     bit(6),
        })
    }
}

//! Bare constructors.

#[cfg(feature = "impl-serde")]
use serde::{Deserialize, Serialize};

use crate::deserialize::{Buffer, Result, deserialize_vector};
use crate::serialize::serialize_vector;
use crate::{Deserializable, Identifiable, Serializable, enums, flag};

// ─── accountDaysTTL ──────────────────────────────────────────────────────────

/// `accountDaysTTL#b8d0afdf days:int`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct AccountDaysTtl {
    pub days: i32,
}

impl Identifiable for AccountDaysTtl {
    const CONSTRUCTOR_ID: u32 = 0xb8d0afdf;
}

impl Serializable for AccountDaysTtl {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.days.serialize(buf);
    }
}

impl Deserializable for AccountDaysTtl {
    fn deserialize(buf: Buffer) -> Result<Self> {
        Ok(Self { days: i32::deserialize(buf)? })
    }
}

// ─── authorization ───────────────────────────────────────────────────────────

/// One logged-in session of the account.
///
/// `authorization#ad01d61d flags:# current:flags.0?true official_app:flags.1?true
/// password_pending:flags.2?true hash:long device_model:string platform:string
/// system_version:string api_id:int app_name:string app_version:string
/// date_created:int date_active:int ip:string country:string region:string`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct Authorization {
    pub current:          bool,
    pub official_app:     bool,
    pub password_pending: bool,
    pub hash:             i64,
    pub device_model:     String,
    pub platform:         String,
    pub system_version:   String,
    pub api_id:           i32,
    pub app_name:         String,
    pub app_version:      String,
    pub date_created:     i32,
    pub date_active:      i32,
    pub ip:               String,
    pub country:          String,
    pub region:           String,
}

impl Identifiable for Authorization {
    const CONSTRUCTOR_ID: u32 = 0xad01d61d;
}

impl Serializable for Authorization {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        let flags = (self.current as u32)
            | (self.official_app as u32) << 1
            | (self.password_pending as u32) << 2;
        flags.serialize(buf);
        self.hash.serialize(buf);
        self.device_model.serialize(buf);
        self.platform.serialize(buf);
        self.system_version.serialize(buf);
        self.api_id.serialize(buf);
        self.app_name.serialize(buf);
        self.app_version.serialize(buf);
        self.date_created.serialize(buf);
        self.date_active.serialize(buf);
        self.ip.serialize(buf);
        self.country.serialize(buf);
        self.region.serialize(buf);
    }
}

impl Deserializable for Authorization {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        Ok(Self {
            current:          flag(flags, 0),
            official_app:     flag(flags, 1),
            password_pending: flag(flags, 2),
            hash:             i64::deserialize(buf)?,
            device_model:     String::deserialize(buf)?,
            platform:         String::deserialize(buf)?,
            system_version:   String::deserialize(buf)?,
            api_id:           i32::deserialize(buf)?,
            app_name:         String::deserialize(buf)?,
            app_version:      String::deserialize(buf)?,
            date_created:     i32::deserialize(buf)?,
            date_active:      i32::deserialize(buf)?,
            ip:               String::deserialize(buf)?,
            country:          String::deserialize(buf)?,
            region:           String::deserialize(buf)?,
        })
    }
}

// ─── webAuthorization ────────────────────────────────────────────────────────

/// A website logged in through a bot's login widget.
///
/// `webAuthorization#a6f8f452 hash:long bot_id:long domain:string browser:string
/// platform:string date_created:int date_active:int ip:string region:string`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct WebAuthorization {
    pub hash:         i64,
    pub bot_id:       i64,
    pub domain:       String,
    pub browser:      String,
    pub platform:     String,
    pub date_created: i32,
    pub date_active:  i32,
    pub ip:           String,
    pub region:       String,
}

impl Identifiable for WebAuthorization {
    const CONSTRUCTOR_ID: u32 = 0xa6f8f452;
}

impl Serializable for WebAuthorization {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.hash.serialize(buf);
        self.bot_id.serialize(buf);
        self.domain.serialize(buf);
        self.browser.serialize(buf);
        self.platform.serialize(buf);
        self.date_created.serialize(buf);
        self.date_active.serialize(buf);
        self.ip.serialize(buf);
        self.region.serialize(buf);
    }
}

impl Deserializable for WebAuthorization {
    fn deserialize(buf: Buffer) -> Result<Self> {
        Ok(Self {
            hash:         i64::deserialize(buf)?,
            bot_id:       i64::deserialize(buf)?,
            domain:       String::deserialize(buf)?,
            browser:      String::deserialize(buf)?,
            platform:     String::deserialize(buf)?,
            date_created: i32::deserialize(buf)?,
            date_active:  i32::deserialize(buf)?,
            ip:           String::deserialize(buf)?,
            region:       String::deserialize(buf)?,
        })
    }
}

// ─── peers ───────────────────────────────────────────────────────────────────

/// `peerUser#59511722 user_id:long`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct PeerUser {
    pub user_id: i64,
}

/// `peerChat#36c6019a chat_id:long`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct PeerChat {
    pub chat_id: i64,
}

/// `peerChannel#a2a5371e channel_id:long`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct PeerChannel {
    pub channel_id: i64,
}

macro_rules! single_long {
    ($($ty:ident { $field:ident } = $id:literal;)*) => {
        $(
            impl Identifiable for $ty {
                const CONSTRUCTOR_ID: u32 = $id;
            }

            impl Serializable for $ty {
                fn serialize(&self, buf: &mut impl Extend<u8>) {
                    self.$field.serialize(buf);
                }
            }

            impl Deserializable for $ty {
                fn deserialize(buf: Buffer) -> Result<Self> {
                    Ok(Self { $field: i64::deserialize(buf)? })
                }
            }
        )*
    };
}

single_long! {
    PeerUser    { user_id }    = 0x59511722;
    PeerChat    { chat_id }    = 0x36c6019a;
    PeerChannel { channel_id } = 0xa2a5371e;
    UserEmpty   { id }         = 0xd3bc4b7a;
}

// ─── users ───────────────────────────────────────────────────────────────────

/// `userEmpty#d3bc4b7a id:long`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct UserEmpty {
    pub id: i64,
}

/// Reduced `user` constructor.
///
/// `user#8f97c628 flags:# bot:flags.14?true id:long access_hash:flags.0?long
/// first_name:flags.1?string username:flags.3?string`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct User {
    pub bot:         bool,
    pub id:          i64,
    pub access_hash: Option<i64>,
    pub first_name:  Option<String>,
    pub username:    Option<String>,
}

impl Identifiable for User {
    const CONSTRUCTOR_ID: u32 = 0x8f97c628;
}

impl Serializable for User {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        let flags = (self.access_hash.is_some() as u32)
            | (self.first_name.is_some() as u32) << 1
            | (self.username.is_some() as u32) << 3
            | (self.bot as u32) << 14;
        flags.serialize(buf);
        self.id.serialize(buf);
        self.access_hash.serialize(buf);
        self.first_name.serialize(buf);
        self.username.serialize(buf);
    }
}

impl Deserializable for User {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let flags = u32::deserialize(buf)?;
        let id = i64::deserialize(buf)?;
        let access_hash = if flag(flags, 0) { Some(i64::deserialize(buf)?) } else { None };
        let first_name  = if flag(flags, 1) { Some(String::deserialize(buf)?) } else { None };
        let username    = if flag(flags, 3) { Some(String::deserialize(buf)?) } else { None };
        Ok(Self { bot: flag(flags, 14), id, access_hash, first_name, username })
    }
}

// ─── account.* ───────────────────────────────────────────────────────────────

pub mod account {
    use super::*;

    /// `account.authorizations#1250abde authorizations:Vector<Authorization>`
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
    pub struct Authorizations {
        pub authorizations: Vec<enums::Authorization>,
    }

    impl Identifiable for Authorizations {
        const CONSTRUCTOR_ID: u32 = 0x1250abde;
    }

    impl Serializable for Authorizations {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            serialize_vector(&self.authorizations, buf);
        }
    }

    impl Deserializable for Authorizations {
        fn deserialize(buf: Buffer) -> Result<Self> {
            Ok(Self { authorizations: deserialize_vector(buf)? })
        }
    }

    /// `account.webAuthorizations#ed56c9fc authorizations:Vector<WebAuthorization> users:Vector<User>`
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
    pub struct WebAuthorizations {
        pub authorizations: Vec<enums::WebAuthorization>,
        pub users:          Vec<enums::User>,
    }

    impl Identifiable for WebAuthorizations {
        const CONSTRUCTOR_ID: u32 = 0xed56c9fc;
    }

    impl Serializable for WebAuthorizations {
        fn serialize(&self, buf: &mut impl Extend<u8>) {
            serialize_vector(&self.authorizations, buf);
            serialize_vector(&self.users, buf);
        }
    }

    impl Deserializable for WebAuthorizations {
        fn deserialize(buf: Buffer) -> Result<Self> {
            Ok(Self {
                authorizations: deserialize_vector(buf)?,
                users:          deserialize_vector(buf)?,
            })
        }
    }
}

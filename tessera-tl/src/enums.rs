//! Boxed types.  Each variant wraps one bare constructor from [`crate::types`];
//! serialization writes the constructor id before the bare body.

#[cfg(feature = "impl-serde")]
use serde::{Deserialize, Serialize};

use crate::deserialize::{Buffer, Error, Result};
use crate::{Deserializable, Identifiable, Serializable, types};

/// Declares a boxed type with its variants and the id-dispatching codec.
macro_rules! boxed {
    ($(#[$meta:meta])* $name:ident { $($variant:ident($ty:ty)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        #[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
        pub enum $name {
            $($variant($ty)),+
        }

        impl Serializable for $name {
            fn serialize(&self, buf: &mut impl Extend<u8>) {
                match self {
                    $(Self::$variant(x) => {
                        <$ty as Identifiable>::CONSTRUCTOR_ID.serialize(buf);
                        x.serialize(buf);
                    })+
                }
            }
        }

        impl Deserializable for $name {
            fn deserialize(buf: Buffer) -> Result<Self> {
                let id = u32::deserialize(buf)?;
                $(if id == <$ty as Identifiable>::CONSTRUCTOR_ID {
                    return Ok(Self::$variant(<$ty>::deserialize(buf)?));
                })+
                Err(Error::UnexpectedConstructor { id })
            }
        }

        $(impl From<$ty> for $name {
            fn from(x: $ty) -> Self { Self::$variant(x) }
        })+
    };
}

boxed! {
    /// `AccountDaysTTL`
    AccountDaysTtl { AccountDaysTtl(types::AccountDaysTtl) }
}

boxed! {
    /// `Authorization`
    Authorization { Authorization(types::Authorization) }
}

boxed! {
    /// `WebAuthorization`
    WebAuthorization { WebAuthorization(types::WebAuthorization) }
}

boxed! {
    /// `Peer`: who a message or reference points at.
    Peer {
        User(types::PeerUser),
        Chat(types::PeerChat),
        Channel(types::PeerChannel),
    }
}

boxed! {
    /// `User`
    User {
        Empty(types::UserEmpty),
        User(types::User),
    }
}

impl User {
    /// The user id, whichever constructor carries it.
    pub fn id(&self) -> i64 {
        match self {
            Self::Empty(u) => u.id,
            Self::User(u)  => u.id,
        }
    }
}

pub mod account {
    use super::*;

    boxed! {
        /// `account.Authorizations`
        Authorizations { Authorizations(types::account::Authorizations) }
    }

    boxed! {
        /// `account.WebAuthorizations`
        WebAuthorizations { WebAuthorizations(types::account::WebAuthorizations) }
    }
}

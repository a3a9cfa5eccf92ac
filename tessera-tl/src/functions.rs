//! RPC functions.  Serializing a function writes its constructor id followed by
//! its arguments; [`RemoteCall::Return`] names the reply type.

use crate::{Identifiable, RemoteCall, Serializable, enums};

macro_rules! function {
    (
        $(#[$meta:meta])*
        $name:ident { $($field:ident : $fty:ty),* $(,)? } = $id:literal -> $ret:ty
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            $(pub $field: $fty),*
        }

        impl Identifiable for $name {
            const CONSTRUCTOR_ID: u32 = $id;
        }

        impl Serializable for $name {
            #[allow(unused_variables)]
            fn serialize(&self, buf: &mut impl Extend<u8>) {
                Self::CONSTRUCTOR_ID.serialize(buf);
                $(self.$field.serialize(buf);)*
            }
        }

        impl RemoteCall for $name {
            type Return = $ret;
        }
    };
}

pub mod account {
    use super::*;

    function! {
        /// `account.setAccountTTL#2442485e ttl:AccountDaysTTL = Bool`
        SetAccountTtl { ttl: enums::AccountDaysTtl } = 0x2442485e -> bool
    }

    function! {
        /// `account.getAccountTTL#8fc711d = AccountDaysTTL`
        GetAccountTtl {} = 0x08fc711d -> enums::AccountDaysTtl
    }

    function! {
        /// `account.getAuthorizations#e320c158 = account.Authorizations`
        GetAuthorizations {} = 0xe320c158 -> enums::account::Authorizations
    }

    function! {
        /// `account.resetAuthorization#df77f3bc hash:long = Bool`
        ResetAuthorization { hash: i64 } = 0xdf77f3bc -> bool
    }

    function! {
        /// `account.getWebAuthorizations#182e6d6f = account.WebAuthorizations`
        GetWebAuthorizations {} = 0x182e6d6f -> enums::account::WebAuthorizations
    }

    function! {
        /// `account.resetWebAuthorization#2d01b9ef hash:long = Bool`
        ResetWebAuthorization { hash: i64 } = 0x2d01b9ef -> bool
    }

    function! {
        /// `account.resetWebAuthorizations#682d2594 = Bool`
        ResetWebAuthorizations {} = 0x682d2594 -> bool
    }
}

pub mod auth {
    use super::*;

    function! {
        /// `auth.acceptLoginToken#e894ad4d token:bytes = Authorization`
        AcceptLoginToken { token: Vec<u8> } = 0xe894ad4d -> enums::Authorization
    }

    function! {
        /// `auth.resetAuthorizations#9fab0d1a = Bool`
        ResetAuthorizations {} = 0x9fab0d1a -> bool
    }
}

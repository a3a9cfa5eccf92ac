//! Telegram TL types for the account API.
//!
//! Hand-maintained against `tl/account.tl`, laid out the way generated TL
//! bindings usually are:
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`types`]     | Concrete constructors (bare types) as `struct`s            |
//! | [`functions`] | RPC functions as `struct`s implementing [`RemoteCall`]     |
//! | [`enums`]     | Boxed types as `enum`s implementing [`Deserializable`]     |
//!
//! # Raw API usage
//!
//! ```rust
//! use tessera_tl::{functions, Serializable};
//!
//! let req = functions::account::ResetAuthorization { hash: 42 };
//! let bytes = req.to_bytes();
//! assert_eq!(&bytes[..4], &0xdf77f3bcu32.to_le_bytes());
//! ```

#![deny(unsafe_code)]

pub mod deserialize;
pub mod enums;
pub mod functions;
pub mod serialize;
pub mod types;

pub use deserialize::{Cursor, Deserializable};
pub use serialize::Serializable;

/// Constructor id of `boolTrue`.
pub const ID_BOOL_TRUE: u32 = 0x997275b5;
/// Constructor id of `boolFalse`.
pub const ID_BOOL_FALSE: u32 = 0xbc799737;
/// Constructor id of the boxed `vector`.
pub const ID_VECTOR: u32 = 0x1cb5c415;

// ─── Core traits ──────────────────────────────────────────────────────────────

/// Every schema constructor has a unique 32-bit id.
pub trait Identifiable {
    /// The constructor id as written in the schema.
    const CONSTRUCTOR_ID: u32;
}

/// Marks a function type that can be sent to Telegram as an RPC call.
///
/// `Return` is the type Telegram will respond with.
pub trait RemoteCall: Serializable {
    /// The deserialized response type.
    type Return: Deserializable;
}

/// Read a `flags:#` word and test one bit of it.
#[inline]
pub(crate) fn flag(flags: u32, bit: u32) -> bool {
    flags & (1 << bit) != 0
}

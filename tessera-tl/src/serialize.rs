//! The [`Serializable`] trait and its implementations for the primitive TL types
//! used by the account schema.
//!
//! Encoding follows the [MTProto Binary Serialization] spec.
//!
//! [MTProto Binary Serialization]: https://core.telegram.org/mtproto/serialize

use crate::{ID_BOOL_FALSE, ID_BOOL_TRUE, ID_VECTOR};

/// Serialize `self` into TL binary format.
pub trait Serializable {
    /// Appends the serialized form of `self` to `buf`.
    fn serialize(&self, buf: &mut impl Extend<u8>);

    /// Allocate a fresh `Vec<u8>` and serialize into it.
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.serialize(&mut out);
        out
    }
}

// ─── bool ────────────────────────────────────────────────────────────────────

impl Serializable for bool {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        let id = if *self { ID_BOOL_TRUE } else { ID_BOOL_FALSE };
        id.serialize(buf);
    }
}

// ─── integers ────────────────────────────────────────────────────────────────

macro_rules! le_serializable {
    ($($ty:ty),* $(,)?) => {
        $(impl Serializable for $ty {
            fn serialize(&self, buf: &mut impl Extend<u8>) {
                buf.extend(self.to_le_bytes());
            }
        })*
    };
}

le_serializable!(i32, u32, i64);

// ─── bytes / string ──────────────────────────────────────────────────────────

/// TL `bytes`: a length header, the payload, then zero padding up to the next
/// 4-byte boundary.  Payloads shorter than 254 bytes use a one-byte header,
/// longer ones `0xfe` followed by a 24-bit little-endian length.
impl Serializable for [u8] {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        let len = self.len();
        let header = if len < 254 {
            buf.extend([len as u8]);
            1
        } else {
            let [a, b, c, _] = (len as u32).to_le_bytes();
            buf.extend([0xfe, a, b, c]);
            4
        };
        buf.extend(self.iter().copied());
        let padding = (4 - (header + len) % 4) % 4;
        buf.extend(std::iter::repeat_n(0u8, padding));
    }
}

impl Serializable for Vec<u8> {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.as_slice().serialize(buf);
    }
}

impl Serializable for String {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.as_bytes().serialize(buf);
    }
}

impl Serializable for str {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.as_bytes().serialize(buf);
    }
}

// ─── vectors ─────────────────────────────────────────────────────────────────

/// Write a boxed `Vector<T>`: the `vector` constructor id, an `int` count, then
/// every element.
///
/// A free function rather than an impl on `Vec<T>`, which would collide with
/// the `bytes` impl on `Vec<u8>`.
pub fn serialize_vector<T: Serializable>(items: &[T], buf: &mut impl Extend<u8>) {
    ID_VECTOR.serialize(buf);
    (items.len() as i32).serialize(buf);
    for item in items {
        item.serialize(buf);
    }
}

// ─── Option ──────────────────────────────────────────────────────────────────

/// Flag-gated fields: absence is already recorded in the flags word, so `None`
/// writes nothing.
impl<T: Serializable> Serializable for Option<T> {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        if let Some(value) = self {
            value.serialize(buf);
        }
    }
}

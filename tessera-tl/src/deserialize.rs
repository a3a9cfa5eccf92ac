//! The [`Deserializable`] trait, the [`Cursor`] buffer, and primitive impls.

use std::fmt;

use crate::{ID_BOOL_FALSE, ID_BOOL_TRUE, ID_VECTOR};

// ─── Error ───────────────────────────────────────────────────────────────────

/// Errors that can occur while decoding a reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Ran out of bytes before the value was fully read.
    UnexpectedEof,
    /// Read a constructor id that no variant of the expected type uses.
    UnexpectedConstructor { id: u32 },
    /// A `string` field held bytes that are not valid UTF-8.
    InvalidUtf8,
    /// A `Vector` announced a negative element count.
    NegativeLength(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof              => write!(f, "unexpected end of buffer"),
            Self::UnexpectedConstructor { id } => write!(f, "unexpected constructor id: {id:#010x}"),
            Self::InvalidUtf8                => write!(f, "string is not valid UTF-8"),
            Self::NegativeLength(n)          => write!(f, "negative vector length: {n}"),
        }
    }
}

impl std::error::Error for Error {}

/// Specialized `Result` for deserialization.
pub type Result<T> = std::result::Result<T, Error>;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// A read position over an in-memory reply.
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `buf`.
    pub fn from_slice(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize { self.pos }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize { self.buf.len() - self.pos }

    /// Borrow the next `n` bytes and advance past them.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::UnexpectedEof)?;
        let slice = self.buf.get(self.pos..end).ok_or(Error::UnexpectedEof)?;
        self.pos = end;
        Ok(slice)
    }

    /// Read a single byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Fill `out` completely.
    pub fn read_exact(&mut self, out: &mut [u8]) -> Result<()> {
        out.copy_from_slice(self.take(out.len())?);
        Ok(())
    }
}

/// Alias used by the schema impls.
pub type Buffer<'a, 'b> = &'a mut Cursor<'b>;

// ─── Deserializable ──────────────────────────────────────────────────────────

/// Decode a value from TL binary format.
pub trait Deserializable: Sized {
    /// Read `Self` from `buf`, advancing its position.
    fn deserialize(buf: Buffer) -> Result<Self>;

    /// Decode from a byte slice.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::from_slice(bytes);
        Self::deserialize(&mut cursor)
    }
}

// ─── Primitives ───────────────────────────────────────────────────────────────

impl Deserializable for bool {
    fn deserialize(buf: Buffer) -> Result<Self> {
        match u32::deserialize(buf)? {
            ID_BOOL_TRUE  => Ok(true),
            ID_BOOL_FALSE => Ok(false),
            id            => Err(Error::UnexpectedConstructor { id }),
        }
    }
}

macro_rules! le_deserializable {
    ($($ty:ty),* $(,)?) => {
        $(impl Deserializable for $ty {
            fn deserialize(buf: Buffer) -> Result<Self> {
                let mut b = [0u8; std::mem::size_of::<$ty>()];
                buf.read_exact(&mut b)?;
                Ok(<$ty>::from_le_bytes(b))
            }
        })*
    };
}

le_deserializable!(i32, u32, i64);

// ─── Bytes / String ───────────────────────────────────────────────────────────

impl Deserializable for Vec<u8> {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let first = buf.read_byte()?;
        let (header, len) = if first == 0xfe {
            let raw = buf.take(3)?;
            (4, raw[0] as usize | (raw[1] as usize) << 8 | (raw[2] as usize) << 16)
        } else {
            (1, first as usize)
        };
        let data = buf.take(len)?.to_vec();
        buf.take((4 - (header + len) % 4) % 4)?;
        Ok(data)
    }
}

impl Deserializable for String {
    fn deserialize(buf: Buffer) -> Result<Self> {
        String::from_utf8(Vec::<u8>::deserialize(buf)?).map_err(|_| Error::InvalidUtf8)
    }
}

// ─── Vectors ─────────────────────────────────────────────────────────────────

/// Read a boxed `Vector<T>`; counterpart of [`crate::serialize::serialize_vector`].
pub fn deserialize_vector<T: Deserializable>(buf: Buffer) -> Result<Vec<T>> {
    let id = u32::deserialize(buf)?;
    if id != ID_VECTOR {
        return Err(Error::UnexpectedConstructor { id });
    }
    let len = i32::deserialize(buf)?;
    if len < 0 {
        return Err(Error::NegativeLength(len));
    }
    (0..len).map(|_| T::deserialize(buf)).collect()
}

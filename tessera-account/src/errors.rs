//! Error types for tessera-account.
//!
//! Three families:
//! * [`InvocationError`]: what an [`crate::Account`] call resolves to on failure.
//! * [`ValidationError`]: caller input rejected before anything is sent.
//! * [`ServerAnomaly`]: the server broke a contract; logged and repaired, never returned.

use std::{fmt, io};

// ─── RpcError ─────────────────────────────────────────────────────────────────

/// An error returned by Telegram's servers in response to an RPC call.
///
/// Numeric values are stripped from the name and placed in [`RpcError::value`].
///
/// # Example
/// `FLOOD_WAIT_30` → `RpcError { code: 420, name: "FLOOD_WAIT", value: Some(30) }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpcError {
    /// HTTP-like status code.
    pub code: i32,
    /// Error name in SCREAMING_SNAKE_CASE with digits removed.
    pub name: String,
    /// Numeric suffix extracted from the name, if any.
    pub value: Option<u32>,
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RPC {}: {}", self.code, self.name)?;
        if let Some(v) = self.value {
            write!(f, " (value: {v})")?;
        }
        Ok(())
    }
}

impl std::error::Error for RpcError {}

impl RpcError {
    /// Parse a raw Telegram error message like `"FRESH_RESET_AUTHORISATION_FORBIDDEN"`
    /// or `"FLOOD_WAIT_30"` into an `RpcError`.
    pub fn from_telegram(code: i32, message: &str) -> Self {
        if let Some((name, suffix)) = message.rsplit_once('_') {
            if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(value) = suffix.parse::<u32>() {
                    return Self { code, name: name.to_string(), value: Some(value) };
                }
            }
        }
        Self { code, name: message.to_string(), value: None }
    }

    /// Match on the error name, with optional wildcard prefix/suffix `'*'`.
    ///
    /// - `err.is("AUTH_TOKEN_EXPIRED")`: exact match
    /// - `err.is("AUTH_TOKEN_*")`: starts-with match
    /// - `err.is("*_FORBIDDEN")`: ends-with match
    pub fn is(&self, pattern: &str) -> bool {
        if let Some(prefix) = pattern.strip_suffix('*') {
            self.name.starts_with(prefix)
        } else if let Some(suffix) = pattern.strip_prefix('*') {
            self.name.ends_with(suffix)
        } else {
            self.name == pattern
        }
    }
}

// ─── ValidationError ─────────────────────────────────────────────────────────

/// Caller input that was rejected locally.
///
/// Each variant has a stable machine-readable [`reason`](Self::reason); the
/// `Display` text is meant for people.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The QR-code login link is not `tg://login?token=<base64url>`.
    AuthTokenInvalid,
    /// No sender given where one is required.
    SenderEmpty,
    /// A user sender whose id is not a valid user id.
    UserIdInvalid,
    /// A valid user id that could not be found, even after a forced lookup.
    UserUnknown,
    /// A chat sender whose id is not a valid dialog id.
    ChatIdInvalid,
    /// A valid dialog id that could not be found, even after a forced lookup.
    ChatUnknown,
}

impl ValidationError {
    /// HTTP-like status code, always `400`.
    pub fn code(&self) -> i32 { 400 }

    /// Stable reason string.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::AuthTokenInvalid => "AUTH_TOKEN_INVALID",
            Self::SenderEmpty      => "SENDER_EMPTY",
            Self::UserIdInvalid    => "USER_ID_INVALID",
            Self::UserUnknown      => "USER_UNKNOWN",
            Self::ChatIdInvalid    => "CHAT_ID_INVALID",
            Self::ChatUnknown      => "CHAT_UNKNOWN",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::AuthTokenInvalid => "AUTH_TOKEN_INVALID",
            Self::SenderEmpty      => "Message sender must be non-empty",
            Self::UserIdInvalid    => "Invalid user identifier specified",
            Self::UserUnknown      => "Unknown user identifier specified",
            Self::ChatIdInvalid    => "Invalid chat identifier specified",
            Self::ChatUnknown      => "Unknown chat identifier specified",
        };
        write!(f, "{} {msg}", self.code())
    }
}

impl std::error::Error for ValidationError {}

// ─── InvocationError ──────────────────────────────────────────────────────────

/// The error type returned from any [`crate::Account`] method that talks to Telegram.
#[derive(Debug)]
pub enum InvocationError {
    /// Telegram rejected the request.
    Rpc(RpcError),
    /// Network / I/O failure reported by the transport.
    Io(io::Error),
    /// Response deserialization failed.
    Deserialize(String),
    /// The request was dropped before it produced a result.
    Dropped,
    /// The request was rejected locally and never sent.
    Invalid(ValidationError),
    /// The server accepted a well-formed request but reported that it did not
    /// carry it out, without saying why.
    UnexpectedState(&'static str),
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rpc(e)             => write!(f, "{e}"),
            Self::Io(e)              => write!(f, "I/O error: {e}"),
            Self::Deserialize(s)     => write!(f, "deserialize error: {s}"),
            Self::Dropped            => write!(f, "request dropped"),
            Self::Invalid(e)         => write!(f, "{e}"),
            Self::UnexpectedState(s) => write!(f, "internal server error: {s}"),
        }
    }
}

impl std::error::Error for InvocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rpc(e)     => Some(e),
            Self::Io(e)      => Some(e),
            Self::Invalid(e) => Some(e),
            _                => None,
        }
    }
}

impl From<io::Error> for InvocationError {
    fn from(e: io::Error) -> Self { Self::Io(e) }
}

impl From<RpcError> for InvocationError {
    fn from(e: RpcError) -> Self { Self::Rpc(e) }
}

impl From<ValidationError> for InvocationError {
    fn from(e: ValidationError) -> Self { Self::Invalid(e) }
}

impl From<tessera_tl::deserialize::Error> for InvocationError {
    fn from(e: tessera_tl::deserialize::Error) -> Self { Self::Deserialize(e.to_string()) }
}

impl InvocationError {
    /// Returns `true` if this is the named RPC error (supports `'*'` wildcards).
    pub fn is(&self, pattern: &str) -> bool {
        match self {
            Self::Rpc(e) => e.is(pattern),
            _            => false,
        }
    }

    /// The local validation failure, if that is what this is.
    pub fn validation(&self) -> Option<ValidationError> {
        match self {
            Self::Invalid(e) => Some(*e),
            _                => None,
        }
    }
}

// ─── ServerAnomaly ────────────────────────────────────────────────────────────

/// Data from the server that breaks an invariant of an otherwise good reply.
///
/// Anomalies are logged at `error` level where they are detected and repaired
/// in place; callers never see them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerAnomaly {
    /// A connected website names a bot id that is not a valid user id.
    InvalidBotId { bot_id: i64 },
    /// A message sender with neither a usable user nor a known dialog.
    InvalidSender { user_id: i64, dialog_id: i64, source: &'static str },
    /// A peer in a sender list does not decode to a valid dialog id.
    InvalidPeer { peer: tessera_tl::enums::Peer },
    /// A user in a sender list is not known locally.
    UnknownUser { user_id: i64 },
    /// A dialog referenced by a reply had to be created on the spot.
    MissingDialog { dialog_id: i64, source: &'static str },
}

impl ServerAnomaly {
    /// Log this anomaly.
    pub(crate) fn report(&self) {
        tracing::error!("[tessera] {self}");
    }
}

impl fmt::Display for ServerAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBotId { bot_id } => write!(f, "Receive invalid bot {bot_id}"),
            Self::InvalidSender { user_id, dialog_id, source } => {
                write!(f, "Receive message with wrong sender {user_id}/{dialog_id} from {source}")
            }
            Self::InvalidPeer { peer }      => write!(f, "Receive invalid {peer:?} as message sender"),
            Self::UnknownUser { user_id }   => write!(f, "Have no info about user {user_id}"),
            Self::MissingDialog { dialog_id, source } => {
                write!(f, "Failed to find dialog {dialog_id} from {source}")
            }
        }
    }
}

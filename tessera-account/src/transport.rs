//! The seam to the connection layer.

use async_trait::async_trait;

use crate::errors::InvocationError;

/// Moves one encoded request to Telegram and returns the raw reply body.
///
/// Implementations own everything below the request: framing, encryption,
/// retries, timeouts, DC routing.  Whatever error they produce is surfaced to
/// the caller unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` (a serialized TL function) and wait for its result.
    async fn dispatch(&self, request: Vec<u8>) -> Result<Vec<u8>, InvocationError>;
}

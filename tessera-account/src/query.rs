//! Typed one-shot RPC calls.
//!
//! A [`TypedQuery`] binds a wire function `R`, a transform from `R::Return` to
//! the caller's result type, and the [`Promise`] that receives that result.  It
//! is sent once and finished once: either [`ResultHandler::on_result`] or
//! [`ResultHandler::on_error`] fires, and a second terminal event panics.

use std::fmt;
use std::marker::PhantomData;

use tessera_tl::{Deserializable, RemoteCall, Serializable};

use crate::errors::InvocationError;
use crate::promise::Promise;
use crate::transport::Transport;

/// Receives the terminal event of one outgoing request.
pub trait ResultHandler {
    /// The raw reply body arrived.
    fn on_result(&mut self, packet: &[u8]);

    /// The request failed before a reply could be used.
    fn on_error(&mut self, error: InvocationError);
}

type Transform<R, T> = Box<dyn FnOnce(<R as RemoteCall>::Return) -> Result<T, InvocationError> + Send>;

/// Generic adapter for one request / reply shape.
pub struct TypedQuery<R: RemoteCall, T> {
    promise:   Promise<T>,
    transform: Option<Transform<R, T>>,
    sent:      bool,
    _request:  PhantomData<fn(R)>,
}

impl<R: RemoteCall, T> TypedQuery<R, T> {
    /// Bind `promise` and the reply `transform`.  Nothing is sent yet.
    pub fn new<F>(promise: Promise<T>, transform: F) -> Self
    where
        F: FnOnce(R::Return) -> Result<T, InvocationError> + Send + 'static,
    {
        Self { promise, transform: Some(Box::new(transform)), sent: false, _request: PhantomData }
    }

    /// Encode `request`, hand it to `transport`, and route the outcome to
    /// [`on_result`](ResultHandler::on_result) or [`on_error`](ResultHandler::on_error).
    ///
    /// # Panics
    /// If called more than once.
    pub async fn send(&mut self, transport: &dyn Transport, request: &R) {
        assert!(!self.sent, "query sent twice");
        self.sent = true;
        match transport.dispatch(request.to_bytes()).await {
            Ok(packet) => self.on_result(&packet),
            Err(e)     => self.on_error(e),
        }
    }

    fn ensure_pending(&self) {
        if self.promise.is_fulfilled() {
            panic!("second terminal event for a finished query");
        }
    }
}

impl<R: RemoteCall, T> ResultHandler for TypedQuery<R, T> {
    fn on_result(&mut self, packet: &[u8]) {
        self.ensure_pending();
        let reply = match R::Return::from_bytes(packet) {
            Ok(reply) => reply,
            Err(e)    => return self.on_error(e.into()),
        };
        let Some(transform) = self.transform.take() else {
            panic!("second terminal event for a finished query");
        };
        self.promise.set_result(transform(reply));
    }

    fn on_error(&mut self, error: InvocationError) {
        self.ensure_pending();
        self.transform = None;
        self.promise.set_error(error);
    }
}

impl<R: RemoteCall, T> fmt::Debug for TypedQuery<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedQuery")
            .field("request", &std::any::type_name::<R>())
            .field("sent", &self.sent)
            .field("finished", &self.promise.is_fulfilled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_tl::functions;

    type ResetQuery = TypedQuery<functions::account::ResetAuthorization, bool>;

    fn query() -> (ResetQuery, crate::promise::Completion<bool>) {
        let (promise, completion) = Promise::new();
        (TypedQuery::new(promise, Ok), completion)
    }

    #[tokio::test]
    async fn result_is_decoded_and_transformed() {
        let (promise, completion) = Promise::new();
        let mut q: TypedQuery<functions::account::ResetAuthorization, &str> =
            TypedQuery::new(promise, |ok| Ok(if ok { "yes" } else { "no" }));
        q.on_result(&false.to_bytes());
        assert_eq!(completion.wait().await.unwrap(), "no");
    }

    #[tokio::test]
    async fn undecodable_reply_becomes_error() {
        let (mut q, completion) = query();
        q.on_result(&[1, 2]);
        assert!(matches!(completion.wait().await, Err(InvocationError::Deserialize(_))));
    }

    #[tokio::test]
    async fn error_is_passed_through() {
        let (mut q, completion) = query();
        q.on_error(InvocationError::Dropped);
        assert!(matches!(completion.wait().await, Err(InvocationError::Dropped)));
    }

    #[test]
    #[should_panic(expected = "second terminal event")]
    fn result_after_result_panics() {
        let (mut q, _c) = query();
        q.on_result(&true.to_bytes());
        q.on_result(&true.to_bytes());
    }

    #[test]
    #[should_panic(expected = "second terminal event")]
    fn result_after_error_panics() {
        let (mut q, _c) = query();
        q.on_error(InvocationError::Dropped);
        q.on_result(&true.to_bytes());
    }

    #[test]
    #[should_panic(expected = "second terminal event")]
    fn error_after_decode_failure_panics() {
        let (mut q, _c) = query();
        q.on_result(&[]);
        q.on_error(InvocationError::Dropped);
    }
}

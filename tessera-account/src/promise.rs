//! Single-fulfilment completion handles.
//!
//! A [`Promise`] is the sending half: it is fulfilled exactly once with either a
//! value or an error.  The matching [`Completion`] is what the caller awaits.
//! Fulfilling a promise twice is a bug in whoever drives it and panics.

use tokio::sync::oneshot;

use crate::errors::InvocationError;

/// Write side of a one-shot result.
#[derive(Debug)]
pub struct Promise<T> {
    tx: Option<oneshot::Sender<Result<T, InvocationError>>>,
}

/// Read side of a one-shot result.
#[derive(Debug)]
pub struct Completion<T> {
    rx: oneshot::Receiver<Result<T, InvocationError>>,
}

impl<T> Promise<T> {
    /// Create a linked promise / completion pair.
    pub fn new() -> (Self, Completion<T>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx: Some(tx) }, Completion { rx })
    }

    /// Fulfil with a value.
    pub fn set_value(&mut self, value: T) {
        self.fulfil(Ok(value));
    }

    /// Fulfil with an error.
    pub fn set_error(&mut self, error: InvocationError) {
        self.fulfil(Err(error));
    }

    /// Fulfil with a ready result.
    pub fn set_result(&mut self, result: Result<T, InvocationError>) {
        self.fulfil(result);
    }

    /// `true` once `set_*` has been called.
    pub fn is_fulfilled(&self) -> bool {
        self.tx.is_none()
    }

    fn fulfil(&mut self, result: Result<T, InvocationError>) {
        let Some(tx) = self.tx.take() else {
            panic!("promise fulfilled twice");
        };
        // The caller may have stopped waiting; that is not our concern.
        if tx.send(result).is_err() {
            tracing::trace!("[tessera] completion dropped before fulfilment");
        }
    }
}

impl<T> Completion<T> {
    /// Wait for the promise to be fulfilled.
    ///
    /// A promise dropped without fulfilment resolves to [`InvocationError::Dropped`].
    pub async fn wait(self) -> Result<T, InvocationError> {
        self.rx.await.unwrap_or(Err(InvocationError::Dropped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn value_reaches_completion() {
        let (mut promise, completion) = Promise::new();
        promise.set_value(7);
        assert!(promise.is_fulfilled());
        assert_eq!(completion.wait().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn dropped_promise_reports_dropped() {
        let (promise, completion) = Promise::<()>::new();
        drop(promise);
        assert!(matches!(completion.wait().await, Err(InvocationError::Dropped)));
    }

    #[test]
    fn fulfilling_after_caller_left_is_fine() {
        let (mut promise, completion) = Promise::new();
        drop(completion);
        promise.set_value("late");
    }

    #[test]
    #[should_panic(expected = "promise fulfilled twice")]
    fn second_fulfilment_panics() {
        let (mut promise, _completion) = Promise::new();
        promise.set_value(1);
        promise.set_error(InvocationError::Dropped);
    }
}

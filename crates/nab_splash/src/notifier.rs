//! One-shot completion callback

use std::fmt;

type Callback = Box<dyn FnOnce() + Send>;

/// Holds the host's completion callback until it is fired or disarmed.
///
/// The callback is `FnOnce` and is moved out when fired, so a second fire, or a
/// fire after [`disarm`](Self::disarm), has nothing left to call.
pub struct CompletionNotifier {
    callback: Option<Callback>,
    fired: bool,
}

impl CompletionNotifier {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            callback: Some(Box::new(callback)),
            fired: false,
        }
    }

    /// Invoke the callback if it is still armed; returns whether it ran
    pub fn fire(&mut self) -> bool {
        match self.callback.take() {
            Some(callback) => {
                tracing::debug!("splash completion callback fired");
                callback();
                self.fired = true;
                true
            }
            None => false,
        }
    }

    /// Drop the callback without invoking it
    pub fn disarm(&mut self) {
        if self.callback.take().is_some() {
            tracing::debug!("splash completion callback disarmed");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.callback.is_some()
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

impl fmt::Debug for CompletionNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionNotifier")
            .field("armed", &self.is_armed())
            .field("fired", &self.fired)
            .finish()
    }
}

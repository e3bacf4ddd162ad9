use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Default)]
struct Inner {
    raised: Mutex<bool>,
    wake: Condvar,
}

/// Process-level stop request shared between the wiring code and the publisher.
///
/// Once raised it stays raised.
#[derive(Clone, Default)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        let mut raised = self.inner.raised.lock();
        *raised = true;
        self.inner.wake.notify_all();
    }

    pub fn is_raised(&self) -> bool {
        *self.inner.raised.lock()
    }

    /// Run `f` only if the signal is not raised yet.
    ///
    /// The signal stays locked while `f` runs, so a concurrent [`raise`](Self::raise)
    /// returns only after `f` has finished. `f` must not touch this signal.
    pub fn unless_raised<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let raised = self.inner.raised.lock();
        if *raised {
            return None;
        }
        Some(f())
    }

    /// Sleep for up to `timeout`, returning early if the signal is raised.
    ///
    /// Returns whether the signal is raised.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut raised = self.inner.raised.lock();
        while !*raised {
            if self.inner.wake.wait_until(&mut raised, deadline).timed_out() {
                break;
            }
        }
        *raised
    }
}

impl std::fmt::Debug for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownSignal")
            .field("raised", &self.is_raised())
            .finish()
    }
}

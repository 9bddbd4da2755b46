//! Auto Advance
//!
//! Single-shot, cancellable delayed action used to pace automatic sends.
//! At most one action is pending at a time; scheduling a new one or
//! stopping the campaign aborts the pending delay.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Default)]
pub struct AutoAdvance {
    handle: Option<JoinHandle<()>>,
}

impl AutoAdvance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` after `delay`, replacing any pending action.
    ///
    /// Must be called from within the app's async runtime. The action
    /// still re-checks campaign state when it fires; abort is the fast
    /// path, the phase check is the safety net.
    pub fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        debug!(delay_secs = delay.as_secs(), "Scheduling auto-advance");

        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    /// Abort the pending delay, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Cancelled pending auto-advance");
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.cancel();
    }
}

//! Global ceiling on the duration of a whole run

use std::time::Duration;
use tokio::task::JoinHandle;

/// Ceiling for a full interactive run (15 minutes)
pub const RUN_TIMEOUT: Duration = Duration::from_secs(900);

/// Fires `on_timeout` from a runtime task unless disarmed first.
///
/// Must be armed inside a multi-threaded tokio runtime so the timer keeps
/// running on a worker while the main thread blocks on prompts.
/// Dropping the guard disarms it.
pub struct Watchdog {
    handle: JoinHandle<()>,
}

impl Watchdog {
    pub fn arm<F>(limit: Duration, on_timeout: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            tracing::warn!(limit_secs = limit.as_secs(), "run ceiling reached");
            on_timeout();
        });

        Self { handle }
    }

    pub fn disarm(self) {
        self.handle.abort();
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

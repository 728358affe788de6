//! Bounded polling for driver implementations.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::{UiError, UiResult};

/// Call `probe` until it returns `true` or `timeout` elapses.
///
/// The probe always runs at least once. Errors from the probe abort the wait
/// immediately; there is no retry on error.
pub fn poll_until<F>(what: &str, timeout: Duration, interval: Duration, mut probe: F) -> UiResult<()>
where
    F: FnMut() -> UiResult<bool>,
{
    let started = Instant::now();
    loop {
        if probe()? {
            return Ok(());
        }

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            warn!(selector = what, ?timeout, "gave up waiting");
            return Err(UiError::timeout(what, timeout));
        }
        std::thread::sleep(interval.min(timeout - elapsed));
    }
}

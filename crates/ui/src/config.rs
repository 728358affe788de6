//! Wait and scroll settings for admin-UI helpers.

use std::time::Duration;

/// Environment variable overriding both wait timeouts, in whole seconds.
pub const TIMEOUT_ENV: &str = "SHOPKIT_UI_TIMEOUT_SECS";
/// Environment variable overriding the poll interval, in milliseconds.
pub const POLL_ENV: &str = "SHOPKIT_UI_POLL_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiConfig {
    /// How long a variation panel may take to become visible.
    pub element_timeout: Duration,
    /// How long the loading overlay may stay up.
    pub overlay_timeout: Duration,
    /// Pause between polls for drivers built on [`crate::wait::poll_until`].
    pub poll_interval: Duration,
    /// Scroll offset applied before clicking; the negative y keeps the target
    /// clear of the fixed admin header.
    pub scroll_offset: (i32, i32),
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            element_timeout: Duration::from_secs(15),
            overlay_timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(100),
            scroll_offset: (0, -200),
        }
    }
}

impl UiConfig {
    /// Defaults, overridden by [`TIMEOUT_ENV`] and [`POLL_ENV`] when set to
    /// valid integers. Invalid values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(secs) = lookup(TIMEOUT_ENV).and_then(|v| v.trim().parse::<u64>().ok()) {
            config.element_timeout = Duration::from_secs(secs);
            config.overlay_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = lookup(POLL_ENV).and_then(|v| v.trim().parse::<u64>().ok()) {
            config.poll_interval = Duration::from_millis(ms);
        }

        config
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.element_timeout = timeout;
        self.overlay_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_wait_fifteen_seconds() {
        let config = UiConfig::default();
        assert_eq!(config.element_timeout, Duration::from_secs(15));
        assert_eq!(config.overlay_timeout, Duration::from_secs(15));
        assert_eq!(config.scroll_offset, (0, -200));
    }

    #[test]
    fn lookup_overrides_timeouts_and_poll() {
        let config = UiConfig::from_lookup(|key| match key {
            TIMEOUT_ENV => Some("3".to_string()),
            POLL_ENV => Some(" 25 ".to_string()),
            _ => None,
        });
        assert_eq!(config.element_timeout, Duration::from_secs(3));
        assert_eq!(config.overlay_timeout, Duration::from_secs(3));
        assert_eq!(config.poll_interval, Duration::from_millis(25));
    }

    #[test]
    fn largest_timeout_is_usable_for_waits() {
        let config = UiConfig::from_lookup(|key| match key {
            TIMEOUT_ENV => Some(u64::MAX.to_string()),
            _ => None,
        });
        assert_eq!(config.element_timeout, Duration::from_secs(u64::MAX));

        crate::wait::poll_until("ready", config.element_timeout, Duration::from_millis(1), || Ok(true))
            .unwrap();
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = UiConfig::from_lookup(|_| Some("soon".to_string()));
        assert_eq!(config, UiConfig::default());
    }
}

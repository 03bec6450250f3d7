//! Input debouncing
//!
//! Every new value restarts the quiet period; the value is released once no
//! further input has arrived for the whole period. Only the last value of a
//! burst is ever released.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Default quiet period before a search term is applied
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(450);

/// Holds the latest value until the input goes quiet
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new value and restart the quiet period.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// Whether a value is waiting to be released
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the pending value if its quiet period has elapsed.
    pub fn take_ready(&mut self) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if Instant::now() >= deadline => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Wait for the quiet period to elapse and release the pending value.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn settled(&mut self) -> Option<T> {
        let deadline = self.pending.as_ref().map(|(_, deadline)| *deadline)?;
        sleep_until(deadline).await;
        self.take_ready()
    }

    /// Drop any pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_nothing_released_before_quiet_period() {
        let mut debouncer = Debouncer::default();
        debouncer.push("d");

        advance(Duration::from_millis(449)).await;
        assert_eq!(debouncer.take_ready(), None);
        assert!(debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_released_after_quiet_period() {
        let mut debouncer = Debouncer::default();
        debouncer.push("d");

        advance(Duration::from_millis(450)).await;
        assert_eq!(debouncer.take_ready(), Some("d"));
        assert_eq!(debouncer.take_ready(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_push_restarts_the_timer() {
        let mut debouncer = Debouncer::default();
        debouncer.push("d");
        advance(Duration::from_millis(300)).await;
        debouncer.push("di");
        advance(Duration::from_millis(300)).await;
        debouncer.push("dia");
        advance(Duration::from_millis(449)).await;
        assert_eq!(debouncer.take_ready(), None);

        advance(Duration::from_millis(1)).await;
        assert_eq!(debouncer.take_ready(), Some("dia"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_waits_and_releases_last_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        debouncer.push(1);
        debouncer.push(2);

        let start = Instant::now();
        assert_eq!(debouncer.settled().await, Some(2));
        assert!(start.elapsed() >= Duration::from_millis(200));
        assert_eq!(debouncer.settled().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let mut debouncer = Debouncer::default();
        debouncer.push("x");
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        advance(Duration::from_secs(1)).await;
        assert_eq!(debouncer.take_ready(), None);
    }
}

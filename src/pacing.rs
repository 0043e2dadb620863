//! Politeness pacing between source requests.

use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Fixed baseline delay plus uniform random jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    delay_ms: u64,
    jitter_ms: u64,
}

impl Pacing {
    pub fn new(delay_ms: u64, jitter_ms: u64) -> Self {
        Self { delay_ms, jitter_ms }
    }

    /// Draws the next pause, in `delay_ms..=delay_ms + jitter_ms`.
    pub fn next_delay(&self) -> Duration {
        if self.delay_ms == 0 {
            return Duration::ZERO;
        }

        let jitter = if self.jitter_ms > 0 {
            rand::rng().random_range(0..=self.jitter_ms)
        } else {
            0
        };

        Duration::from_millis(self.delay_ms.saturating_add(jitter))
    }

    /// Sleeps for the next drawn pause.
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }

        debug!("Pausing {}ms", delay.as_millis());
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delay_disables_pacing() {
        assert_eq!(Pacing::new(0, 0).next_delay(), Duration::ZERO);
        assert_eq!(Pacing::new(0, 500).next_delay(), Duration::ZERO);
    }

    #[test]
    fn test_fixed_delay_without_jitter() {
        assert_eq!(Pacing::new(1200, 0).next_delay(), Duration::from_millis(1200));
    }

    #[test]
    fn test_jitter_bounds() {
        let pacing = Pacing::new(1200, 400);
        for _ in 0..200 {
            let delay = pacing.next_delay();
            assert!(delay >= Duration::from_millis(1200));
            assert!(delay <= Duration::from_millis(1600));
        }
    }

    #[test]
    fn test_huge_delay_saturates() {
        assert_eq!(Pacing::new(u64::MAX, 1000).next_delay(), Duration::from_millis(u64::MAX));
    }

    #[tokio::test]
    async fn test_pause_sleeps() {
        let start = std::time::Instant::now();
        Pacing::new(20, 0).pause().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}

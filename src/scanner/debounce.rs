//! Debounce policy: how long the head item still has to sit.
//!
//! Bursts collapse because re-enqueueing a pending creator is a no-op:
//! N rapid actions cost one scan, delayed from the first action in the
//! burst, not the last.

use std::time::Duration;

use tokio::time::Instant;

/// Remaining wait before an item enqueued at `enqueued_at` is eligible:
/// `max(0, delay - (now - enqueued_at))`. The immediate sentinel (`None`)
/// is always eligible.
pub(crate) fn remaining(delay: Duration, enqueued_at: Option<Instant>, now: Instant) -> Duration {
    match enqueued_at {
        None => Duration::ZERO,
        Some(at) => delay.saturating_sub(now.duration_since(at)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_secs(300);

    #[test]
    fn fresh_item_waits_the_full_delay() {
        let now = Instant::now();
        assert_eq!(remaining(DELAY, Some(now), now), DELAY);
    }

    #[test]
    fn partially_aged_item_waits_the_rest() {
        let enqueued = Instant::now();
        let now = enqueued + Duration::from_secs(100);
        assert_eq!(remaining(DELAY, Some(enqueued), now), Duration::from_secs(200));
    }

    #[test]
    fn overdue_item_waits_zero() {
        let enqueued = Instant::now();
        let now = enqueued + Duration::from_secs(301);
        assert_eq!(remaining(DELAY, Some(enqueued), now), Duration::ZERO);
    }

    #[test]
    fn immediate_sentinel_waits_zero() {
        assert_eq!(remaining(DELAY, None, Instant::now()), Duration::ZERO);
    }
}

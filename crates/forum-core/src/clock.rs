use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Time source for expirations and bookkeeping timestamps.
///
/// Injected rather than read from a global so expiry logic is deterministic
/// under test.
pub trait Clock: Send + Sync {
    /// Unix timestamp (seconds).
    fn now_ts(&self) -> i64;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ts(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Manually driven clock for tests.
#[derive(Debug)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    pub fn new(now_ts: i64) -> Self {
        Self {
            now: AtomicI64::new(now_ts),
        }
    }

    pub fn set(&self, now_ts: i64) {
        self.now.store(now_ts, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ts(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_moves_only_when_told() {
        let clock = FixedClock::new(100);
        assert_eq!(clock.now_ts(), 100);

        clock.advance(50);
        assert_eq!(clock.now_ts(), 150);

        clock.set(10);
        assert_eq!(clock.now_ts(), 10);
    }
}

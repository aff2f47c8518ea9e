use std::time::{SystemTime, UNIX_EPOCH};

/// Current-time capability.
///
/// Freshness computation takes the clock as an argument instead of reading
/// the system time directly, so tests can freeze or advance it at will.
pub trait Clock: Send + Sync {
    /// Current time in epoch milliseconds.
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        // A pre-epoch system clock clamps to 0
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Frozen clock, for tests and deterministic replay.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

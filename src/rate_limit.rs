use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Fixed-window failure counter keyed by a normalized string (an email).
///
/// `check` never increments; callers record a failure only after the attempt
/// has actually failed.
pub struct AttemptLimiter {
    /// key -> (failed_count, window_start)
    entries: DashMap<String, (u32, Instant)>,
    max_failures: u32,
    window: Duration,
}

impl AttemptLimiter {
    pub fn new(max_failures: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_failures,
            window,
        }
    }

    /// Login limiter: 5 failures per 15 minutes.
    pub fn for_login() -> Self {
        Self::new(5, Duration::from_secs(15 * 60))
    }

    /// Ok if another attempt is allowed, else Err with seconds until the window resets.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        let now = Instant::now();

        let Some(entry) = self.entries.get(&normalize(key)) else {
            return Ok(());
        };

        let (count, start) = entry.value();
        let elapsed = now.duration_since(*start);

        if elapsed > self.window || *count < self.max_failures {
            return Ok(());
        }

        Err(self.window.as_secs().saturating_sub(elapsed.as_secs()))
    }

    pub fn record_failure(&self, key: &str) {
        let now = Instant::now();

        let mut entry = self.entries.entry(normalize(key)).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > self.window {
            *count = 1;
            *start = now;
        } else {
            *count += 1;
        }
    }

    pub fn reset(&self, key: &str) {
        self.entries.remove(&normalize(key));
    }

    /// Drop entries whose window has passed.
    pub fn cleanup(&self) {
        let now = Instant::now();
        let window = self.window;
        self.entries
            .retain(|_, (_, start)| now.duration_since(*start) <= window);
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

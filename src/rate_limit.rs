use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// In-memory sliding-window limiter for generation requests, keyed by
/// hashed client IP.
pub struct RateLimiter {
    max_requests: u64,
    window: Duration,
    entries: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_requests: u64, window: Duration) -> Self {
        RateLimiter {
            max_requests,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Vec<Instant>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record a request and return true if it is allowed (under the limit).
    pub fn check_and_record(&self, key: &str) -> bool {
        let mut map = self.entries();
        let now = Instant::now();

        let attempts = map.entry(key.to_string()).or_default();
        attempts.retain(|t| now.duration_since(*t) < self.window);

        if (attempts.len() as u64) < self.max_requests {
            attempts.push(now);
            true
        } else {
            false
        }
    }

    pub fn remaining(&self, key: &str) -> u64 {
        let map = self.entries();
        let now = Instant::now();
        let used = map
            .get(key)
            .map(|a| a.iter().filter(|t| now.duration_since(**t) < self.window).count())
            .unwrap_or(0);
        self.max_requests.saturating_sub(used as u64)
    }

    /// Drop keys with no attempts inside the window. Called by the sweeper.
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.entries().retain(|_, attempts| {
            attempts.retain(|t| now.duration_since(*t) < self.window);
            !attempts.is_empty()
        });
    }

    #[cfg(test)]
    pub fn tracked_keys(&self) -> usize {
        self.entries().len()
    }
}

// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rate Limiting
//!
//! Sliding-window limiter for repeated link opens. The store is bounded:
//! once `max_keys` identifiers are tracked, stale identifiers are dropped,
//! then the least recently used identifier that still has budget left.
//! An identifier at its limit is never evicted, so flooding the store with
//! new links cannot reset it. When every tracked identifier is at its limit
//! new identifiers are refused until one of them ages out.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use super::clock::{Clock, SystemClock};
use super::RateLimitConfig;

type Windows = HashMap<String, VecDeque<u64>>;

/// Rate limiter for multiple identifiers.
pub struct RateLimiter {
    /// Per-identifier attempt timestamps (Unix millis), oldest first.
    windows: Mutex<Windows>,
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Creates a rate limiter on the system clock.
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        RateLimiter {
            windows: Mutex::new(HashMap::new()),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Records an attempt for this identifier.
    ///
    /// Returns true if allowed, false if rate limited. Denied attempts are
    /// not recorded.
    pub fn check(&self, identifier: &str) -> bool {
        let now = self.clock.now_millis();
        let window = self.window_millis();
        let mut windows = self.lock();

        let max_keys = self.config.max_keys.max(1);
        if !windows.contains_key(identifier)
            && windows.len() >= max_keys
            && !make_room(&mut windows, now, window, max_keys, self.config.max_requests)
        {
            warn!(tracked = windows.len(), "rate limit store full, refusing new link");
            return false;
        }

        let stamps = windows.entry(identifier.to_string()).or_default();
        stamps.retain(|&t| now.saturating_sub(t) < window);

        if stamps.len() >= self.config.max_requests {
            return false;
        }
        stamps.push_back(now);
        true
    }

    /// Attempts left for this identifier in the current window.
    pub fn remaining(&self, identifier: &str) -> usize {
        let now = self.clock.now_millis();
        let window = self.window_millis();
        let used = self
            .lock()
            .get(identifier)
            .map(|stamps| active_count(stamps, now, window))
            .unwrap_or(0);
        self.config.max_requests.saturating_sub(used)
    }

    /// Drops identifiers with no attempts inside the window.
    ///
    /// Returns the number of identifiers removed.
    pub fn purge_stale(&self) -> usize {
        let now = self.clock.now_millis();
        let window = self.window_millis();
        let mut windows = self.lock();
        let before = windows.len();
        windows.retain(|_, stamps| is_active(stamps, now, window));
        before - windows.len()
    }

    /// Number of identifiers currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.lock().len()
    }

    /// Forgets every identifier.
    pub fn reset(&self) {
        self.lock().clear();
    }

    fn window_millis(&self) -> u64 {
        self.config.window_secs.saturating_mul(1000)
    }

    fn lock(&self) -> MutexGuard<'_, Windows> {
        self.windows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

fn is_active(stamps: &VecDeque<u64>, now: u64, window: u64) -> bool {
    stamps
        .back()
        .is_some_and(|&last| now.saturating_sub(last) < window)
}

fn active_count(stamps: &VecDeque<u64>, now: u64, window: u64) -> usize {
    stamps
        .iter()
        .filter(|&&t| now.saturating_sub(t) < window)
        .count()
}

/// Frees one slot. Returns false when every tracked identifier is at its
/// limit.
fn make_room(
    windows: &mut Windows,
    now: u64,
    window: u64,
    max_keys: usize,
    max_requests: usize,
) -> bool {
    windows.retain(|_, stamps| is_active(stamps, now, window));

    while windows.len() >= max_keys {
        let evictable = windows
            .iter()
            .filter(|(_, stamps)| active_count(stamps, now, window) < max_requests)
            .min_by_key(|(_, stamps)| stamps.back().copied().unwrap_or(0))
            .map(|(key, _)| key.clone());
        match evictable {
            Some(key) => {
                windows.remove(&key);
            }
            None => return false,
        }
    }
    true
}

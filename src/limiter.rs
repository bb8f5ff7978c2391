// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sliding-window rate limiter for the secure-ai admission endpoint.
//!
//! Enforces a dual-threshold policy per client key:
//! 1. Burst cap: at most `burst_limit` admits in any `burst_window_secs` span
//! 2. Sustained cap: at most `sustained_limit` admits in any `window_secs` span
//!
//! The limiter never reads a clock. Callers supply `now` (seconds since
//! epoch), which keeps every decision deterministic and unit-testable.

use crate::config::RateLimitConfig;
use dashmap::DashMap;
use std::collections::VecDeque;
use tracing::debug;

/// Timestamp in seconds since epoch, as supplied by the caller.
pub type Timestamp = f64;

/// Which threshold rejected the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitReason {
    /// Too many admits inside the burst sub-window
    BurstExceeded,
    /// Too many admits inside the full sliding window
    SustainedExceeded,
}

impl std::fmt::Display for LimitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BurstExceeded => write!(f, "Rate limit exceeded: burst control active"),
            Self::SustainedExceeded => {
                write!(f, "Rate limit exceeded: sustained rate cap reached")
            }
        }
    }
}

/// Verdict for a single request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// Whether the request may proceed
    pub admitted: bool,
    /// Admitted requests currently inside the window, including this one
    /// when admitted
    pub current_count: usize,
    /// Set when `admitted` is false
    pub reason: Option<LimitReason>,
}

impl Decision {
    fn admitted(count: usize) -> Self {
        Self {
            admitted: true,
            current_count: count,
            reason: None,
        }
    }

    fn rejected(count: usize, reason: LimitReason) -> Self {
        Self {
            admitted: false,
            current_count: count,
            reason: Some(reason),
        }
    }
}

/// Thread-safe admission rate limiter.
///
/// Per-key history lives in a sharded concurrent map, so decisions for
/// one key never serialize traffic for other keys, while the
/// prune-check-append sequence for a single key runs under one shard
/// guard and is atomic with respect to concurrent calls on that key.
pub struct RateLimiter {
    config: RateLimitConfig,
    /// Per-key log of admitted-request timestamps, oldest first
    state: DashMap<String, VecDeque<Timestamp>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            state: DashMap::new(),
        }
    }

    /// Decide whether a request for `key` arriving at `now` is admitted.
    ///
    /// Only admitted requests are recorded; rejections do not consume
    /// quota. Exactly `limit` requests are admissible per window: the
    /// request that would take the in-window count past the limit is the
    /// one that gets rejected.
    pub fn decide(&self, key: &str, now: Timestamp) -> Decision {
        let window = self.config.window_secs as f64;
        let burst_window = self.config.burst_window_secs as f64;

        // Entry guard covers prune, both checks, and the append.
        let mut log = self.state.entry(key.to_owned()).or_default();
        prune(&mut log, now, window);

        let count = log.len();

        if count >= self.config.sustained_limit as usize {
            debug!(key, count, "sustained rate cap reached");
            return Decision::rejected(count, LimitReason::SustainedExceeded);
        }

        // An empty log cannot be a burst; front() is the oldest retained
        // admit because the log is ordered oldest-first.
        if count >= self.config.burst_limit as usize {
            if let Some(&oldest) = log.front() {
                if now - oldest <= burst_window {
                    debug!(key, count, "burst cap reached");
                    return Decision::rejected(count, LimitReason::BurstExceeded);
                }
            }
        }

        log.push_back(now);
        Decision::admitted(count + 1)
    }

    /// Drop keys whose log is empty once pruned against `now`.
    ///
    /// Entries are otherwise pruned lazily on access, so a client that
    /// goes quiet would pin its key forever without this. Called
    /// periodically from a background task.
    pub fn sweep(&self, now: Timestamp) {
        let window = self.config.window_secs as f64;
        self.state.retain(|_, log| {
            prune(log, now, window);
            !log.is_empty()
        });
    }

    /// Number of client keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.state.len()
    }
}

/// Trim timestamps older than the window off the front of the log.
fn prune(log: &mut VecDeque<Timestamp>, now: Timestamp, window: f64) {
    while log.front().is_some_and(|&t| now - t > window) {
        log.pop_front();
    }
}

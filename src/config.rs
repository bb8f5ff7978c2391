// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the secure-ai admission filter.
//!
//! Default values match the policy the original service shipped with:
//! 13 requests in any 5-second burst window, 44 requests in any rolling
//! 60-second window, per client key.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the admission filter service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Input sanitization configuration
    #[serde(default)]
    pub sanitize: SanitizeConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Dual-threshold sliding-window rate limit parameters.
///
/// Both thresholds are inclusive caps on admitted requests: at most
/// `burst_limit` admits in any `burst_window_secs` span and at most
/// `sustained_limit` admits in any `window_secs` span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Full sliding window length in seconds (default: 60)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Maximum admitted requests within the burst sub-window (default: 13)
    #[serde(default = "default_burst_limit")]
    pub burst_limit: u32,

    /// Burst sub-window length in seconds (default: 5)
    #[serde(default = "default_burst_window_secs")]
    pub burst_window_secs: u64,

    /// Maximum admitted requests within the full window (default: 44)
    #[serde(default = "default_sustained_limit")]
    pub sustained_limit: u32,

    /// Interval between stale-key sweeps in seconds (default: 60)
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

/// Input sanitization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizeConfig {
    /// Maximum accepted input size in bytes (default: 65536)
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,

    /// Strip ASCII control characters from accepted input (default: true)
    #[serde(default = "default_true")]
    pub strip_control_chars: bool,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_window_secs() -> u64 {
    60
}

fn default_burst_limit() -> u32 {
    13
}

fn default_burst_window_secs() -> u64 {
    5
}

fn default_sustained_limit() -> u32 {
    44
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_max_input_bytes() -> usize {
    65536
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            sanitize: SanitizeConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            burst_limit: default_burst_limit(),
            burst_window_secs: default_burst_window_secs(),
            sustained_limit: default_sustained_limit(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
            strip_control_chars: default_true(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the full window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Get the sweep interval duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

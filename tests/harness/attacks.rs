// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Attack simulation patterns for security testing.

/// Attack pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of requests to send
    pub total_requests: usize,
    /// Requests per second rate (sets the virtual clock step)
    pub requests_per_second: f64,
    /// Number of unique user identifiers to cycle through
    pub unique_users: usize,
    /// Number of unique peer IPs to cycle through
    pub unique_ips: usize,
    /// Whether request bodies carry the required `input` field
    pub include_input: bool,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            requests_per_second: 10.0,
            unique_users: 1,
            unique_ips: 1,
            include_input: true,
        }
    }
}

/// Predefined attack patterns.
impl AttackConfig {
    /// Single client flood - basic DoS from one user/IP pair.
    pub fn single_client_flood() -> Self {
        Self {
            total_requests: 200,
            requests_per_second: 100.0,
            ..Default::default()
        }
    }

    /// Burst attack - very high rate for a short duration.
    pub fn burst_attack() -> Self {
        Self {
            total_requests: 50,
            requests_per_second: 500.0,
            ..Default::default()
        }
    }

    /// Sustained drip - slow enough to dodge the burst cap, fast enough
    /// to hit the sustained cap.
    pub fn sustained_drip() -> Self {
        Self {
            total_requests: 120,
            requests_per_second: 2.0,
            ..Default::default()
        }
    }

    /// Slow drip - stays under both caps.
    pub fn slow_drip() -> Self {
        Self {
            total_requests: 100,
            requests_per_second: 0.5,
            ..Default::default()
        }
    }

    /// Distributed attack - many client keys, low rate each.
    pub fn distributed_attack() -> Self {
        Self {
            total_requests: 500,
            requests_per_second: 50.0,
            unique_users: 5,
            unique_ips: 100,
            ..Default::default()
        }
    }

    /// Missing field attack - bodies without the required `input`.
    pub fn missing_field_attack() -> Self {
        Self {
            total_requests: 50,
            requests_per_second: 10.0,
            unique_users: 5,
            unique_ips: 5,
            include_input: false,
            ..Default::default()
        }
    }

    /// Virtual arrival time of the i-th request.
    pub fn arrival_time(&self, index: usize) -> f64 {
        index as f64 / self.requests_per_second
    }
}

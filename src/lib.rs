// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Secure-AI Rate Limiter
//!
//! This crate provides a request-admission filter for the secure-ai input
//! sanitization endpoint, enforcing a dual-threshold sliding-window policy
//! per client key:
//!
//! - Burst cap: at most 13 admits in any 5-second sub-window (default)
//! - Sustained cap: at most 44 admits in any rolling 60-second window (default)
//! - Only admitted requests consume quota
//! - Per-key atomic decisions over sharded state, deterministic on a
//!   caller-supplied clock

pub mod config;
pub mod handlers;
pub mod limiter;
pub mod metrics;
pub mod sanitizer;

pub use config::Config;
pub use limiter::{Decision, LimitReason, RateLimiter};
pub use sanitizer::{InputSanitizer, ValidationError};

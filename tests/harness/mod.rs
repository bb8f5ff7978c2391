// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for admission-filter attack simulation.
//!
//! Attack runs drive the limiter with a virtual clock derived from the
//! configured request rate, so every outcome count is deterministic.

pub mod attacks;
pub mod generators;

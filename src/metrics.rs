// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus metrics for the admission filter.

use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Metric handles registered against a private registry, so each service
/// instance (and each test) gets isolated counters.
pub struct Metrics {
    registry: Registry,
    /// Total requests seen by the secure-ai endpoint
    pub requests_total: IntCounter,
    /// Requests admitted by the rate limiter
    pub admitted_total: IntCounter,
    /// Requests rejected, labeled by threshold ("burst" or "sustained")
    pub rejected_total: IntCounterVec,
    /// Requests failing boundary validation
    pub validation_failures_total: IntCounter,
    /// Requests failing with an internal boundary fault
    pub internal_faults_total: IntCounter,
    /// Client keys currently tracked by the limiter
    pub tracked_keys: IntGauge,
}

impl Metrics {
    /// Create and register all metrics.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounter::with_opts(Opts::new(
            "secureai_requests_total",
            "Total requests received on the secure-ai endpoint",
        ))?;
        let admitted_total = IntCounter::with_opts(Opts::new(
            "secureai_admitted_total",
            "Requests admitted by the rate limiter",
        ))?;
        let rejected_total = IntCounterVec::new(
            Opts::new(
                "secureai_rejected_total",
                "Requests rejected by the rate limiter",
            ),
            &["threshold"],
        )?;
        let validation_failures_total = IntCounter::with_opts(Opts::new(
            "secureai_validation_failures_total",
            "Requests rejected by boundary validation",
        ))?;
        let internal_faults_total = IntCounter::with_opts(Opts::new(
            "secureai_internal_faults_total",
            "Requests failed by an internal boundary fault",
        ))?;
        let tracked_keys = IntGauge::with_opts(Opts::new(
            "secureai_tracked_keys",
            "Client keys currently tracked by the rate limiter",
        ))?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(admitted_total.clone()))?;
        registry.register(Box::new(rejected_total.clone()))?;
        registry.register(Box::new(validation_failures_total.clone()))?;
        registry.register(Box::new(internal_faults_total.clone()))?;
        registry.register(Box::new(tracked_keys.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            admitted_total,
            rejected_total,
            validation_failures_total,
            internal_faults_total,
            tracked_keys,
        })
    }

    /// Render the registry in Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

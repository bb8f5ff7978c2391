// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the secure-ai admission filter.
//!
//! The boundary owns the whole error taxonomy: validation failures map to
//! 400, rate-limit rejections to 429, and anything unexpected (including a
//! body that is not JSON) to a generic 500 with no internal detail leaked.

use crate::config::Config;
use crate::limiter::RateLimiter;
use crate::metrics::Metrics;
use crate::sanitizer::InputSanitizer;
use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared application state.
pub struct AppState {
    pub limiter: RateLimiter,
    pub sanitizer: InputSanitizer,
    pub metrics: Metrics,
    pub config: Config,
}

/// Request body for the secure-ai endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureAiRequest {
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Verdict body returned for every secure-ai request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureAiResponse {
    pub blocked: bool,
    pub reason: String,
    pub sanitized_output: Option<String>,
    pub confidence: f64,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

// Verdict confidences, carried over from the original service contract.
const CONFIDENCE_ADMITTED: f64 = 0.95;
const CONFIDENCE_RATE_LIMITED: f64 = 0.99;
const CONFIDENCE_VALIDATION: f64 = 0.90;
const CONFIDENCE_INTERNAL_FAULT: f64 = 0.80;

/// Root endpoint.
pub async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "running" }))
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "secure-ai-rate-limiter",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.encode() {
        Ok(text) => text.into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Admission + sanitization verdict for one request.
///
/// The body is taken as raw bytes rather than through the `Json`
/// extractor so a malformed body follows our 500 internal-fault path
/// instead of the extractor's rejection.
pub async fn secure_ai(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Response {
    state.metrics.requests_total.inc();

    let req: SecureAiRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            warn!(error = %e, "Malformed request body");
            state.metrics.internal_faults_total.inc();
            return verdict(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal security processing error",
                None,
                CONFIDENCE_INTERNAL_FAULT,
            );
        }
    };

    if let Err(e) = state.sanitizer.validate(req.input.as_deref()) {
        info!(error = %e, "Validation failed");
        state.metrics.validation_failures_total.inc();
        return verdict(
            StatusCode::BAD_REQUEST,
            "Validation error",
            None,
            CONFIDENCE_VALIDATION,
        );
    }
    // validate() guarantees input is present past this point
    let input = req.input.unwrap_or_default();

    let user_id = req.user_id.as_deref().unwrap_or("anon");
    let key = client_key(user_id, Some(addr.ip()));
    let now = wall_now();

    let decision = state.limiter.decide(&key, now);

    if !decision.admitted {
        let reason = decision
            .reason
            .map(|r| r.to_string())
            .unwrap_or_else(|| "Rate limit exceeded".to_string());
        info!(
            key = %key,
            count = decision.current_count,
            reason = %reason,
            "Request rate limited"
        );
        state
            .metrics
            .rejected_total
            .with_label_values(&[match decision.reason {
                Some(crate::limiter::LimitReason::SustainedExceeded) => "sustained",
                _ => "burst",
            }])
            .inc();

        let retry_after = state.config.rate_limit.window_secs.to_string();
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, retry_after)],
            Json(SecureAiResponse {
                blocked: true,
                reason,
                sanitized_output: None,
                confidence: CONFIDENCE_RATE_LIMITED,
            }),
        )
            .into_response();
    }

    debug!(key = %key, count = decision.current_count, "Request admitted");
    state.metrics.admitted_total.inc();

    verdict(
        StatusCode::OK,
        "Input passed all security checks",
        Some(state.sanitizer.sanitize(&input)),
        CONFIDENCE_ADMITTED,
    )
}

fn verdict(
    status: StatusCode,
    reason: &str,
    sanitized_output: Option<String>,
    confidence: f64,
) -> Response {
    (
        status,
        Json(SecureAiResponse {
            blocked: status != StatusCode::OK,
            reason: reason.to_string(),
            sanitized_output,
            confidence,
        }),
    )
        .into_response()
}

/// Derive the rate-limit subject key from the application identifier and
/// the peer address, with a sentinel when the address is unavailable.
pub fn client_key(user_id: &str, peer: Option<IpAddr>) -> String {
    match peer {
        Some(ip) => format!("{user_id}:{ip}"),
        None => format!("{user_id}:unknown"),
    }
}

/// Wall-clock seconds since epoch, the only place the service reads time.
pub fn wall_now() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Secure-AI Rate Limiter Service
//!
//! A request-admission filter in front of the secure-ai input sanitization
//! endpoint. Each request gets a structured verdict:
//!
//! - admitted → 200 with the sanitized input
//! - rate limited → 429 with `Retry-After`
//! - invalid → 400, internal fault → 500, with no internal detail leaked
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `WINDOW_SECS`: Full sliding window in seconds (default: 60)
//! - `BURST_LIMIT`: Max admits within the burst sub-window (default: 13)
//! - `BURST_WINDOW_SECS`: Burst sub-window in seconds (default: 5)
//! - `SUSTAINED_LIMIT`: Max admits within the full window (default: 44)
//! - `SWEEP_INTERVAL_SECS`: Stale-key sweep interval (default: 60)
//! - `MAX_INPUT_BYTES`: Max accepted input size (default: 65536)

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secure_ai_rate_limiter::{
    config::Config,
    handlers::{self, health, home, secure_ai, AppState},
    limiter::RateLimiter,
    metrics::Metrics,
    sanitizer::InputSanitizer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    info!(
        bind_addr = %config.bind_addr,
        window_secs = config.rate_limit.window_secs,
        burst_limit = config.rate_limit.burst_limit,
        burst_window_secs = config.rate_limit.burst_window_secs,
        sustained_limit = config.rate_limit.sustained_limit,
        "Starting secure-ai rate limiter"
    );

    // Create application state
    let limiter = RateLimiter::new(config.rate_limit.clone());
    let sanitizer = InputSanitizer::new(config.sanitize.clone());
    let metrics = Metrics::new()?;

    let state = Arc::new(AppState {
        limiter,
        sanitizer,
        metrics,
        config: config.clone(),
    });

    // Spawn stale-key sweep task
    let sweep_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_state.config.rate_limit.sweep_interval());
        loop {
            interval.tick().await;
            sweep_state.limiter.sweep(handlers::wall_now());
            sweep_state
                .metrics
                .tracked_keys
                .set(sweep_state.limiter.tracked_keys() as i64);
        }
    });

    // Build router; the original service fronts browser clients, so CORS
    // stays wide open.
    let mut app = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/secure-ai", post(secure_ai));

    if config.metrics.enabled {
        app = app.route(&config.metrics.path, get(handlers::metrics));
    }

    let app = app
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Load configuration from environment variables.
fn load_config() -> Config {
    Config {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        rate_limit: secure_ai_rate_limiter::config::RateLimitConfig {
            window_secs: env_or("WINDOW_SECS", 60),
            burst_limit: env_or("BURST_LIMIT", 13),
            burst_window_secs: env_or("BURST_WINDOW_SECS", 5),
            sustained_limit: env_or("SUSTAINED_LIMIT", 44),
            sweep_interval_secs: env_or("SWEEP_INTERVAL_SECS", 60),
        },
        sanitize: secure_ai_rate_limiter::config::SanitizeConfig {
            max_input_bytes: env_or("MAX_INPUT_BYTES", 65536),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

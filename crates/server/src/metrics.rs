//! Prometheus metrics for the Halftone server.
//!
//! The `/metrics` endpoint is unauthenticated to allow Prometheus scraping
//! and must be network-restricted to authorized scraper IPs at the
//! infrastructure level.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

pub static READER_PAGE_VIEWS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "halftone_reader_page_views_total",
        "Total number of reader page views served",
    )
    .expect("metric creation failed")
});

pub static READER_CHAPTER_CROSSINGS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "halftone_reader_chapter_crossings_total",
        "Total number of navigation targets that crossed a chapter boundary",
    )
    .expect("metric creation failed")
});

pub static TENANT_REDIRECTS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "halftone_tenant_redirects_total",
        "Total number of reader requests redirected to the marketing root",
    )
    .expect("metric creation failed")
});

pub static REORDERS_APPLIED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "halftone_reorders_applied_total",
        "Total number of chapter/page reorder operations applied",
    )
    .expect("metric creation failed")
});

pub static REORDER_MISMATCHES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "halftone_reorder_mismatches_total",
        "Total number of reorder requests rejected for set mismatch",
    )
    .expect("metric creation failed")
});

static REGISTER: Once = Once::new();

/// Register all metrics with the global registry. Idempotent.
pub fn register_metrics() {
    REGISTER.call_once(|| {
        REGISTRY
            .register(Box::new(READER_PAGE_VIEWS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(READER_CHAPTER_CROSSINGS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(TENANT_REDIRECTS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(REORDERS_APPLIED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(REORDER_MISMATCHES.clone()))
            .expect("metric registration failed");
    });
}

/// GET /metrics - Prometheus exposition format.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let families = REGISTRY.gather();
    let mut buffer = Vec::new();
    match encoder.encode(&families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("Content-Type", encoder.format_type().to_string())],
            buffer,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encoding failed: {e}"),
        )
            .into_response(),
    }
}

//! Route configuration.

use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let dashboard_routes = Router::new()
        // Health check (intentionally unauthenticated for load balancers/k8s probes)
        .route("/v1/health", get(handlers::health_check))
        // Comic management
        .route(
            "/v1/dashboard/comics",
            post(handlers::create_comic).get(handlers::list_comics),
        )
        .route(
            "/v1/dashboard/comics/{comic_id}",
            get(handlers::get_comic)
                .put(handlers::update_comic)
                .delete(handlers::delete_comic),
        )
        // Chapter management. The static "order" segment takes priority over
        // the {chapter_id} capture.
        .route(
            "/v1/dashboard/comics/{comic_id}/chapters/order",
            put(handlers::reorder_chapters),
        )
        .route(
            "/v1/dashboard/comics/{comic_id}/chapters",
            post(handlers::create_chapter),
        )
        .route(
            "/v1/dashboard/comics/{comic_id}/chapters/{chapter_id}",
            put(handlers::update_chapter).delete(handlers::delete_chapter),
        )
        // Page management
        .route(
            "/v1/dashboard/comics/{comic_id}/pages/order",
            put(handlers::reorder_pages),
        )
        .route(
            "/v1/dashboard/comics/{comic_id}/pages",
            post(handlers::create_pages).delete(handlers::delete_pages),
        );

    let reader_routes = Router::new()
        // Tenant reader endpoints, addressed by the Host header
        .route("/page/{page_number}", get(handlers::get_standalone_page))
        .route(
            "/{chapter_id}/{page_number}",
            get(handlers::get_chapter_page),
        );

    let mut router = Router::new().merge(dashboard_routes).merge(reader_routes);

    // Conditionally add metrics endpoint based on config.
    // SECURITY: When enabled, this endpoint MUST be network-restricted
    // to authorized Prometheus scraper IPs only.
    if state.config.server.metrics_enabled {
        let metrics_routes = Router::new().route("/metrics", get(metrics_handler));
        router = router.merge(metrics_routes);
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

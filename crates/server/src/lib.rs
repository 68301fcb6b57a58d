//! HTTP API server for the Halftone comic platform.
//!
//! This crate provides both public surfaces:
//! - Reader endpoints, tenant-addressed via the Host header
//! - Dashboard CRUD endpoints for comics, chapters and pages
//! - Chapter/page reordering with permutation validation
//! - Health and Prometheus metrics endpoints

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;
pub mod tenant;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

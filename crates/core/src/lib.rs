//! Core domain types and shared logic for the Halftone publishing platform.
//!
//! This crate defines the tenant-facing logic that does not touch the
//! database or the HTTP layer:
//! - Host header resolution (subdomain and custom-domain addressing)
//! - Double-page spread math and within-chapter navigation
//! - Configuration types shared across crates

pub mod config;
pub mod error;
pub mod host;
pub mod spread;

pub use config::{AppConfig, MetadataConfig, ServerConfig, TenancyConfig};
pub use error::{Error, Result};
pub use host::{HostResolver, TenantKey};
pub use spread::{SpreadView, paginate, parse_page_number, spread_start};

/// Maximum length of a tenant slug (DNS label limit).
pub const MAX_SLUG_LEN: usize = 63;

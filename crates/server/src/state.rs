//! Application state shared across handlers.

use halftone_core::config::AppConfig;
use halftone_core::host::HostResolver;
use halftone_metadata::MetadataStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub metadata: Arc<dyn MetadataStore>,
    pub resolver: Arc<HostResolver>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: AppConfig, metadata: Arc<dyn MetadataStore>) -> Self {
        let resolver = Arc::new(HostResolver::new(&config.tenancy));
        Self {
            config: Arc::new(config),
            metadata,
            resolver,
        }
    }
}

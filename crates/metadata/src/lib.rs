//! Metadata store abstraction and implementations for Halftone.
//!
//! This crate provides the control-plane data model:
//! - Comic (tenant) records with slug and custom-domain addressing
//! - Chapters with per-comic sequential numbering and publish dates
//! - Pages with per-scope sequential numbering
//! - Two-phase sibling renumbering for reorder and bulk-delete operations

pub mod error;
pub mod models;
pub mod repos;
pub mod store;

pub use error::{MetadataError, MetadataResult};
pub use store::{MetadataStore, SqliteStore};

use halftone_core::config::MetadataConfig;
use std::sync::Arc;

/// Create a metadata store from configuration.
pub async fn from_config(config: &MetadataConfig) -> MetadataResult<Arc<dyn MetadataStore>> {
    match config {
        MetadataConfig::Sqlite {
            path,
            query_timeout_secs,
        } => {
            let store = SqliteStore::new(path, *query_timeout_secs).await?;
            Ok(Arc::new(store) as Arc<dyn MetadataStore>)
        }
    }
}

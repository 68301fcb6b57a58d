//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tenancy: TenancyConfig,
    pub metadata: MetadataConfig,
}

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Enable the /metrics endpoint for Prometheus scraping (default: true).
    /// When enabled, restrict the endpoint to scraper IPs at the
    /// infrastructure level.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

/// Tenant addressing configuration.
///
/// `base_domains` are the platform's own host suffixes: any request host that
/// is neither one of these nor a subdomain of one is treated as a tenant
/// custom domain and looked up verbatim. `dev_base_domains` are the
/// single-label development hosts (e.g. `localhost`) where a two-label host
/// like `mycomic.localhost` still carries a subdomain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TenancyConfig {
    #[serde(default = "default_base_domains")]
    pub base_domains: Vec<String>,
    #[serde(default = "default_dev_base_domains")]
    pub dev_base_domains: Vec<String>,
    /// Where reader requests without a resolvable tenant are redirected
    /// (the marketing root).
    #[serde(default = "default_root_redirect")]
    pub root_redirect: String,
}

/// Metadata store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MetadataConfig {
    /// SQLite-based metadata store.
    Sqlite {
        /// Path to the database file.
        path: PathBuf,
        /// Query timeout in seconds (advisory for SQLite).
        query_timeout_secs: Option<u64>,
    },
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_base_domains() -> Vec<String> {
    vec![
        "localhost".to_string(),
        "lvh.me".to_string(),
        "webcomic.studio".to_string(),
    ]
}

fn default_dev_base_domains() -> Vec<String> {
    vec!["localhost".to_string()]
}

fn default_root_redirect() -> String {
    "/".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            base_domains: default_base_domains(),
            dev_base_domains: default_dev_base_domains(),
            root_redirect: default_root_redirect(),
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("./data/metadata.db"),
            query_timeout_secs: None,
        }
    }
}

//! Host header resolution for tenant addressing.
//!
//! A tenant is addressed either by a subdomain on one of the platform's base
//! domains (`mycomic.webcomic.studio`) or by a custom domain the tenant owns
//! (`www.mycomic.example`). Resolution is a pure function of the host string
//! and the configured base-domain allowlist, so it stays testable without any
//! ambient environment reads.

use crate::MAX_SLUG_LEN;
use crate::config::TenancyConfig;

/// Lookup key for a tenant, derived from the request host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantKey {
    /// Subdomain label on a platform base domain.
    Slug(String),
    /// Full (port-stripped) hostname of a tenant custom domain.
    Domain(String),
}

/// Resolves inbound host headers to tenant keys.
#[derive(Debug, Clone)]
pub struct HostResolver {
    base_domains: Vec<String>,
    dev_base_domains: Vec<String>,
}

impl HostResolver {
    pub fn new(config: &TenancyConfig) -> Self {
        Self {
            base_domains: config.base_domains.clone(),
            dev_base_domains: config.dev_base_domains.clone(),
        }
    }

    fn strip_port(host: &str) -> &str {
        host.split(':').next().unwrap_or(host)
    }

    /// Extract the subdomain label from a host header, if any.
    ///
    /// `mycomic.localhost:8080` -> `Some("mycomic")`,
    /// `mycomic.webcomic.studio` -> `Some("mycomic")`,
    /// `webcomic.studio` / `localhost` / `www.webcomic.studio` -> `None`.
    pub fn extract_subdomain(&self, host: Option<&str>) -> Option<String> {
        let hostname = Self::strip_port(host?);
        let labels: Vec<&str> = hostname.split('.').collect();

        if labels.len() <= 1 {
            return None;
        }

        // Two labels only carry a subdomain when the second is a recognized
        // development base domain (`mycomic.localhost`). Otherwise this is a
        // bare production domain like `webcomic.studio` itself.
        if labels.len() == 2 && !self.dev_base_domains.iter().any(|d| d == labels[1]) {
            return None;
        }

        let label = labels[0];
        if label == "www" {
            return None;
        }
        Some(label.to_string())
    }

    /// Whether a (port-stripped) hostname is outside every platform base
    /// domain, and therefore a custom-domain lookup key.
    pub fn is_custom_domain(&self, hostname: &str) -> bool {
        !self.base_domains.iter().any(|base| {
            hostname == base || hostname.strip_suffix(base).is_some_and(|p| p.ends_with('.'))
        })
    }

    /// Resolve a host header to a tenant key.
    ///
    /// Returns `None` when the host is absent, empty, or a platform host with
    /// no subdomain; the caller treats that as the marketing root.
    pub fn resolve(&self, host: Option<&str>) -> Option<TenantKey> {
        let hostname = Self::strip_port(host?);
        if hostname.is_empty() {
            return None;
        }
        if self.is_custom_domain(hostname) {
            return Some(TenantKey::Domain(hostname.to_string()));
        }
        self.extract_subdomain(Some(hostname)).map(TenantKey::Slug)
    }
}

/// Validate a tenant slug: a DNS label that can serve as a subdomain.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && slug != "www"
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

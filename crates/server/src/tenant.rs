//! Per-request tenant resolution and preview overrides.
//!
//! Reader routes resolve the tenant from the Host header: a subdomain on a
//! platform base domain, or a full custom domain. A host that resolves to no
//! tenant key, or a subdomain mapped to no comic, is treated as the marketing
//! root rather than a hard error; an unmapped custom domain is a real
//! `TenantNotFound`.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::http::HeaderMap;
use axum::http::header::HOST;
use halftone_core::host::TenantKey;
use halftone_metadata::models::{ChapterRow, ComicRow};
use serde::Deserialize;
use uuid::Uuid;

/// Reader query parameters. `preview=true` simulates unsaved dashboard edits
/// for the current request without persisting anything.
#[derive(Debug, Default, Deserialize)]
pub struct ReaderParams {
    pub preview: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "doubleSpread")]
    pub double_spread: Option<String>,
    #[serde(rename = "chapterOrder")]
    pub chapter_order: Option<String>,
}

impl ReaderParams {
    pub fn is_preview(&self) -> bool {
        self.preview.as_deref() == Some("true")
    }
}

/// Outcome of host resolution for reader routes.
pub enum Resolved {
    Tenant(Box<ComicRow>),
    /// No tenant addressable from this host; send the reader to the
    /// marketing root.
    RedirectToRoot,
}

/// Resolve the tenant for a reader request, with comic-level preview
/// overrides applied.
pub async fn resolve_tenant(
    state: &AppState,
    headers: &HeaderMap,
    params: &ReaderParams,
) -> ApiResult<Resolved> {
    let host = headers.get(HOST).and_then(|v| v.to_str().ok());

    let Some(key) = state.resolver.resolve(host) else {
        return Ok(Resolved::RedirectToRoot);
    };

    let mut comic = match key {
        TenantKey::Slug(slug) => match state.metadata.get_comic_by_slug(&slug).await? {
            Some(comic) => comic,
            // An unmapped subdomain may legitimately be the marketing root
            // in disguise.
            None => return Ok(Resolved::RedirectToRoot),
        },
        TenantKey::Domain(domain) => state
            .metadata
            .get_comic_by_domain(&domain)
            .await?
            .ok_or_else(|| ApiError::TenantNotFound(format!("no comic for domain '{domain}'")))?,
    };

    if params.is_preview() {
        if let Some(description) = &params.description {
            comic.description = Some(description.clone());
        }
        if let Some(flag) = &params.double_spread {
            comic.double_spread = flag == "true";
        }
    }

    Ok(Resolved::Tenant(Box::new(comic)))
}

/// Load a tenant's ordered chapter list, applying the `chapterOrder` preview
/// override. The standalone page view never calls this; it renders no
/// chapter selector at all.
pub async fn tenant_chapters(
    state: &AppState,
    comic_id: Uuid,
    params: &ReaderParams,
) -> ApiResult<Vec<ChapterRow>> {
    let mut chapters = state.metadata.list_chapters(comic_id).await?;

    if params.is_preview()
        && let Some(order) = &params.chapter_order
    {
        let ids: Vec<Uuid> = order
            .split(',')
            .filter_map(|s| Uuid::parse_str(s.trim()).ok())
            .collect();
        let reordered: Vec<ChapterRow> = ids
            .iter()
            .filter_map(|id| chapters.iter().find(|ch| ch.chapter_id == *id).cloned())
            .collect();
        // Only a complete permutation of the real chapter list is applied;
        // anything else is ignored.
        if reordered.len() == chapters.len() {
            chapters = reordered;
        }
    }

    Ok(chapters)
}

//! Dashboard CRUD endpoints.
//!
//! All routes require the `x-account-id` header injected by the upstream
//! auth proxy and operate only on comics owned by that account. Reordering
//! endpoints submit a full permutation of the existing sibling IDs; anything
//! else is rejected with no effect.

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{require_account, require_owned_comic};
use crate::metrics;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use halftone_core::host::is_valid_slug;
use halftone_metadata::MetadataError;
use halftone_metadata::models::{ChapterRow, ComicRow, PageRow};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

// =============================================================================
// Request/response types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateComicRequest {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub tagline: Option<String>,
    pub domain: Option<String>,
    #[serde(default)]
    pub double_spread: bool,
}

/// Partial update; absent fields are left unchanged. An empty string clears
/// an optional text field. The slug is immutable.
#[derive(Debug, Deserialize)]
pub struct UpdateComicRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tagline: Option<String>,
    pub domain: Option<String>,
    pub double_spread: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateChapterRequest {
    pub title: String,
    /// RFC 3339 timestamp; absent means not yet published.
    pub published_date: Option<String>,
}

/// Partial update; an empty `published_date` string unpublishes the chapter.
#[derive(Debug, Deserialize)]
pub struct UpdateChapterRequest {
    pub title: Option<String>,
    pub published_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderChaptersRequest {
    pub chapter_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePagesRequest {
    /// Absent for standalone pages.
    pub chapter_id: Option<Uuid>,
    /// Image references, appended in order after the scope's last page.
    pub image_urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderPagesRequest {
    pub chapter_id: Option<Uuid>,
    pub page_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct DeletePagesRequest {
    pub chapter_id: Option<Uuid>,
    pub page_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ComicResponse {
    pub comic_id: Uuid,
    pub slug: String,
    pub domain: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub tagline: Option<String>,
    pub double_spread: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChapterResponse {
    pub chapter_id: Uuid,
    pub comic_id: Uuid,
    pub number: i64,
    pub title: String,
    pub published_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub page_id: Uuid,
    pub chapter_id: Option<Uuid>,
    pub number: i64,
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct DeletePagesResponse {
    pub deleted: u64,
}

impl From<&ComicRow> for ComicResponse {
    fn from(comic: &ComicRow) -> Self {
        Self {
            comic_id: comic.comic_id,
            slug: comic.slug.clone(),
            domain: comic.domain.clone(),
            title: comic.title.clone(),
            description: comic.description.clone(),
            tagline: comic.tagline.clone(),
            double_spread: comic.double_spread,
            created_at: comic.created_at.format(&Rfc3339).ok(),
            updated_at: comic.updated_at.format(&Rfc3339).ok(),
        }
    }
}

impl From<&ChapterRow> for ChapterResponse {
    fn from(chapter: &ChapterRow) -> Self {
        Self {
            chapter_id: chapter.chapter_id,
            comic_id: chapter.comic_id,
            number: chapter.number,
            title: chapter.title.clone(),
            published_date: chapter.published_date.and_then(|d| d.format(&Rfc3339).ok()),
        }
    }
}

impl From<&PageRow> for PageResponse {
    fn from(page: &PageRow) -> Self {
        Self {
            page_id: page.page_id,
            chapter_id: page.chapter_id,
            number: page.number,
            image_url: page.image_url.clone(),
        }
    }
}

fn parse_published_date(raw: &str) -> ApiResult<OffsetDateTime> {
    OffsetDateTime::parse(raw, &Rfc3339)
        .map_err(|_| ApiError::BadRequest(format!("invalid published_date: {raw}")))
}

fn clear_on_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

// =============================================================================
// Comic endpoints
// =============================================================================

/// POST /v1/dashboard/comics - Create a comic.
pub async fn create_comic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateComicRequest>,
) -> ApiResult<(StatusCode, Json<ComicResponse>)> {
    let owner_id = require_account(&headers)?;
    if !is_valid_slug(&req.slug) {
        return Err(halftone_core::Error::InvalidSlug(req.slug).into());
    }

    let now = OffsetDateTime::now_utc();
    let comic = ComicRow {
        comic_id: Uuid::new_v4(),
        owner_id,
        slug: req.slug,
        domain: req.domain.filter(|d| !d.is_empty()),
        title: req.title,
        description: req.description.filter(|d| !d.is_empty()),
        tagline: req.tagline.filter(|t| !t.is_empty()),
        double_spread: req.double_spread,
        created_at: now,
        updated_at: now,
    };
    state.metadata.create_comic(&comic).await?;

    tracing::info!(comic_id = %comic.comic_id, slug = %comic.slug, "Comic created");
    Ok((StatusCode::CREATED, Json((&comic).into())))
}

/// GET /v1/dashboard/comics - List the account's comics.
pub async fn list_comics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<ComicResponse>>> {
    let owner_id = require_account(&headers)?;
    let comics = state.metadata.list_comics_by_owner(&owner_id).await?;
    Ok(Json(comics.iter().map(ComicResponse::from).collect()))
}

/// GET /v1/dashboard/comics/{comic_id} - Get one comic.
pub async fn get_comic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comic_id): Path<Uuid>,
) -> ApiResult<Json<ComicResponse>> {
    let owner_id = require_account(&headers)?;
    let comic = require_owned_comic(&state, comic_id, &owner_id).await?;
    Ok(Json((&comic).into()))
}

/// PUT /v1/dashboard/comics/{comic_id} - Update a comic.
pub async fn update_comic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comic_id): Path<Uuid>,
    Json(req): Json<UpdateComicRequest>,
) -> ApiResult<Json<ComicResponse>> {
    let owner_id = require_account(&headers)?;
    let mut comic = require_owned_comic(&state, comic_id, &owner_id).await?;

    if let Some(title) = req.title {
        comic.title = title;
    }
    if let Some(description) = req.description {
        comic.description = clear_on_empty(description);
    }
    if let Some(tagline) = req.tagline {
        comic.tagline = clear_on_empty(tagline);
    }
    if let Some(domain) = req.domain {
        comic.domain = clear_on_empty(domain);
    }
    if let Some(double_spread) = req.double_spread {
        comic.double_spread = double_spread;
    }
    comic.updated_at = OffsetDateTime::now_utc();
    state.metadata.update_comic(&comic).await?;

    Ok(Json((&comic).into()))
}

/// DELETE /v1/dashboard/comics/{comic_id} - Delete a comic and its content.
pub async fn delete_comic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comic_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let owner_id = require_account(&headers)?;
    require_owned_comic(&state, comic_id, &owner_id).await?;
    state.metadata.delete_comic(comic_id).await?;

    tracing::info!(%comic_id, "Comic deleted");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Chapter endpoints
// =============================================================================

/// POST /v1/dashboard/comics/{comic_id}/chapters - Create a chapter.
///
/// The chapter number is the next sequential number for the comic.
pub async fn create_chapter(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comic_id): Path<Uuid>,
    Json(req): Json<CreateChapterRequest>,
) -> ApiResult<(StatusCode, Json<ChapterResponse>)> {
    let owner_id = require_account(&headers)?;
    require_owned_comic(&state, comic_id, &owner_id).await?;
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("chapter title is required".to_string()));
    }

    let published_date = match req.published_date.as_deref() {
        Some(raw) => Some(parse_published_date(raw)?),
        None => None,
    };

    let now = OffsetDateTime::now_utc();
    let number = state.metadata.count_chapters(comic_id).await? + 1;
    let chapter = ChapterRow {
        chapter_id: Uuid::new_v4(),
        comic_id,
        number,
        title: req.title,
        published_date,
        created_at: now,
        updated_at: now,
    };
    state.metadata.create_chapter(&chapter).await?;

    Ok((StatusCode::CREATED, Json((&chapter).into())))
}

/// PUT /v1/dashboard/comics/{comic_id}/chapters/{chapter_id} - Update a chapter.
pub async fn update_chapter(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((comic_id, chapter_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateChapterRequest>,
) -> ApiResult<Json<ChapterResponse>> {
    let owner_id = require_account(&headers)?;
    require_owned_comic(&state, comic_id, &owner_id).await?;
    let mut chapter = owned_chapter(&state, comic_id, chapter_id).await?;

    if let Some(title) = req.title {
        if title.trim().is_empty() {
            return Err(ApiError::BadRequest("chapter title is required".to_string()));
        }
        chapter.title = title;
    }
    match req.published_date.as_deref() {
        Some("") => chapter.published_date = None,
        Some(raw) => chapter.published_date = Some(parse_published_date(raw)?),
        None => {}
    }
    chapter.updated_at = OffsetDateTime::now_utc();
    state.metadata.update_chapter(&chapter).await?;

    Ok(Json((&chapter).into()))
}

/// DELETE /v1/dashboard/comics/{comic_id}/chapters/{chapter_id}
pub async fn delete_chapter(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((comic_id, chapter_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    let owner_id = require_account(&headers)?;
    require_owned_comic(&state, comic_id, &owner_id).await?;
    owned_chapter(&state, comic_id, chapter_id).await?;
    state.metadata.delete_chapter(chapter_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /v1/dashboard/comics/{comic_id}/chapters/order - Reorder chapters.
pub async fn reorder_chapters(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comic_id): Path<Uuid>,
    Json(req): Json<ReorderChaptersRequest>,
) -> ApiResult<StatusCode> {
    let owner_id = require_account(&headers)?;
    require_owned_comic(&state, comic_id, &owner_id).await?;

    apply_reorder(
        state
            .metadata
            .reorder_chapters(comic_id, &req.chapter_ids)
            .await,
    )?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Page endpoints
// =============================================================================

/// POST /v1/dashboard/comics/{comic_id}/pages - Append pages to a scope.
pub async fn create_pages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comic_id): Path<Uuid>,
    Json(req): Json<CreatePagesRequest>,
) -> ApiResult<(StatusCode, Json<Vec<PageResponse>>)> {
    let owner_id = require_account(&headers)?;
    require_owned_comic(&state, comic_id, &owner_id).await?;
    if let Some(chapter_id) = req.chapter_id {
        owned_chapter(&state, comic_id, chapter_id).await?;
    }
    if req.image_urls.is_empty() {
        return Err(ApiError::BadRequest("no pages submitted".to_string()));
    }

    let next = state
        .metadata
        .last_page_number(comic_id, req.chapter_id)
        .await?
        .unwrap_or(0)
        + 1;
    let now = OffsetDateTime::now_utc();
    let pages: Vec<PageRow> = req
        .image_urls
        .iter()
        .enumerate()
        .map(|(idx, image_url)| PageRow {
            page_id: Uuid::new_v4(),
            comic_id,
            chapter_id: req.chapter_id,
            number: next + idx as i64,
            image_url: image_url.clone(),
            created_at: now,
        })
        .collect();
    state.metadata.create_pages(&pages).await?;

    Ok((
        StatusCode::CREATED,
        Json(pages.iter().map(PageResponse::from).collect()),
    ))
}

/// PUT /v1/dashboard/comics/{comic_id}/pages/order - Reorder pages in a scope.
pub async fn reorder_pages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comic_id): Path<Uuid>,
    Json(req): Json<ReorderPagesRequest>,
) -> ApiResult<StatusCode> {
    let owner_id = require_account(&headers)?;
    require_owned_comic(&state, comic_id, &owner_id).await?;
    if let Some(chapter_id) = req.chapter_id {
        owned_chapter(&state, comic_id, chapter_id).await?;
    }

    apply_reorder(
        state
            .metadata
            .reorder_pages(comic_id, req.chapter_id, &req.page_ids)
            .await,
    )?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /v1/dashboard/comics/{comic_id}/pages - Bulk-delete pages.
///
/// Surviving pages in the scope are resequenced to contiguous numbers.
pub async fn delete_pages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comic_id): Path<Uuid>,
    Json(req): Json<DeletePagesRequest>,
) -> ApiResult<Json<DeletePagesResponse>> {
    let owner_id = require_account(&headers)?;
    require_owned_comic(&state, comic_id, &owner_id).await?;
    if let Some(chapter_id) = req.chapter_id {
        owned_chapter(&state, comic_id, chapter_id).await?;
    }
    if req.page_ids.is_empty() {
        return Err(ApiError::BadRequest("no pages submitted".to_string()));
    }

    let deleted = state
        .metadata
        .delete_pages(comic_id, req.chapter_id, &req.page_ids)
        .await?;
    Ok(Json(DeletePagesResponse { deleted }))
}

// =============================================================================
// Helpers
// =============================================================================

async fn owned_chapter(
    state: &AppState,
    comic_id: Uuid,
    chapter_id: Uuid,
) -> ApiResult<ChapterRow> {
    state
        .metadata
        .get_chapter(chapter_id)
        .await?
        .filter(|ch| ch.comic_id == comic_id)
        .ok_or_else(|| ApiError::NotFound(format!("chapter {chapter_id} not found")))
}

fn apply_reorder(result: Result<(), MetadataError>) -> ApiResult<()> {
    match result {
        Ok(()) => {
            metrics::REORDERS_APPLIED.inc();
            Ok(())
        }
        Err(e @ MetadataError::ReorderMismatch(_)) => {
            metrics::REORDER_MISMATCHES.inc();
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

//! Public reader endpoints.
//!
//! These serve the comic reader for a tenant resolved from the Host header:
//! a chapter page view at `/{chapter_id}/{page_number}` and a standalone page
//! view at `/page/{page_number}`. Both support double-page spreads and
//! `preview=true` overrides.

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;
use crate::tenant::{ReaderParams, Resolved, resolve_tenant, tenant_chapters};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use halftone_core::spread::{parse_page_number, paginate, spread_start};
use halftone_metadata::models::{ChapterRow, ComicRow, PageRow};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

/// Navigation target: a page in the current chapter, or a `{chapter, page}`
/// pair when navigation crosses a chapter boundary.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum NavTarget {
    ChapterPage { chapter_id: Uuid, page_number: u32 },
    Page { page_number: u32 },
}

/// Comic header data for the reader shell.
#[derive(Debug, Serialize)]
pub struct ComicView {
    pub comic_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub tagline: Option<String>,
    pub double_spread: bool,
    /// Chapters visible in the reader's chapter selector (published only).
    pub chapters: Vec<ChapterView>,
}

#[derive(Debug, Serialize)]
pub struct ChapterView {
    pub chapter_id: Uuid,
    pub number: i64,
    pub title: String,
    pub published_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PageView {
    pub page_id: Uuid,
    pub number: i64,
    pub image_url: String,
}

/// Reader page view: the page(s) to render plus navigation targets.
#[derive(Debug, Serialize)]
pub struct ReaderPageResponse {
    pub comic: ComicView,
    /// Absent for standalone page views.
    pub chapter: Option<ChapterView>,
    pub pages: Vec<PageView>,
    /// Canonical page number for this view: the spread start in double mode,
    /// the requested number otherwise. Canonical-link metadata should point
    /// here even when the request addressed the second page of a pair.
    pub canonical_page_number: u32,
    pub page_numbers: Vec<u32>,
    pub prev: Option<NavTarget>,
    pub next: Option<NavTarget>,
}

impl ComicView {
    fn new(comic: &ComicRow, chapters: &[ChapterRow], now: OffsetDateTime) -> Self {
        Self {
            comic_id: comic.comic_id,
            title: comic.title.clone(),
            description: comic.description.clone(),
            tagline: comic.tagline.clone(),
            double_spread: comic.double_spread,
            chapters: chapters
                .iter()
                .filter(|ch| ch.published_date.is_some_and(|d| d <= now))
                .map(ChapterView::from_row)
                .collect(),
        }
    }
}

impl ChapterView {
    fn from_row(chapter: &ChapterRow) -> Self {
        Self {
            chapter_id: chapter.chapter_id,
            number: chapter.number,
            title: chapter.title.clone(),
            published_date: chapter
                .published_date
                .and_then(|d| d.format(&Rfc3339).ok()),
        }
    }
}

impl PageView {
    fn from_row(page: &PageRow) -> Self {
        Self {
            page_id: page.page_id,
            number: page.number,
            image_url: page.image_url.clone(),
        }
    }
}

enum Boundary {
    Prev,
    Next,
}

/// GET /{chapter_id}/{page_number} - chapter page view.
pub async fn get_chapter_page(
    State(state): State<AppState>,
    Path((chapter_id, page_number)): Path<(String, String)>,
    Query(params): Query<ReaderParams>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let comic = match resolve_tenant(&state, &headers, &params).await? {
        Resolved::RedirectToRoot => return Ok(redirect_to_root(&state)),
        Resolved::Tenant(comic) => comic,
    };

    let chapter_id = Uuid::parse_str(&chapter_id)
        .map_err(|_| ApiError::NotFound("chapter not found".to_string()))?;
    let requested = parse_page_number(&page_number)?;

    let chapter = state
        .metadata
        .get_chapter(chapter_id)
        .await?
        .filter(|ch| ch.comic_id == comic.comic_id)
        .ok_or_else(|| ApiError::NotFound("chapter not found".to_string()))?;

    // Direct access requires an explicit publish date in the past; a null
    // date only counts as visible for navigation fallback.
    let now = OffsetDateTime::now_utc();
    if !chapter.published_date.is_some_and(|d| d <= now) {
        return Err(ApiError::NotFound("chapter not found".to_string()));
    }

    let scope = Some(chapter.chapter_id);
    let page_numbers = to_u32(
        state
            .metadata
            .list_page_numbers(comic.comic_id, scope)
            .await?,
    );
    let view = paginate(requested, comic.double_spread, &page_numbers);

    let display: Vec<i64> = view.display_numbers.iter().map(|&n| n as i64).collect();
    let pages = state
        .metadata
        .get_pages_by_numbers(comic.comic_id, scope, &display)
        .await?;
    if pages.is_empty() {
        return Err(ApiError::NotFound("page not found".to_string()));
    }

    let mut prev = view.prev.map(|n| NavTarget::Page { page_number: n });
    let mut next = view.next.map(|n| NavTarget::Page { page_number: n });

    // Cross-chapter fallback: from the very first spread, step back into the
    // nearest published earlier chapter's last page; past the last page,
    // forward into the next published chapter's first page.
    if prev.is_none() && view.spread_start == 1 {
        prev = boundary_target(&state, &comic, chapter.number, Boundary::Prev, now).await?;
    }
    if next.is_none() {
        next = boundary_target(&state, &comic, chapter.number, Boundary::Next, now).await?;
    }

    let chapters = tenant_chapters(&state, comic.comic_id, &params).await?;

    metrics::READER_PAGE_VIEWS.inc();
    Ok(Json(ReaderPageResponse {
        comic: ComicView::new(&comic, &chapters, now),
        chapter: Some(ChapterView::from_row(&chapter)),
        pages: pages.iter().map(PageView::from_row).collect(),
        canonical_page_number: view.spread_start,
        page_numbers,
        prev,
        next,
    })
    .into_response())
}

/// GET /page/{page_number} - standalone page view (pages with no chapter).
pub async fn get_standalone_page(
    State(state): State<AppState>,
    Path(page_number): Path<String>,
    Query(params): Query<ReaderParams>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let comic = match resolve_tenant(&state, &headers, &params).await? {
        Resolved::RedirectToRoot => return Ok(redirect_to_root(&state)),
        Resolved::Tenant(comic) => comic,
    };

    let requested = parse_page_number(&page_number)?;
    let now = OffsetDateTime::now_utc();

    let page_numbers = to_u32(state.metadata.list_page_numbers(comic.comic_id, None).await?);
    let view = paginate(requested, comic.double_spread, &page_numbers);

    let display: Vec<i64> = view.display_numbers.iter().map(|&n| n as i64).collect();
    let pages = state
        .metadata
        .get_pages_by_numbers(comic.comic_id, None, &display)
        .await?;
    if pages.is_empty() {
        return Err(ApiError::NotFound("page not found".to_string()));
    }

    // Single mode looks prev/next up in the store; double mode is spread
    // arithmetic. No chapter fallback for standalone pages.
    let (prev, next) = if comic.double_spread {
        (view.prev, view.next)
    } else {
        (
            state
                .metadata
                .prev_page_number(comic.comic_id, None, requested as i64)
                .await?
                .map(|n| n as u32),
            state
                .metadata
                .next_page_number(comic.comic_id, None, requested as i64)
                .await?
                .map(|n| n as u32),
        )
    };

    metrics::READER_PAGE_VIEWS.inc();
    // No chapter selector for the standalone page view.
    Ok(Json(ReaderPageResponse {
        comic: ComicView::new(&comic, &[], now),
        chapter: None,
        pages: pages.iter().map(PageView::from_row).collect(),
        canonical_page_number: view.spread_start,
        page_numbers,
        prev: prev.map(|n| NavTarget::Page { page_number: n }),
        next: next.map(|n| NavTarget::Page { page_number: n }),
    })
    .into_response())
}

fn redirect_to_root(state: &AppState) -> Response {
    metrics::TENANT_REDIRECTS.inc();
    Redirect::to(&state.config.tenancy.root_redirect).into_response()
}

/// Find the cross-chapter navigation target on one side of the current
/// chapter, normalized to its own spread start in double mode.
async fn boundary_target(
    state: &AppState,
    comic: &ComicRow,
    current_number: i64,
    boundary: Boundary,
    now: OffsetDateTime,
) -> ApiResult<Option<NavTarget>> {
    let neighbor = match boundary {
        Boundary::Prev => {
            state
                .metadata
                .prev_published_chapter(comic.comic_id, current_number, now)
                .await?
        }
        Boundary::Next => {
            state
                .metadata
                .next_published_chapter(comic.comic_id, current_number, now)
                .await?
        }
    };
    let Some(neighbor) = neighbor else {
        return Ok(None);
    };

    let scope = Some(neighbor.chapter_id);
    let target = match boundary {
        Boundary::Prev => state.metadata.last_page_number(comic.comic_id, scope).await?,
        Boundary::Next => state.metadata.first_page_number(comic.comic_id, scope).await?,
    };
    let Some(number) = target else {
        return Ok(None);
    };

    let mut page_number = number as u32;
    if comic.double_spread {
        page_number = spread_start(page_number);
    }
    metrics::READER_CHAPTER_CROSSINGS.inc();
    Ok(Some(NavTarget::ChapterPage {
        chapter_id: neighbor.chapter_id,
        page_number,
    }))
}

fn to_u32(numbers: Vec<i64>) -> Vec<u32> {
    numbers.into_iter().map(|n| n as u32).collect()
}

//! Database models mapping to the metadata schema.

use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Comic record: one tenant site, addressed by slug or custom domain.
#[derive(Debug, Clone, FromRow)]
pub struct ComicRow {
    pub comic_id: Uuid,
    /// Account identifier from the upstream auth provider.
    pub owner_id: String,
    /// Globally unique subdomain label.
    pub slug: String,
    /// Globally unique custom domain, if configured.
    pub domain: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub tagline: Option<String>,
    /// When set, readers see two-page spreads starting at odd page numbers.
    pub double_spread: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Chapter record. `number` is unique within its comic.
///
/// A null or future `published_date` hides the chapter from direct reader
/// access.
#[derive(Debug, Clone, FromRow)]
pub struct ChapterRow {
    pub chapter_id: Uuid,
    pub comic_id: Uuid,
    pub number: i64,
    pub title: String,
    pub published_date: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Page record. `chapter_id = None` means a standalone page; `number` is
/// unique within its (comic, chapter) scope.
#[derive(Debug, Clone, FromRow)]
pub struct PageRow {
    pub page_id: Uuid,
    pub comic_id: Uuid,
    pub chapter_id: Option<Uuid>,
    pub number: i64,
    pub image_url: String,
    pub created_at: OffsetDateTime,
}

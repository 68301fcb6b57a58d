//! Chapter repository trait.

use crate::error::MetadataResult;
use crate::models::ChapterRow;
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

/// Repository for chapter management and reader navigation queries.
///
/// The `*_published_chapter` queries implement the navigation-fallback
/// visibility rule: a chapter is published when its `published_date` is null
/// or not in the future. Direct reader access applies the stricter rule
/// (non-null past date) at the call site.
#[async_trait]
pub trait ChapterRepo: Send + Sync {
    /// Create a new chapter. `(comic_id, number)` must be unique.
    async fn create_chapter(&self, chapter: &ChapterRow) -> MetadataResult<()>;

    /// Get a chapter by ID.
    async fn get_chapter(&self, chapter_id: Uuid) -> MetadataResult<Option<ChapterRow>>;

    /// List a comic's chapters ordered by number.
    async fn list_chapters(&self, comic_id: Uuid) -> MetadataResult<Vec<ChapterRow>>;

    /// Count a comic's chapters.
    async fn count_chapters(&self, comic_id: Uuid) -> MetadataResult<i64>;

    /// Update a chapter's title and published date.
    async fn update_chapter(&self, chapter: &ChapterRow) -> MetadataResult<()>;

    /// Delete a chapter and its pages atomically, resequencing the comic's
    /// surviving chapters to contiguous numbers starting at 1.
    async fn delete_chapter(&self, chapter_id: Uuid) -> MetadataResult<()>;

    /// Nearest published chapter with a number below `before_number`.
    async fn prev_published_chapter(
        &self,
        comic_id: Uuid,
        before_number: i64,
        now: OffsetDateTime,
    ) -> MetadataResult<Option<ChapterRow>>;

    /// Nearest published chapter with a number above `after_number`.
    async fn next_published_chapter(
        &self,
        comic_id: Uuid,
        after_number: i64,
        now: OffsetDateTime,
    ) -> MetadataResult<Option<ChapterRow>>;

    /// Renumber a comic's chapters to match the submitted permutation of
    /// chapter IDs (1-based). The submitted list must contain exactly the
    /// comic's current chapter IDs or the operation fails with
    /// `ReorderMismatch` and no effect.
    async fn reorder_chapters(&self, comic_id: Uuid, chapter_ids: &[Uuid]) -> MetadataResult<()>;
}

//! Page repository trait.
//!
//! Every operation takes a `(comic_id, chapter_id)` scope where a `None`
//! chapter selects the comic's standalone pages.

use crate::error::MetadataResult;
use crate::models::PageRow;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for page management and reader lookups.
#[async_trait]
pub trait PageRepo: Send + Sync {
    /// Insert a batch of pages in one transaction.
    async fn create_pages(&self, pages: &[PageRow]) -> MetadataResult<()>;

    /// List all pages in a scope ordered by number.
    async fn list_pages(
        &self,
        comic_id: Uuid,
        chapter_id: Option<Uuid>,
    ) -> MetadataResult<Vec<PageRow>>;

    /// List the page numbers in a scope, ascending.
    async fn list_page_numbers(
        &self,
        comic_id: Uuid,
        chapter_id: Option<Uuid>,
    ) -> MetadataResult<Vec<i64>>;

    /// Fetch the pages whose numbers are in `numbers`, ordered by number.
    async fn get_pages_by_numbers(
        &self,
        comic_id: Uuid,
        chapter_id: Option<Uuid>,
        numbers: &[i64],
    ) -> MetadataResult<Vec<PageRow>>;

    /// Greatest page number strictly below `before`.
    async fn prev_page_number(
        &self,
        comic_id: Uuid,
        chapter_id: Option<Uuid>,
        before: i64,
    ) -> MetadataResult<Option<i64>>;

    /// Smallest page number strictly above `after`.
    async fn next_page_number(
        &self,
        comic_id: Uuid,
        chapter_id: Option<Uuid>,
        after: i64,
    ) -> MetadataResult<Option<i64>>;

    /// Smallest page number in the scope.
    async fn first_page_number(
        &self,
        comic_id: Uuid,
        chapter_id: Option<Uuid>,
    ) -> MetadataResult<Option<i64>>;

    /// Greatest page number in the scope.
    async fn last_page_number(
        &self,
        comic_id: Uuid,
        chapter_id: Option<Uuid>,
    ) -> MetadataResult<Option<i64>>;

    /// Renumber a scope's pages to match the submitted permutation of page
    /// IDs (1-based). The submitted list must contain exactly the scope's
    /// current page IDs or the operation fails with `ReorderMismatch` and no
    /// effect.
    async fn reorder_pages(
        &self,
        comic_id: Uuid,
        chapter_id: Option<Uuid>,
        page_ids: &[Uuid],
    ) -> MetadataResult<()>;

    /// Delete the given pages from a scope and resequence the survivors to
    /// contiguous numbers starting at 1, all in one transaction. Returns the
    /// number of pages deleted.
    async fn delete_pages(
        &self,
        comic_id: Uuid,
        chapter_id: Option<Uuid>,
        page_ids: &[Uuid],
    ) -> MetadataResult<u64>;
}

//! Comic repository trait for tenant records.

use crate::error::MetadataResult;
use crate::models::ComicRow;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for comic (tenant) management.
#[async_trait]
pub trait ComicRepo: Send + Sync {
    /// Create a new comic. Fails if the slug or domain is already taken.
    async fn create_comic(&self, comic: &ComicRow) -> MetadataResult<()>;

    /// Get a comic by ID.
    async fn get_comic(&self, comic_id: Uuid) -> MetadataResult<Option<ComicRow>>;

    /// Get a comic by its subdomain slug.
    async fn get_comic_by_slug(&self, slug: &str) -> MetadataResult<Option<ComicRow>>;

    /// Get a comic by its custom domain.
    async fn get_comic_by_domain(&self, domain: &str) -> MetadataResult<Option<ComicRow>>;

    /// List all comics owned by an account, newest first.
    async fn list_comics_by_owner(&self, owner_id: &str) -> MetadataResult<Vec<ComicRow>>;

    /// Update an existing comic.
    async fn update_comic(&self, comic: &ComicRow) -> MetadataResult<()>;

    /// Delete a comic and all of its chapters and pages atomically.
    async fn delete_comic(&self, comic_id: Uuid) -> MetadataResult<()>;
}

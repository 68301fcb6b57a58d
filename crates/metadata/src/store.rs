//! Metadata store trait and SQLite implementation.

use crate::error::{MetadataError, MetadataResult};
use crate::repos::{ChapterRepo, ComicRepo, PageRepo};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// Temporary number offset used while renumbering siblings.
///
/// Both renumber passes run inside one transaction: pass 1 parks every
/// sibling at `offset + index`, out of range of any realistic page or chapter
/// number, so pass 2 can assign the final `index + 1` values without ever
/// colliding with a number still held by a sibling under the
/// `(parent, number)` unique index. SQLite checks unique constraints per
/// statement, not at commit, so the parking pass is required even inside a
/// transaction.
const RENUMBER_TEMP_OFFSET: i64 = 10_000;

/// Combined metadata store trait.
#[async_trait]
pub trait MetadataStore: ComicRepo + ChapterRepo + PageRepo + Send + Sync {
    /// Run database migrations.
    async fn migrate(&self) -> MetadataResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> MetadataResult<()>;
}

/// SQLite-based metadata store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
    #[allow(dead_code)] // Reserved for future timeout wrapper implementation
    query_timeout_secs: u64,
}

impl SqliteStore {
    /// Create a new SQLite store.
    pub async fn new(
        path: impl AsRef<Path>,
        query_timeout_secs: Option<u64>,
    ) -> MetadataResult<Self> {
        let path = path.as_ref();
        let query_timeout_secs = query_timeout_secs.unwrap_or(600);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| MetadataError::Config(format!("cannot create {parent:?}: {e}")))?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true)
            // Prevent transient "database is locked" errors under concurrent access.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite permits limited write concurrency; a single connection avoids
            // persistent "database is locked" failures under axum concurrency.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self {
            pool,
            query_timeout_secs,
        };
        store.migrate().await?;

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl MetadataStore for SqliteStore {
    async fn migrate(&self) -> MetadataResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> MetadataResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Check that the submitted sibling IDs are exactly a permutation of the
/// existing set. Runs before any write so a mismatch has zero effect.
fn validate_permutation(existing: &[Uuid], submitted: &[Uuid]) -> MetadataResult<()> {
    if existing.len() != submitted.len() {
        return Err(MetadataError::ReorderMismatch(format!(
            "submitted {} ids for {} existing siblings",
            submitted.len(),
            existing.len()
        )));
    }
    let current: HashSet<Uuid> = existing.iter().copied().collect();
    let proposed: HashSet<Uuid> = submitted.iter().copied().collect();
    if proposed.len() != submitted.len() || current != proposed {
        return Err(MetadataError::ReorderMismatch(
            "submitted ids are not a permutation of the existing siblings".to_string(),
        ));
    }
    Ok(())
}

fn is_unique_violation(err: &sqlx::Error, needle: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = db_err.message();
            msg.contains("UNIQUE constraint") && msg.contains(needle)
        }
        _ => false,
    }
}

// Implement all the repository traits for SqliteStore
mod sqlite_impl {
    use super::*;
    use crate::models::*;
    use time::OffsetDateTime;

    #[async_trait]
    impl ComicRepo for SqliteStore {
        async fn create_comic(&self, comic: &ComicRow) -> MetadataResult<()> {
            if self.get_comic_by_slug(&comic.slug).await?.is_some() {
                return Err(MetadataError::AlreadyExists(format!(
                    "slug '{}' already exists",
                    comic.slug
                )));
            }
            if let Some(domain) = &comic.domain
                && self.get_comic_by_domain(domain).await?.is_some()
            {
                return Err(MetadataError::AlreadyExists(format!(
                    "domain '{domain}' already exists"
                )));
            }

            sqlx::query(
                r#"
                INSERT INTO comics (comic_id, owner_id, slug, domain, title, description, tagline, double_spread, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(comic.comic_id)
            .bind(&comic.owner_id)
            .bind(&comic.slug)
            .bind(&comic.domain)
            .bind(&comic.title)
            .bind(&comic.description)
            .bind(&comic.tagline)
            .bind(comic.double_spread)
            .bind(comic.created_at)
            .bind(comic.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // Races past the pre-checks still hit the unique indexes.
                if is_unique_violation(&e, "comics") {
                    MetadataError::Constraint(format!(
                        "slug or domain already in use for comic {}",
                        comic.comic_id
                    ))
                } else {
                    e.into()
                }
            })?;
            Ok(())
        }

        async fn get_comic(&self, comic_id: Uuid) -> MetadataResult<Option<ComicRow>> {
            let row = sqlx::query_as::<_, ComicRow>("SELECT * FROM comics WHERE comic_id = ?")
                .bind(comic_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn get_comic_by_slug(&self, slug: &str) -> MetadataResult<Option<ComicRow>> {
            let row = sqlx::query_as::<_, ComicRow>("SELECT * FROM comics WHERE slug = ?")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn get_comic_by_domain(&self, domain: &str) -> MetadataResult<Option<ComicRow>> {
            let row = sqlx::query_as::<_, ComicRow>("SELECT * FROM comics WHERE domain = ?")
                .bind(domain)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn list_comics_by_owner(&self, owner_id: &str) -> MetadataResult<Vec<ComicRow>> {
            let rows = sqlx::query_as::<_, ComicRow>(
                "SELECT * FROM comics WHERE owner_id = ? ORDER BY created_at DESC",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn update_comic(&self, comic: &ComicRow) -> MetadataResult<()> {
            let result = sqlx::query(
                "UPDATE comics SET title = ?, description = ?, tagline = ?, domain = ?, double_spread = ?, updated_at = ? WHERE comic_id = ?",
            )
            .bind(&comic.title)
            .bind(&comic.description)
            .bind(&comic.tagline)
            .bind(&comic.domain)
            .bind(comic.double_spread)
            .bind(comic.updated_at)
            .bind(comic.comic_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e, "domain") {
                    MetadataError::Constraint(format!(
                        "domain '{}' already in use",
                        comic.domain.as_deref().unwrap_or_default()
                    ))
                } else {
                    MetadataError::from(e)
                }
            })?;

            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "comic {} not found",
                    comic.comic_id
                )));
            }
            Ok(())
        }

        async fn delete_comic(&self, comic_id: Uuid) -> MetadataResult<()> {
            let mut tx = self.pool.begin().await?;

            sqlx::query("DELETE FROM pages WHERE comic_id = ?")
                .bind(comic_id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("DELETE FROM chapters WHERE comic_id = ?")
                .bind(comic_id)
                .execute(&mut *tx)
                .await?;
            let result = sqlx::query("DELETE FROM comics WHERE comic_id = ?")
                .bind(comic_id)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "comic {comic_id} not found"
                )));
            }
            tx.commit().await?;
            Ok(())
        }
    }

    #[async_trait]
    impl ChapterRepo for SqliteStore {
        async fn create_chapter(&self, chapter: &ChapterRow) -> MetadataResult<()> {
            sqlx::query(
                r#"
                INSERT INTO chapters (chapter_id, comic_id, number, title, published_date, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(chapter.chapter_id)
            .bind(chapter.comic_id)
            .bind(chapter.number)
            .bind(&chapter.title)
            .bind(chapter.published_date)
            .bind(chapter.created_at)
            .bind(chapter.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e, "chapters") {
                    MetadataError::Constraint(format!(
                        "chapter number {} already in use",
                        chapter.number
                    ))
                } else {
                    e.into()
                }
            })?;
            Ok(())
        }

        async fn get_chapter(&self, chapter_id: Uuid) -> MetadataResult<Option<ChapterRow>> {
            let row =
                sqlx::query_as::<_, ChapterRow>("SELECT * FROM chapters WHERE chapter_id = ?")
                    .bind(chapter_id)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(row)
        }

        async fn list_chapters(&self, comic_id: Uuid) -> MetadataResult<Vec<ChapterRow>> {
            let rows = sqlx::query_as::<_, ChapterRow>(
                "SELECT * FROM chapters WHERE comic_id = ? ORDER BY number",
            )
            .bind(comic_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn count_chapters(&self, comic_id: Uuid) -> MetadataResult<i64> {
            let count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM chapters WHERE comic_id = ?")
                    .bind(comic_id)
                    .fetch_one(&self.pool)
                    .await?;
            Ok(count)
        }

        async fn update_chapter(&self, chapter: &ChapterRow) -> MetadataResult<()> {
            let result = sqlx::query(
                "UPDATE chapters SET title = ?, published_date = ?, updated_at = ? WHERE chapter_id = ?",
            )
            .bind(&chapter.title)
            .bind(chapter.published_date)
            .bind(chapter.updated_at)
            .bind(chapter.chapter_id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "chapter {} not found",
                    chapter.chapter_id
                )));
            }
            Ok(())
        }

        async fn delete_chapter(&self, chapter_id: Uuid) -> MetadataResult<()> {
            let mut tx = self.pool.begin().await?;

            let comic_id: Option<Uuid> =
                sqlx::query_scalar("SELECT comic_id FROM chapters WHERE chapter_id = ?")
                    .bind(chapter_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            let Some(comic_id) = comic_id else {
                return Err(MetadataError::NotFound(format!(
                    "chapter {chapter_id} not found"
                )));
            };

            sqlx::query("DELETE FROM pages WHERE chapter_id = ?")
                .bind(chapter_id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("DELETE FROM chapters WHERE chapter_id = ?")
                .bind(chapter_id)
                .execute(&mut *tx)
                .await?;

            // Resequence the survivors so chapter numbers stay dense and the
            // next count-based chapter number cannot collide.
            let survivors: Vec<Uuid> = sqlx::query_scalar(
                "SELECT chapter_id FROM chapters WHERE comic_id = ? ORDER BY number",
            )
            .bind(comic_id)
            .fetch_all(&mut *tx)
            .await?;
            for (idx, survivor) in survivors.iter().enumerate() {
                sqlx::query("UPDATE chapters SET number = ? WHERE chapter_id = ?")
                    .bind(RENUMBER_TEMP_OFFSET + idx as i64)
                    .bind(survivor)
                    .execute(&mut *tx)
                    .await?;
            }
            for (idx, survivor) in survivors.iter().enumerate() {
                sqlx::query("UPDATE chapters SET number = ? WHERE chapter_id = ?")
                    .bind(idx as i64 + 1)
                    .bind(survivor)
                    .execute(&mut *tx)
                    .await?;
            }

            tx.commit().await?;
            tracing::debug!(%comic_id, survivors = survivors.len(), "Chapter deleted and survivors resequenced");
            Ok(())
        }

        async fn prev_published_chapter(
            &self,
            comic_id: Uuid,
            before_number: i64,
            now: OffsetDateTime,
        ) -> MetadataResult<Option<ChapterRow>> {
            let row = sqlx::query_as::<_, ChapterRow>(
                r#"
                SELECT * FROM chapters
                WHERE comic_id = ? AND number < ?
                  AND (published_date IS NULL OR datetime(published_date) <= datetime(?))
                ORDER BY number DESC LIMIT 1
                "#,
            )
            .bind(comic_id)
            .bind(before_number)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn next_published_chapter(
            &self,
            comic_id: Uuid,
            after_number: i64,
            now: OffsetDateTime,
        ) -> MetadataResult<Option<ChapterRow>> {
            let row = sqlx::query_as::<_, ChapterRow>(
                r#"
                SELECT * FROM chapters
                WHERE comic_id = ? AND number > ?
                  AND (published_date IS NULL OR datetime(published_date) <= datetime(?))
                ORDER BY number ASC LIMIT 1
                "#,
            )
            .bind(comic_id)
            .bind(after_number)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn reorder_chapters(
            &self,
            comic_id: Uuid,
            chapter_ids: &[Uuid],
        ) -> MetadataResult<()> {
            let mut tx = self.pool.begin().await?;

            let existing: Vec<Uuid> =
                sqlx::query_scalar("SELECT chapter_id FROM chapters WHERE comic_id = ?")
                    .bind(comic_id)
                    .fetch_all(&mut *tx)
                    .await?;
            validate_permutation(&existing, chapter_ids)?;

            let now = OffsetDateTime::now_utc();
            // Pass 1: park every chapter above the temporary offset.
            for (idx, chapter_id) in chapter_ids.iter().enumerate() {
                sqlx::query("UPDATE chapters SET number = ? WHERE chapter_id = ? AND comic_id = ?")
                    .bind(RENUMBER_TEMP_OFFSET + idx as i64)
                    .bind(chapter_id)
                    .bind(comic_id)
                    .execute(&mut *tx)
                    .await?;
            }
            // Pass 2: assign the final 1-based numbers.
            for (idx, chapter_id) in chapter_ids.iter().enumerate() {
                sqlx::query(
                    "UPDATE chapters SET number = ?, updated_at = ? WHERE chapter_id = ? AND comic_id = ?",
                )
                .bind(idx as i64 + 1)
                .bind(now)
                .bind(chapter_id)
                .bind(comic_id)
                .execute(&mut *tx)
                .await?;
            }

            tx.commit().await?;
            tracing::debug!(%comic_id, count = chapter_ids.len(), "Chapters renumbered");
            Ok(())
        }
    }

    #[async_trait]
    impl PageRepo for SqliteStore {
        async fn create_pages(&self, pages: &[PageRow]) -> MetadataResult<()> {
            let mut tx = self.pool.begin().await?;

            for page in pages {
                sqlx::query(
                    r#"
                    INSERT INTO pages (page_id, comic_id, chapter_id, number, image_url, created_at)
                    VALUES (?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(page.page_id)
                .bind(page.comic_id)
                .bind(page.chapter_id)
                .bind(page.number)
                .bind(&page.image_url)
                .bind(page.created_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e, "pages") {
                        MetadataError::Constraint(format!(
                            "page number {} already in use",
                            page.number
                        ))
                    } else {
                        MetadataError::from(e)
                    }
                })?;
            }

            tx.commit().await?;
            Ok(())
        }

        async fn list_pages(
            &self,
            comic_id: Uuid,
            chapter_id: Option<Uuid>,
        ) -> MetadataResult<Vec<PageRow>> {
            let rows = sqlx::query_as::<_, PageRow>(
                "SELECT * FROM pages WHERE comic_id = ? AND chapter_id IS ? ORDER BY number",
            )
            .bind(comic_id)
            .bind(chapter_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn list_page_numbers(
            &self,
            comic_id: Uuid,
            chapter_id: Option<Uuid>,
        ) -> MetadataResult<Vec<i64>> {
            let numbers: Vec<i64> = sqlx::query_scalar(
                "SELECT number FROM pages WHERE comic_id = ? AND chapter_id IS ? ORDER BY number",
            )
            .bind(comic_id)
            .bind(chapter_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(numbers)
        }

        async fn get_pages_by_numbers(
            &self,
            comic_id: Uuid,
            chapter_id: Option<Uuid>,
            numbers: &[i64],
        ) -> MetadataResult<Vec<PageRow>> {
            if numbers.is_empty() {
                return Ok(Vec::new());
            }
            let placeholders = numbers.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
            let sql = format!(
                "SELECT * FROM pages WHERE comic_id = ? AND chapter_id IS ? AND number IN ({placeholders}) ORDER BY number",
            );
            let mut query = sqlx::query_as::<_, PageRow>(&sql)
                .bind(comic_id)
                .bind(chapter_id);
            for number in numbers {
                query = query.bind(number);
            }
            let rows = query.fetch_all(&self.pool).await?;
            Ok(rows)
        }

        async fn prev_page_number(
            &self,
            comic_id: Uuid,
            chapter_id: Option<Uuid>,
            before: i64,
        ) -> MetadataResult<Option<i64>> {
            let number: Option<i64> = sqlx::query_scalar(
                "SELECT number FROM pages WHERE comic_id = ? AND chapter_id IS ? AND number < ? ORDER BY number DESC LIMIT 1",
            )
            .bind(comic_id)
            .bind(chapter_id)
            .bind(before)
            .fetch_optional(&self.pool)
            .await?;
            Ok(number)
        }

        async fn next_page_number(
            &self,
            comic_id: Uuid,
            chapter_id: Option<Uuid>,
            after: i64,
        ) -> MetadataResult<Option<i64>> {
            let number: Option<i64> = sqlx::query_scalar(
                "SELECT number FROM pages WHERE comic_id = ? AND chapter_id IS ? AND number > ? ORDER BY number ASC LIMIT 1",
            )
            .bind(comic_id)
            .bind(chapter_id)
            .bind(after)
            .fetch_optional(&self.pool)
            .await?;
            Ok(number)
        }

        async fn first_page_number(
            &self,
            comic_id: Uuid,
            chapter_id: Option<Uuid>,
        ) -> MetadataResult<Option<i64>> {
            let number: Option<i64> = sqlx::query_scalar(
                "SELECT MIN(number) FROM pages WHERE comic_id = ? AND chapter_id IS ?",
            )
            .bind(comic_id)
            .bind(chapter_id)
            .fetch_one(&self.pool)
            .await?;
            Ok(number)
        }

        async fn last_page_number(
            &self,
            comic_id: Uuid,
            chapter_id: Option<Uuid>,
        ) -> MetadataResult<Option<i64>> {
            let number: Option<i64> = sqlx::query_scalar(
                "SELECT MAX(number) FROM pages WHERE comic_id = ? AND chapter_id IS ?",
            )
            .bind(comic_id)
            .bind(chapter_id)
            .fetch_one(&self.pool)
            .await?;
            Ok(number)
        }

        async fn reorder_pages(
            &self,
            comic_id: Uuid,
            chapter_id: Option<Uuid>,
            page_ids: &[Uuid],
        ) -> MetadataResult<()> {
            let mut tx = self.pool.begin().await?;

            let existing: Vec<Uuid> = sqlx::query_scalar(
                "SELECT page_id FROM pages WHERE comic_id = ? AND chapter_id IS ?",
            )
            .bind(comic_id)
            .bind(chapter_id)
            .fetch_all(&mut *tx)
            .await?;
            validate_permutation(&existing, page_ids)?;

            for (idx, page_id) in page_ids.iter().enumerate() {
                sqlx::query("UPDATE pages SET number = ? WHERE page_id = ?")
                    .bind(RENUMBER_TEMP_OFFSET + idx as i64)
                    .bind(page_id)
                    .execute(&mut *tx)
                    .await?;
            }
            for (idx, page_id) in page_ids.iter().enumerate() {
                sqlx::query("UPDATE pages SET number = ? WHERE page_id = ?")
                    .bind(idx as i64 + 1)
                    .bind(page_id)
                    .execute(&mut *tx)
                    .await?;
            }

            tx.commit().await?;
            tracing::debug!(%comic_id, count = page_ids.len(), "Pages renumbered");
            Ok(())
        }

        async fn delete_pages(
            &self,
            comic_id: Uuid,
            chapter_id: Option<Uuid>,
            page_ids: &[Uuid],
        ) -> MetadataResult<u64> {
            let mut tx = self.pool.begin().await?;

            // Existing scope members ordered by number, so the survivors keep
            // their relative order after resequencing.
            let existing: Vec<Uuid> = sqlx::query_scalar(
                "SELECT page_id FROM pages WHERE comic_id = ? AND chapter_id IS ? ORDER BY number",
            )
            .bind(comic_id)
            .bind(chapter_id)
            .fetch_all(&mut *tx)
            .await?;

            let scope: HashSet<Uuid> = existing.iter().copied().collect();
            for page_id in page_ids {
                if !scope.contains(page_id) {
                    return Err(MetadataError::NotFound(format!(
                        "page {page_id} not found in scope"
                    )));
                }
            }

            let doomed: HashSet<Uuid> = page_ids.iter().copied().collect();
            let mut deleted = 0u64;
            for page_id in &doomed {
                deleted += sqlx::query("DELETE FROM pages WHERE page_id = ?")
                    .bind(page_id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();
            }

            // Resequence the survivors to contiguous 1-based numbers.
            let survivors: Vec<Uuid> = existing
                .iter()
                .filter(|id| !doomed.contains(id))
                .copied()
                .collect();
            for (idx, page_id) in survivors.iter().enumerate() {
                sqlx::query("UPDATE pages SET number = ? WHERE page_id = ?")
                    .bind(RENUMBER_TEMP_OFFSET + idx as i64)
                    .bind(page_id)
                    .execute(&mut *tx)
                    .await?;
            }
            for (idx, page_id) in survivors.iter().enumerate() {
                sqlx::query("UPDATE pages SET number = ? WHERE page_id = ?")
                    .bind(idx as i64 + 1)
                    .bind(page_id)
                    .execute(&mut *tx)
                    .await?;
            }

            tx.commit().await?;
            tracing::debug!(%comic_id, deleted, survivors = survivors.len(), "Pages deleted and resequenced");
            Ok(deleted)
        }
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS comics (
    comic_id BLOB PRIMARY KEY,
    owner_id TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    domain TEXT,
    title TEXT NOT NULL,
    description TEXT,
    tagline TEXT,
    double_spread INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_comics_owner ON comics(owner_id);
CREATE UNIQUE INDEX IF NOT EXISTS idx_comics_domain ON comics(domain) WHERE domain IS NOT NULL;

CREATE TABLE IF NOT EXISTS chapters (
    chapter_id BLOB PRIMARY KEY,
    comic_id BLOB NOT NULL REFERENCES comics(comic_id),
    number INTEGER NOT NULL,
    title TEXT NOT NULL,
    published_date TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (comic_id, number)
);
CREATE INDEX IF NOT EXISTS idx_chapters_comic ON chapters(comic_id, number);

CREATE TABLE IF NOT EXISTS pages (
    page_id BLOB PRIMARY KEY,
    comic_id BLOB NOT NULL REFERENCES comics(comic_id),
    chapter_id BLOB REFERENCES chapters(chapter_id),
    number INTEGER NOT NULL,
    image_url TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_pages_scope ON pages(comic_id, chapter_id, number);
-- Standalone pages (NULL chapter_id) share one number space per comic, so the
-- unique index folds NULL to a fixed sentinel.
CREATE UNIQUE INDEX IF NOT EXISTS idx_pages_scope_number
    ON pages(comic_id, IFNULL(chapter_id, X''), number);
"#;

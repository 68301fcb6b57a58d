//! Test fixtures for generating test data.

use halftone_metadata::MetadataStore;
use halftone_metadata::models::{ChapterRow, ComicRow, PageRow};
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

/// Default account used by dashboard tests.
#[allow(dead_code)]
pub const TEST_ACCOUNT: &str = "acct-1";

/// Insert a comic owned by [`TEST_ACCOUNT`].
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub async fn seed_comic(
    metadata: &Arc<dyn MetadataStore>,
    slug: &str,
    double_spread: bool,
) -> ComicRow {
    let now = OffsetDateTime::now_utc();
    let comic = ComicRow {
        comic_id: Uuid::new_v4(),
        owner_id: TEST_ACCOUNT.to_string(),
        slug: slug.to_string(),
        domain: None,
        title: format!("{slug} title"),
        description: None,
        tagline: None,
        double_spread,
        created_at: now,
        updated_at: now,
    };
    metadata.create_comic(&comic).await.expect("seed comic");
    comic
}

/// Insert a comic served from a custom domain.
#[allow(dead_code)]
pub async fn seed_domain_comic(
    metadata: &Arc<dyn MetadataStore>,
    slug: &str,
    domain: &str,
) -> ComicRow {
    let now = OffsetDateTime::now_utc();
    let comic = ComicRow {
        comic_id: Uuid::new_v4(),
        owner_id: TEST_ACCOUNT.to_string(),
        slug: slug.to_string(),
        domain: Some(domain.to_string()),
        title: format!("{slug} title"),
        description: None,
        tagline: None,
        double_spread: false,
        created_at: now,
        updated_at: now,
    };
    metadata.create_comic(&comic).await.expect("seed comic");
    comic
}

/// Insert a chapter. `published_offset_secs` is relative to now: negative
/// means published in the past, positive means scheduled, `None` means no
/// publish date at all.
#[allow(dead_code)]
pub async fn seed_chapter(
    metadata: &Arc<dyn MetadataStore>,
    comic_id: Uuid,
    number: i64,
    published_offset_secs: Option<i64>,
) -> ChapterRow {
    let now = OffsetDateTime::now_utc();
    let chapter = ChapterRow {
        chapter_id: Uuid::new_v4(),
        comic_id,
        number,
        title: format!("Chapter {number}"),
        published_date: published_offset_secs.map(|s| now + time::Duration::seconds(s)),
        created_at: now,
        updated_at: now,
    };
    metadata.create_chapter(&chapter).await.expect("seed chapter");
    chapter
}

/// Insert `count` pages numbered 1..=count in the given scope.
#[allow(dead_code)]
pub async fn seed_pages(
    metadata: &Arc<dyn MetadataStore>,
    comic_id: Uuid,
    chapter_id: Option<Uuid>,
    count: i64,
) -> Vec<PageRow> {
    let now = OffsetDateTime::now_utc();
    let pages: Vec<PageRow> = (1..=count)
        .map(|number| PageRow {
            page_id: Uuid::new_v4(),
            comic_id,
            chapter_id,
            number,
            image_url: format!("https://img.example/{comic_id}/{number}.png"),
            created_at: now,
        })
        .collect();
    metadata.create_pages(&pages).await.expect("seed pages");
    pages
}

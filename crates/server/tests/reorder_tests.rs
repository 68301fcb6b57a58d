//! Integration tests for chapter and page reordering.

mod common;

use axum::http::StatusCode;
use common::{TEST_ACCOUNT, TestServer, json_request, seed_chapter, seed_comic, seed_pages};
use serde_json::{Value, json};
use uuid::Uuid;

async fn dashboard_request(
    server: &TestServer,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    json_request(&server.router, method, uri, body, None, Some(TEST_ACCOUNT)).await
}

#[tokio::test]
async fn reorder_chapters_renumbers_sequentially() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mycomic", false).await;
    let c1 = seed_chapter(&server.metadata(), comic.comic_id, 1, Some(-3600)).await;
    let c2 = seed_chapter(&server.metadata(), comic.comic_id, 2, Some(-3600)).await;
    let c3 = seed_chapter(&server.metadata(), comic.comic_id, 3, Some(-3600)).await;

    let (status, _) = dashboard_request(
        &server,
        "PUT",
        &format!("/v1/dashboard/comics/{}/chapters/order", comic.comic_id),
        Some(json!({"chapter_ids": [c3.chapter_id, c1.chapter_id, c2.chapter_id]})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let chapters = server.metadata().list_chapters(comic.comic_id).await.unwrap();
    let order: Vec<(Uuid, i64)> = chapters.iter().map(|ch| (ch.chapter_id, ch.number)).collect();
    assert_eq!(
        order,
        vec![
            (c3.chapter_id, 1),
            (c1.chapter_id, 2),
            (c2.chapter_id, 3),
        ]
    );
}

#[tokio::test]
async fn reorder_mismatch_is_rejected_with_no_effect() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mycomic", false).await;
    let c1 = seed_chapter(&server.metadata(), comic.comic_id, 1, Some(-3600)).await;
    let c2 = seed_chapter(&server.metadata(), comic.comic_id, 2, Some(-3600)).await;
    let c3 = seed_chapter(&server.metadata(), comic.comic_id, 3, Some(-3600)).await;

    let cases = [
        // Too few
        json!({"chapter_ids": [c2.chapter_id, c1.chapter_id]}),
        // Duplicate
        json!({"chapter_ids": [c1.chapter_id, c1.chapter_id, c2.chapter_id]}),
        // Foreign ID
        json!({"chapter_ids": [c1.chapter_id, c2.chapter_id, Uuid::new_v4()]}),
    ];
    for body in cases {
        let (status, resp) = dashboard_request(
            &server,
            "PUT",
            &format!("/v1/dashboard/comics/{}/chapters/order", comic.comic_id),
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(resp["code"], "reorder_mismatch");
    }

    // Numbering is untouched.
    let chapters = server.metadata().list_chapters(comic.comic_id).await.unwrap();
    let order: Vec<(Uuid, i64)> = chapters.iter().map(|ch| (ch.chapter_id, ch.number)).collect();
    assert_eq!(
        order,
        vec![
            (c1.chapter_id, 1),
            (c2.chapter_id, 2),
            (c3.chapter_id, 3),
        ]
    );
}

#[tokio::test]
async fn reorder_pages_within_chapter() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mycomic", false).await;
    let chapter = seed_chapter(&server.metadata(), comic.comic_id, 1, Some(-3600)).await;
    let pages = seed_pages(&server.metadata(), comic.comic_id, Some(chapter.chapter_id), 4).await;

    let submitted = [
        pages[1].page_id,
        pages[3].page_id,
        pages[0].page_id,
        pages[2].page_id,
    ];
    let (status, _) = dashboard_request(
        &server,
        "PUT",
        &format!("/v1/dashboard/comics/{}/pages/order", comic.comic_id),
        Some(json!({"chapter_id": chapter.chapter_id, "page_ids": submitted})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let rows = server
        .metadata()
        .list_pages(comic.comic_id, Some(chapter.chapter_id))
        .await
        .unwrap();
    let order: Vec<Uuid> = rows.iter().map(|p| p.page_id).collect();
    assert_eq!(order, submitted);
    // Final numbering is dense from 1 with nothing parked in the temporary
    // renumbering range.
    let numbers: Vec<i64> = rows.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn reorder_standalone_pages() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mycomic", false).await;
    let pages = seed_pages(&server.metadata(), comic.comic_id, None, 3).await;

    let submitted = [pages[2].page_id, pages[0].page_id, pages[1].page_id];
    let (status, _) = dashboard_request(
        &server,
        "PUT",
        &format!("/v1/dashboard/comics/{}/pages/order", comic.comic_id),
        Some(json!({"chapter_id": null, "page_ids": submitted})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let rows = server.metadata().list_pages(comic.comic_id, None).await.unwrap();
    let order: Vec<Uuid> = rows.iter().map(|p| p.page_id).collect();
    assert_eq!(order, submitted);
}

#[tokio::test]
async fn page_reorder_ignores_other_scopes() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mycomic", false).await;
    let chapter = seed_chapter(&server.metadata(), comic.comic_id, 1, Some(-3600)).await;
    let chapter_pages =
        seed_pages(&server.metadata(), comic.comic_id, Some(chapter.chapter_id), 2).await;
    let standalone = seed_pages(&server.metadata(), comic.comic_id, None, 2).await;

    // A chapter-scoped reorder must not accept standalone page IDs.
    let (status, resp) = dashboard_request(
        &server,
        "PUT",
        &format!("/v1/dashboard/comics/{}/pages/order", comic.comic_id),
        Some(json!({
            "chapter_id": chapter.chapter_id,
            "page_ids": [chapter_pages[0].page_id, standalone[0].page_id],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(resp["code"], "reorder_mismatch");
}

#[tokio::test]
async fn delete_pages_resequences_survivors() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mycomic", false).await;
    let chapter = seed_chapter(&server.metadata(), comic.comic_id, 1, Some(-3600)).await;
    let pages = seed_pages(&server.metadata(), comic.comic_id, Some(chapter.chapter_id), 5).await;

    let (status, body) = dashboard_request(
        &server,
        "DELETE",
        &format!("/v1/dashboard/comics/{}/pages", comic.comic_id),
        Some(json!({
            "chapter_id": chapter.chapter_id,
            "page_ids": [pages[1].page_id, pages[3].page_id],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 2);

    let rows = server
        .metadata()
        .list_pages(comic.comic_id, Some(chapter.chapter_id))
        .await
        .unwrap();
    let survivors: Vec<(Uuid, i64)> = rows.iter().map(|p| (p.page_id, p.number)).collect();
    assert_eq!(
        survivors,
        vec![
            (pages[0].page_id, 1),
            (pages[2].page_id, 2),
            (pages[4].page_id, 3),
        ]
    );
}

#[tokio::test]
async fn reorder_requires_ownership() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mycomic", false).await;
    let c1 = seed_chapter(&server.metadata(), comic.comic_id, 1, Some(-3600)).await;

    let (status, resp) = json_request(
        &server.router,
        "PUT",
        &format!("/v1/dashboard/comics/{}/chapters/order", comic.comic_id),
        Some(json!({"chapter_ids": [c1.chapter_id]})),
        None,
        Some("someone-else"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(resp["code"], "forbidden");
}

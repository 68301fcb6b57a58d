//! Integration tests for dashboard comic/chapter/page CRUD.

mod common;

use axum::http::StatusCode;
use common::{TEST_ACCOUNT, TestServer, json_request, seed_comic};
use serde_json::{Value, json};

async fn dashboard_request(
    server: &TestServer,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    json_request(&server.router, method, uri, body, None, Some(TEST_ACCOUNT)).await
}

#[tokio::test]
async fn dashboard_requires_account_header() {
    let server = TestServer::new().await;

    let (status, body) =
        json_request(&server.router, "GET", "/v1/dashboard/comics", None, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn create_get_and_list_comics() {
    let server = TestServer::new().await;

    let (status, created) = dashboard_request(
        &server,
        "POST",
        "/v1/dashboard/comics",
        Some(json!({
            "slug": "star-chart",
            "title": "Star Chart",
            "description": "A comic about maps",
            "double_spread": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slug"], "star-chart");
    assert_eq!(created["double_spread"], true);

    let comic_id = created["comic_id"].as_str().unwrap();
    let (status, fetched) = dashboard_request(
        &server,
        "GET",
        &format!("/v1/dashboard/comics/{comic_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Star Chart");

    let (status, list) = dashboard_request(&server, "GET", "/v1/dashboard/comics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_slug_conflicts() {
    let server = TestServer::new().await;
    seed_comic(&server.metadata(), "taken", false).await;

    let (status, body) = dashboard_request(
        &server,
        "POST",
        "/v1/dashboard/comics",
        Some(json!({"slug": "taken", "title": "Other"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[tokio::test]
async fn invalid_slug_is_rejected() {
    let server = TestServer::new().await;

    for slug in ["", "www", "Bad-Case", "-leading", "a.b"] {
        let (status, body) = dashboard_request(
            &server,
            "POST",
            "/v1/dashboard/comics",
            Some(json!({"slug": slug, "title": "T"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "slug {slug:?}");
        assert_eq!(body["code"], "bad_request");
    }
}

#[tokio::test]
async fn comics_are_scoped_to_their_owner() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mine", false).await;

    let (status, body) = json_request(
        &server.router,
        "GET",
        &format!("/v1/dashboard/comics/{}", comic.comic_id),
        None,
        None,
        Some("someone-else"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");

    let (_, list) = json_request(
        &server.router,
        "GET",
        "/v1/dashboard/comics",
        None,
        None,
        Some("someone-else"),
    )
    .await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn update_comic_clears_fields_on_empty_string() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mycomic", false).await;

    let uri = format!("/v1/dashboard/comics/{}", comic.comic_id);
    let (status, updated) = dashboard_request(
        &server,
        "PUT",
        &uri,
        Some(json!({"description": "now with words", "domain": "comics.example.org"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "now with words");
    assert_eq!(updated["domain"], "comics.example.org");

    let (status, updated) =
        dashboard_request(&server, "PUT", &uri, Some(json!({"description": "", "domain": ""})))
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["domain"], Value::Null);
}

#[tokio::test]
async fn chapters_are_numbered_sequentially_on_create() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mycomic", false).await;
    let uri = format!("/v1/dashboard/comics/{}/chapters", comic.comic_id);

    let (status, first) = dashboard_request(
        &server,
        "POST",
        &uri,
        Some(json!({"title": "One", "published_date": "2026-01-01T00:00:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["number"], 1);

    let (status, second) =
        dashboard_request(&server, "POST", &uri, Some(json!({"title": "Two"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["number"], 2);
    assert_eq!(second["published_date"], Value::Null);
}

#[tokio::test]
async fn chapter_numbers_stay_dense_after_delete() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mycomic", false).await;
    let uri = format!("/v1/dashboard/comics/{}/chapters", comic.comic_id);

    let mut chapter_ids = Vec::new();
    for title in ["One", "Two", "Three"] {
        let (status, chapter) =
            dashboard_request(&server, "POST", &uri, Some(json!({"title": title}))).await;
        assert_eq!(status, StatusCode::CREATED);
        chapter_ids.push(chapter["chapter_id"].as_str().unwrap().to_string());
    }

    // Deleting the middle chapter closes the gap.
    let (status, _) = dashboard_request(
        &server,
        "DELETE",
        &format!("{uri}/{}", chapter_ids[1]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let numbers: Vec<i64> = server
        .metadata()
        .list_chapters(comic.comic_id)
        .await
        .unwrap()
        .iter()
        .map(|ch| ch.number)
        .collect();
    assert_eq!(numbers, vec![1, 2]);

    // And the next creation takes the freed number instead of colliding.
    let (status, fourth) =
        dashboard_request(&server, "POST", &uri, Some(json!({"title": "Four"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(fourth["number"], 3);
}

#[tokio::test]
async fn malformed_published_date_is_rejected() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mycomic", false).await;

    let (status, body) = dashboard_request(
        &server,
        "POST",
        &format!("/v1/dashboard/comics/{}/chapters", comic.comic_id),
        Some(json!({"title": "One", "published_date": "tomorrow"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn pages_append_after_the_last_number() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mycomic", false).await;
    let uri = format!("/v1/dashboard/comics/{}/pages", comic.comic_id);

    let (status, first) = dashboard_request(
        &server,
        "POST",
        &uri,
        Some(json!({"chapter_id": null, "image_urls": ["a.png", "b.png"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let numbers: Vec<i64> = first
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2]);

    let (status, second) = dashboard_request(
        &server,
        "POST",
        &uri,
        Some(json!({"chapter_id": null, "image_urls": ["c.png"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second[0]["number"], 3);
}

#[tokio::test]
async fn delete_comic_removes_it() {
    let server = TestServer::new().await;
    let comic = seed_comic(&server.metadata(), "mycomic", false).await;
    let uri = format!("/v1/dashboard/comics/{}", comic.comic_id);

    let (status, _) = dashboard_request(&server, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = dashboard_request(&server, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn health_check_reports_ok() {
    let server = TestServer::new().await;

    let (status, body) =
        json_request(&server.router, "GET", "/v1/health", None, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

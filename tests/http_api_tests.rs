// tests/http_api_tests.rs
//
// Router-level tests: requests go through the extractor, controllers, and
// error mapping exactly as they would in production, backed by the
// in-memory store.
use axum::Router;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use serde_json::{Value, json};
use tower::util::ServiceExt as _;

mod support;

use support::{make_harness, make_test_router};

const MAX_BODY: usize = 1024 * 1024;

fn request(method: &str, uri: &str, actor: Option<(i64, &str)>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((id, role)) = actor {
        builder = builder
            .header("x-actor-id", id.to_string())
            .header("x-actor-role", role);
    }
    match body {
        Some(value) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), MAX_BODY).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn doc(text: &str) -> Value {
    json!({
        "type": "doc",
        "content": [
            { "type": "paragraph", "content": [{ "type": "text", "text": text }] }
        ]
    })
}

const EMPTY_DOC: &str =
    r#"{ "type": "doc", "content": [{ "type": "paragraph", "content": [] }] }"#;

#[tokio::test]
async fn health_endpoint_responds() {
    let app = make_test_router(&make_harness());
    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn management_endpoints_require_an_actor() {
    let app = make_test_router(&make_harness());

    for (method, uri) in [
        ("GET", "/articles"),
        ("POST", "/articles"),
        ("GET", "/articles/x"),
        ("DELETE", "/articles/x"),
        ("POST", "/articles/x/approve"),
        ("POST", "/articles/x/publish"),
    ] {
        let req = if method == "POST" && uri == "/articles" {
            request(method, uri, None, Some(json!({"slug": "x", "title": "X"})))
        } else {
            request(method, uri, None, None)
        };
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
    }

    // malformed identity headers are rejected too
    let (status, _) = send(
        &app,
        request("GET", "/articles", Some((0, "CONTRIBUTOR")), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        request("GET", "/articles", Some((1, "WIZARD")), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_validates_required_fields() {
    let app = make_test_router(&make_harness());

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/articles",
            Some((1, "CONTRIBUTOR")),
            Some(json!({ "title": "No Slug" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("slug"));

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/articles",
            Some((1, "CONTRIBUTOR")),
            Some(json!({ "slug": "no-title" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_conflicts_on_taken_slug() {
    let app = make_test_router(&make_harness());
    let payload = json!({ "slug": "taken", "title": "Taken" });

    let (status, _) = send(
        &app,
        request("POST", "/articles", Some((1, "CONTRIBUTOR")), Some(payload.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        request("POST", "/articles", Some((2, "CONTRIBUTOR")), Some(payload)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

/// The end-to-end scenario: create, invisible publicly, approve, publish,
/// then publicly visible with the draft body from publish time.
#[tokio::test]
async fn publish_flow_exposes_article_publicly() {
    let app = make_test_router(&make_harness());

    let (status, created) = send(
        &app,
        request(
            "POST",
            "/articles",
            Some((1, "CONTRIBUTOR")),
            Some(json!({ "slug": "hello", "title": "Hello" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "DRAFT");
    assert_eq!(created["creatorId"], 1);
    assert_eq!(created["approval"], Value::Null);

    // not published yet: public list is empty, public get is 404
    let (status, listed) = send(&app, request("GET", "/public/articles", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
    let (status, _) = send(&app, request("GET", "/public/articles/hello", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // publish before approval is rejected
    let (status, body) = send(
        &app,
        request("POST", "/articles/hello/publish", Some((9, "MAINTAINER")), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("approved"));

    let (status, approved) = send(
        &app,
        request("POST", "/articles/hello/approve", Some((9, "MAINTAINER")), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["approval"]["approvedById"], 9);

    let (status, published) = send(
        &app,
        request("POST", "/articles/hello/publish", Some((9, "MAINTAINER")), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(published["status"], "PUBLISHED");

    let (status, listed) = send(&app, request("GET", "/public/articles", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["slug"], "hello");
    assert_eq!(listed[0]["title"], "Hello");

    let (status, public) = send(&app, request("GET", "/public/articles/hello", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let empty_doc: Value = serde_json::from_str(EMPTY_DOC).unwrap();
    assert_eq!(public["body"], empty_doc, "body equals the draft at publish time");
}

#[tokio::test]
async fn contributor_cannot_patch_someone_elses_article() {
    let app = make_test_router(&make_harness());

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/articles",
            Some((1, "CONTRIBUTOR")),
            Some(json!({ "slug": "owned", "title": "Owned" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/articles/owned",
            Some((2, "CONTRIBUTOR")),
            Some(json!({ "body": doc("stolen") })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        request("GET", "/articles/owned", Some((2, "CONTRIBUTOR")), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn editor_view_returns_current_draft_body() {
    let app = make_test_router(&make_harness());

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/articles",
            Some((1, "CONTRIBUTOR")),
            Some(json!({ "slug": "draft", "title": "Draft", "body": doc("first") })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/articles/draft",
            Some((1, "CONTRIBUTOR")),
            Some(json!({ "title": "Renamed", "body": doc("second") })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, fetched) = send(
        &app,
        request("GET", "/articles/draft", Some((1, "CONTRIBUTOR")), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Renamed");
    assert_eq!(fetched["body"], doc("second"));
}

#[tokio::test]
async fn malformed_document_bodies_are_rejected() {
    let app = make_test_router(&make_harness());

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/articles",
            Some((1, "CONTRIBUTOR")),
            Some(json!({
                "slug": "bad-doc",
                "title": "Bad",
                "body": { "type": "paragraph", "content": [] }
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_is_scoped_per_role() {
    let app = make_test_router(&make_harness());

    for (actor, slug) in [(1, "one"), (2, "two")] {
        let (status, _) = send(
            &app,
            request(
                "POST",
                "/articles",
                Some((actor, "CONTRIBUTOR")),
                Some(json!({ "slug": slug, "title": slug })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, mine) = send(
        &app,
        request("GET", "/articles", Some((1, "CONTRIBUTOR")), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["slug"], "one");

    let (status, all) = send(
        &app,
        request("GET", "/articles", Some((9, "OWNER")), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_returns_no_content_then_not_found() {
    let app = make_test_router(&make_harness());

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/articles",
            Some((1, "CONTRIBUTOR")),
            Some(json!({ "slug": "doomed", "title": "Doomed" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        request("DELETE", "/articles/doomed", Some((1, "CONTRIBUTOR")), None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(
        &app,
        request("GET", "/articles/doomed", Some((1, "CONTRIBUTOR")), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn theme_is_publicly_readable_and_maintainer_writable() {
    let app = make_test_router(&make_harness());

    let (status, theme) = send(&app, request("GET", "/theme", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(theme["preset"], "default");
    assert_eq!(theme["overrides"], json!({}));

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/theme",
            Some((1, "CONTRIBUTOR")),
            Some(json!({ "preset": "dark" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = send(
        &app,
        request(
            "PATCH",
            "/theme",
            Some((2, "OWNER")),
            Some(json!({ "preset": "dark", "overrides": { "primaryColor": "#223344" } })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["preset"], "dark");
    assert_eq!(updated["overrides"]["primaryColor"], "#223344");

    // empty patch leaves the theme unchanged
    let (status, unchanged) = send(
        &app,
        request("PATCH", "/theme", Some((2, "OWNER")), Some(json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["preset"], "dark");
}

#[tokio::test]
async fn unknown_document_nodes_survive_the_round_trip() {
    let app = make_test_router(&make_harness());

    let exotic_body = json!({
        "type": "doc",
        "content": [
            {
                "type": "callout-box",
                "attrs": { "tone": "warning" },
                "collapsed": false,
                "content": [{ "type": "text", "text": "careful" }]
            }
        ]
    });

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/articles",
            Some((1, "CONTRIBUTOR")),
            Some(json!({ "slug": "exotic", "title": "Exotic", "body": exotic_body })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, fetched) = send(
        &app,
        request("GET", "/articles/exotic", Some((1, "CONTRIBUTOR")), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["body"], exotic_body);
}

//! End-to-end pipeline tests: router -> fetcher -> extractors, against a
//! mock upstream.

use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vodfetch::config::Settings;
use vodfetch::scrapers::FetchConfig;
use vodfetch::server::{create_router, AppState};

fn test_settings(server: &MockServer) -> Settings {
    Settings {
        base_url: server.uri(),
        fetch: FetchConfig {
            max_attempts: 2,
            timeout: Duration::from_secs(2),
            retry_delay_ms: 1..=2,
            success_delay_ms: 1..=2,
        },
    }
}

async fn call(app: axum::Router, uri: &str) -> serde_json::Value {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn category_action_extracts_through_structured_path() {
    let server = MockServer::start().await;

    let category_url = format!("{}/vodshow/12-----------.html", server.uri());
    Mock::given(method("GET"))
        .and(path("/vodshow/12-----------.html"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<script>{"aid":"12"}</script>"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/index.php/ajax/data.html"))
        .and(query_param("aid", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"list":[{"vod_id":"55","vod_name":"Show A","vod_pic":"http://x/a.jpg"}]}"#,
        ))
        .mount(&server)
        .await;

    let app = create_router(AppState::new(&test_settings(&server)));
    let json = call(
        app,
        &format!(
            "/api?action=category&url={}",
            urlencoding::encode(&category_url)
        ),
    )
    .await;

    assert_eq!(json["code"], 200);
    assert_eq!(json["msg"], "success");
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "55");
    assert_eq!(items[0]["title"], "Show A");
    assert_eq!(
        items[0]["url"],
        format!("{}/vodshow/2-55.html", server.uri())
    );
    assert_eq!(items[0]["imageUrl"], "http://x/a.jpg");
}

#[tokio::test]
async fn category_action_degrades_to_empty_items_when_upstream_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let app = create_router(AppState::new(&test_settings(&server)));
    let json = call(
        app,
        &format!(
            "/api?action=category&url={}",
            urlencoding::encode(&format!("{}/vodshow/1.html", server.uri()))
        ),
    )
    .await;

    // Upstream down and markup drift are indistinguishable by design:
    // both come back as success with nothing in them.
    assert_eq!(json["code"], 200);
    assert_eq!(json["data"]["items"], serde_json::json!([]));
}

#[tokio::test]
async fn detail_action_returns_record_with_play_links() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/voddetail/55.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<script>var cfg = {"aid":"12","vod_id":"55"};</script>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/index.php/ajax/data.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"list":[{"vod_id":"55","vod_name":"Show A","vod_content":"plot","vod_pic":"http://x/a.jpg"}]}"#,
        ))
        .mount(&server)
        .await;

    let app = create_router(AppState::new(&test_settings(&server)));
    let json = call(
        app,
        &format!(
            "/api?action=detail&url={}",
            urlencoding::encode(&format!("{}/voddetail/55.html", server.uri()))
        ),
    )
    .await;

    assert_eq!(json["code"], 200);
    assert_eq!(json["data"]["title"], "Show A");
    assert_eq!(json["data"]["description"], "plot");
    assert_eq!(json["data"]["imageUrl"], "http://x/a.jpg");
    let links = json["data"]["playLinks"].as_array().unwrap();
    assert_eq!(links.len(), 5);
    assert_eq!(links[0]["label"], "source 1");
    assert_eq!(
        links[2]["url"],
        format!("{}/play/55-1-3.html", server.uri())
    );
}

#[tokio::test]
async fn detail_action_returns_empty_object_when_extraction_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>not a detail page</p>"))
        .mount(&server)
        .await;

    let app = create_router(AppState::new(&test_settings(&server)));
    let json = call(
        app,
        &format!(
            "/api?action=detail&url={}",
            urlencoding::encode(&format!("{}/voddetail/55.html", server.uri()))
        ),
    )
    .await;

    assert_eq!(json["code"], 200);
    assert_eq!(json["data"], serde_json::json!({}));
}

#[tokio::test]
async fn search_action_reuses_listing_extraction() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/Show%20A"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a href="/vodshow/2-55.html"><img src="http://x/a.jpg" alt="Show A"></a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/index.php/ajax/data.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let app = create_router(AppState::new(&test_settings(&server)));
    let json = call(app, "/api?action=search&keyword=Show%20A").await;

    assert_eq!(json["code"], 200);
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "55");
    assert_eq!(items[0]["title"], "Show A");
}

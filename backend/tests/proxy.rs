use adbowl_proxy::build_rocket;
use adbowl_proxy::config::ProxyConfig;
use rocket::http::{Method, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIRST: &str = "aaaaaaaaaaa";
const SECOND: &str = "bbbbbbbbbbb";

/// Each test uses its own key variable so parallel tests never race on the
/// process environment.
async fn proxy_client(upstream: &str, key_var: &str, key: Option<&str>) -> Client {
    proxy_client_with_timeout(upstream, key_var, key, Duration::from_secs(2)).await
}

async fn proxy_client_with_timeout(
    upstream: &str,
    key_var: &str,
    key: Option<&str>,
    upstream_timeout: Duration,
) -> Client {
    match key {
        Some(key) => std::env::set_var(key_var, key),
        None => std::env::remove_var(key_var),
    }

    let config = ProxyConfig {
        youtube_api_url: format!("{upstream}/youtube/v3"),
        api_key_var: key_var.to_string(),
        upstream_timeout,
        allowed_origins: Vec::new(),
    };

    Client::tracked(build_rocket(config).expect("proxy builds"))
        .await
        .expect("valid rocket instance")
}

fn video_item(id: &str, views: &str) -> Value {
    json!({
        "id": id,
        "snippet": {
            "title": format!("Spot {id}"),
            "channelTitle": "Brand Channel",
            "publishedAt": "2026-02-01T12:00:00Z",
            "thumbnails": {
                "medium": { "url": format!("https://i.ytimg.com/{id}/mq.jpg") },
                "high": { "url": format!("https://i.ytimg.com/{id}/hq.jpg") }
            }
        },
        "statistics": { "viewCount": views, "likeCount": "10", "commentCount": "2" }
    })
}

async fn error_message(response: rocket::local::asynchronous::LocalResponse<'_>) -> String {
    let body: Value = response.into_json().await.expect("json error body");
    body["error"].as_str().unwrap_or_default().to_string()
}

#[rocket::async_test]
async fn returns_normalized_stats_in_upstream_order() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/videos"))
        .and(query_param("part", "snippet,statistics"))
        .and(query_param("id", format!("{FIRST},{SECOND}")))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                video_item(SECOND, "900"),
                {
                    "id": FIRST,
                    "snippet": { "title": "Bare", "thumbnails": {} },
                    "statistics": {}
                }
            ]
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let client = proxy_client(&upstream.uri(), "ADBOWL_TEST_KEY_OK", Some("test-key")).await;
    let response = client
        .get(format!("/api/youtube?ids={FIRST},%20{SECOND}"))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.expect("json body");
    let videos = body["videos"].as_array().expect("videos array");
    assert_eq!(videos.len(), 2);

    assert_eq!(videos[0]["id"], SECOND);
    assert_eq!(videos[0]["channelTitle"], "Brand Channel");
    assert_eq!(videos[0]["thumbnail"], format!("https://i.ytimg.com/{SECOND}/hq.jpg"));
    assert_eq!(videos[0]["viewCount"], 900);
    assert_eq!(videos[0]["likeCount"], 10);
    assert_eq!(videos[0]["commentCount"], 2);

    assert_eq!(videos[1]["id"], FIRST);
    assert_eq!(videos[1]["thumbnail"], "");
    assert_eq!(videos[1]["viewCount"], 0);
    assert_eq!(videos[1]["publishedAt"], "");
}

#[rocket::async_test]
async fn invalid_input_never_reaches_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(0)
        .mount(&upstream)
        .await;

    let client = proxy_client(&upstream.uri(), "ADBOWL_TEST_KEY_INVALID", Some("test-key")).await;

    let too_many = (0..51)
        .map(|i| format!("video{i:06}"))
        .collect::<Vec<_>>()
        .join(",");

    let cases = [
        ("/api/youtube".to_string(), "Missing required parameter: ids"),
        ("/api/youtube?ids=".to_string(), "Missing required parameter: ids"),
        ("/api/youtube?ids=,%20,".to_string(), "No valid video IDs provided"),
        (format!("/api/youtube?ids={too_many}"), "Too many IDs. Maximum is 50"),
        (
            format!("/api/youtube?ids={FIRST},not-an-id"),
            "One or more video IDs have invalid format",
        ),
    ];

    for (uri, expected) in cases {
        let response = client.get(uri.clone()).dispatch().await;
        assert_eq!(response.status(), Status::BadRequest, "{uri}");
        assert_eq!(error_message(response).await, expected, "{uri}");
    }
}

#[rocket::async_test]
async fn rejects_non_get_methods_and_answers_preflight() {
    let upstream = MockServer::start().await;
    let client = proxy_client(&upstream.uri(), "ADBOWL_TEST_KEY_METHODS", Some("test-key")).await;

    let response = client
        .post(format!("/api/youtube?ids={FIRST}"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::MethodNotAllowed);
    assert_eq!(error_message(response).await, "Method not allowed");

    let response = client.delete("/api/youtube").dispatch().await;
    assert_eq!(response.status(), Status::MethodNotAllowed);

    let response = client
        .req(Method::Options, "/api/youtube?ids=x")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NoContent);
    assert!(response.into_string().await.unwrap_or_default().is_empty());
}

#[rocket::async_test]
async fn missing_credential_is_a_server_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let client = proxy_client(&upstream.uri(), "ADBOWL_TEST_KEY_UNSET", None).await;
    let response = client
        .get(format!("/api/youtube?ids={FIRST}"))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::InternalServerError);
    assert_eq!(error_message(response).await, "Server configuration error");
}

#[rocket::async_test]
async fn quota_exhaustion_maps_to_service_unavailable() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/videos"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "errors": [{ "reason": "quotaExceeded" }] }
        })))
        .mount(&upstream)
        .await;

    let client = proxy_client(&upstream.uri(), "ADBOWL_TEST_KEY_QUOTA", Some("test-key")).await;
    let response = client
        .get(format!("/api/youtube?ids={FIRST}"))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::ServiceUnavailable);
    assert_eq!(
        error_message(response).await,
        "YouTube API quota exceeded. Try again tomorrow."
    );
}

#[rocket::async_test]
async fn other_forbidden_responses_are_bad_gateway() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("id", FIRST))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "errors": [{ "reason": "forbidden" }] }
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(query_param("id", SECOND))
        .respond_with(ResponseTemplate::new(403).set_body_string("<html>nope</html>"))
        .mount(&upstream)
        .await;

    let client = proxy_client(&upstream.uri(), "ADBOWL_TEST_KEY_DENIED", Some("test-key")).await;

    for id in [FIRST, SECOND] {
        let response = client.get(format!("/api/youtube?ids={id}")).dispatch().await;
        assert_eq!(response.status(), Status::BadGateway);
        assert_eq!(error_message(response).await, "YouTube API access denied");
    }
}

#[rocket::async_test]
async fn other_upstream_failures_are_bad_gateway() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let client = proxy_client(&upstream.uri(), "ADBOWL_TEST_KEY_500", Some("test-key")).await;
    let response = client
        .get(format!("/api/youtube?ids={FIRST}"))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::BadGateway);
    assert_eq!(error_message(response).await, "YouTube API error");
}

#[rocket::async_test]
async fn unreachable_upstream_is_bad_gateway() {
    // Nothing listens on the discard port.
    let client = proxy_client("http://127.0.0.1:9", "ADBOWL_TEST_KEY_DOWN", Some("test-key")).await;
    let response = client
        .get(format!("/api/youtube?ids={FIRST}"))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::BadGateway);
    assert_eq!(error_message(response).await, "Failed to reach YouTube API");
}

#[rocket::async_test]
async fn slow_upstream_times_out_as_bad_gateway() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": [video_item(FIRST, "1")] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&upstream)
        .await;

    let client = proxy_client_with_timeout(
        &upstream.uri(),
        "ADBOWL_TEST_KEY_SLOW",
        Some("test-key"),
        Duration::from_millis(500),
    )
    .await;

    let started = std::time::Instant::now();
    let response = client
        .get(format!("/api/youtube?ids={FIRST}"))
        .dispatch()
        .await;

    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(response.status(), Status::BadGateway);
    assert_eq!(error_message(response).await, "Failed to reach YouTube API");
}

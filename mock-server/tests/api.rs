use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, Post};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_headers_and_body() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/echo")
                .header("X-Id", "2")
                .body("raw payload".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PATCH");
    assert_eq!(echo.headers["x-id"], "2");
    assert_eq!(echo.body, "raw payload");
}

#[tokio::test]
async fn echo_accepts_get_without_body() {
    let resp = app().oneshot(empty_request("GET", "/echo")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert!(echo.body.is_empty());
}

// --- status ---

#[tokio::test]
async fn status_returns_requested_code() {
    let resp = app().oneshot(empty_request("GET", "/status/404")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());

    let resp = app().oneshot(empty_request("POST", "/status/503")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn status_with_bad_code_returns_400() {
    let resp = app().oneshot(empty_request("GET", "/status/abc")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app().oneshot(empty_request("GET", "/status/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- text and bookstore ---

#[tokio::test]
async fn text_is_not_json() {
    let resp = app().oneshot(empty_request("GET", "/text")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<Value>(&bytes).is_err());
}

#[tokio::test]
async fn bookstore_serves_fixture() {
    let resp = app().oneshot(empty_request("GET", "/bookstore")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let doc: Value = body_json(resp).await;
    assert_eq!(doc["store"]["book"][0]["author"], "Nigel Rees");
}

// --- posts ---

#[tokio::test]
async fn create_post_returns_201_with_id() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/posts",
            r#"{"title":"foo","body":"bar","userId":1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = body_json(resp).await;
    assert_eq!(created["id"], 101);
    assert_eq!(created["title"], "foo");
}

#[tokio::test]
async fn create_post_without_content_type_returns_415() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/posts")
                .body(r#"{"title":"foo"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn get_post_found_and_not_found() {
    let resp = app().oneshot(empty_request("GET", "/posts/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let post: Post = body_json(resp).await;
    assert_eq!(post.id, 1);
    assert_eq!(post.user_id, 1);

    let resp = app().oneshot(empty_request("GET", "/posts/2")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- payload edge cases ---

#[tokio::test]
async fn large_serves_array_past_ten_megabytes() {
    let resp = app().oneshot(empty_request("GET", "/large")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert_eq!(bytes.len(), mock_server::LARGE_BODY_LEN + 4);
    assert!(bytes.starts_with(b"[\"aaa"));
}

#[tokio::test]
async fn invalid_utf8_is_not_utf8() {
    let resp = app().oneshot(empty_request("GET", "/invalid-utf8")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(std::str::from_utf8(&bytes).is_err());
}

use std::collections::BTreeMap;

use axum::{
    extract::Path,
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::TcpListener;

/// Canonical bookstore document served by `/bookstore`.
pub const BOOKSTORE: &str = include_str!("../../test-vectors/bookstore.json");

/// Length of the string element in the `/large` array, past ureq's 10 MB
/// default read cap.
pub const LARGE_BODY_LEN: usize = 11 * 1024 * 1024;

/// Routes served by `app()`, for the startup log.
pub const ROUTES: &[&str] = &[
    "/echo",
    "/status/{code}",
    "/text",
    "/bookstore",
    "/large",
    "/invalid-utf8",
    "/posts",
    "/posts/{id}",
];

/// What `/echo` saw of the incoming request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/text", get(text))
        .route("/bookstore", get(bookstore))
        .route("/large", get(large))
        .route("/invalid-utf8", get(invalid_utf8))
        .route("/posts", post(create_post))
        .route("/posts/{id}", get(get_post))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    Json(Echo {
        method: method.as_str().to_string(),
        headers,
        body,
    })
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

async fn text() -> &'static str {
    "plain text, not json"
}

async fn bookstore() -> Result<Json<Value>, StatusCode> {
    serde_json::from_str(BOOKSTORE)
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn large() -> String {
    format!(r#"["{}"]"#, "a".repeat(LARGE_BODY_LEN))
}

/// A 200 whose body is Latin-1, not UTF-8.
async fn invalid_utf8() -> Vec<u8> {
    b"[\"caf\xe9\"]".to_vec()
}

async fn create_post(Json(mut input): Json<Map<String, Value>>) -> (StatusCode, Json<Value>) {
    input.insert("id".to_string(), Value::from(101));
    (StatusCode::CREATED, Json(Value::Object(input)))
}

async fn get_post(Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    if id != 1 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(Post {
        id,
        user_id: 1,
        title: "sunt aut facere".to_string(),
        body: "quia et suscipit".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookstore_fixture_is_valid_json() {
        let doc: Value = serde_json::from_str(BOOKSTORE).unwrap();
        assert_eq!(doc["store"]["book"].as_array().unwrap().len(), 3);
        assert_eq!(doc["store"]["bicycle"]["color"], "red");
    }

    #[test]
    fn echo_serializes_to_json() {
        let echo = Echo {
            method: "PUT".to_string(),
            headers: BTreeMap::from([("x-id".to_string(), "2".to_string())]),
            body: "payload".to_string(),
        };
        let json = serde_json::to_value(&echo).unwrap();
        assert_eq!(json["method"], "PUT");
        assert_eq!(json["headers"]["x-id"], "2");
        assert_eq!(json["body"], "payload");
    }

    #[test]
    fn post_uses_camel_case_user_id() {
        let post = Post {
            id: 1,
            user_id: 7,
            title: "t".to_string(),
            body: "b".to_string(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["userId"], 7);
        assert!(json.get("user_id").is_none());
    }
}

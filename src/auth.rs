use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::handler::AppState;

/// Bearer-token gate applied ahead of every route, the health endpoint
/// included. Accepts exactly `Authorization: Bearer <token>` where the token
/// equals the configured secret; everything else stops here with a 401.
pub async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let presented = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match presented {
        Some(token) if token == state.api_token => next.run(request).await,
        _ => {
            tracing::error!("unauthorized request to path: {}", request.uri().path());
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized request." })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use tower::util::ServiceExt;

    use crate::config::Environment;
    use crate::handler::{AppState, router};
    use crate::store::MemoryStore;

    const TOKEN: &str = "test-secret-token";

    fn app() -> axum::Router {
        router(AppState {
            store: Arc::new(MemoryStore::new()),
            api_token: TOKEN.to_string(),
            env: Environment::Test,
        })
    }

    fn request(method: Method, uri: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn accepts_the_configured_token() {
        let response = app()
            .oneshot(request(Method::GET, "/", Some(&format!("Bearer {}", TOKEN))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_missing_header_on_every_route() {
        for (method, uri) in [
            (Method::GET, "/"),
            (Method::GET, "/bookmarks"),
            (Method::POST, "/bookmarks"),
            (Method::GET, "/bookmarks/1"),
            (Method::DELETE, "/bookmarks/1"),
        ] {
            let response = app().oneshot(request(method, uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn rejects_wrong_token() {
        let response = app()
            .oneshot(request(Method::GET, "/bookmarks", Some("Bearer wrong")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Unauthorized request." }));
    }

    #[tokio::test]
    async fn rejects_non_bearer_scheme() {
        let response = app()
            .oneshot(request(Method::GET, "/", Some("Basic dGVzdDp0ZXN0")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

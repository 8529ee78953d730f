//! Guard Router

use axum::{Router, middleware, routing::get};

use crate::presentation::handlers;
use crate::presentation::middleware::{EdgeGuardState, edge_guard};

/// Session routes, meant to be nested under `/api`
pub fn session_router(state: EdgeGuardState) -> Router {
    Router::new()
        .route("/session", get(handlers::session_status))
        .with_state(state)
}

/// Put the edge guard in front of every route of `router`
pub fn with_edge_guard(router: Router, state: EdgeGuardState) -> Router {
    router.layer(middleware::from_fn_with_state(state, edge_guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::application::config::GuardConfig;

    fn app() -> Router {
        let state = EdgeGuardState::new(Arc::new(GuardConfig::default())).unwrap();
        let pages = Router::new()
            .route("/", get(|| async { "login" }))
            .route("/dashboard", get(|| async { "dashboard" }))
            .route("/dashboard/{*section}", get(|| async { "section" }))
            .nest("/api", session_router(state.clone()));
        with_edge_guard(pages, state)
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_cookie_reaches_page() {
        let response = app()
            .oneshot(get_request(
                "/dashboard/patient",
                Some(r#"authentications={"access_token":"abc123"}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_object_cookie_redirects() {
        let response = app()
            .oneshot(get_request("/dashboard", Some("authentications={}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_non_json_cookie_redirects() {
        let response = app()
            .oneshot(get_request(
                "/dashboard/settings",
                Some("authentications=not-json"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_root_is_public() {
        let response = app().oneshot(get_request("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_session_status() {
        let ok = app()
            .oneshot(get_request(
                "/api/session",
                Some(r#"authentications={"access_token":"t","first_name":"Yaw"}"#),
            ))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let unauthorized = app()
            .oneshot(get_request("/api/session", Some("authentications=not-json")))
            .await
            .unwrap();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);
    }
}

//! Application assembly

use std::sync::Arc;

use axum::{Router, routing::get};
use guard::{EdgeGuardState, GuardConfig, session_router, with_edge_guard};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::pages;
use crate::settings::ConsoleSettings;

/// Shared state for page handlers
#[derive(Clone)]
pub struct ConsoleState {
    pub settings: Arc<ConsoleSettings>,
}

/// Build the console router with the edge guard in front of everything
pub fn build_app(
    settings: ConsoleSettings,
    config: Arc<GuardConfig>,
) -> guard::GuardResult<Router> {
    let edge = EdgeGuardState::new(config)?;
    tracing::info!(
        protected_prefix = %edge.config.routes.protected_prefix,
        excluded = ?edge.matcher.pattern(),
        "Edge guard configured"
    );

    let assets = settings.assets_dir.clone();
    let state = ConsoleState {
        settings: Arc::new(settings),
    };

    let api = Router::new()
        .route("/health", get(pages::health))
        .merge(session_router(edge.clone()));

    let site = Router::new()
        .route("/", get(pages::login))
        .route("/dashboard", get(pages::dashboard))
        .route("/dashboard/{*section}", get(pages::dashboard_section))
        .with_state(state)
        .nest("/api", api)
        .nest_service("/static", ServeDir::new(assets.join("static")))
        .nest_service("/public", ServeDir::new(&assets))
        .route_service("/favicon.ico", ServeFile::new(assets.join("favicon.ico")));

    Ok(with_edge_guard(site, edge).layer(TraceLayer::new_for_http()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn app() -> Router {
        build_app(
            ConsoleSettings::default(),
            Arc::new(GuardConfig::development()),
        )
        .unwrap()
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_login_page_is_public() {
        let response = app().oneshot(get_request("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_requires_cookie() {
        let response = app()
            .oneshot(get_request("/dashboard/doctors", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let response = app()
            .oneshot(get_request(
                "/dashboard/doctors",
                Some(r#"authentications={"access_token":"abc123"}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_is_not_intercepted() {
        let response = app()
            .oneshot(get_request("/api/health", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app()
            .oneshot(get_request("/api/session", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

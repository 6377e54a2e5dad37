//! HTTP routes for the `RouteCloak` server.
//!
//! - `/health` — liveness probe
//! - `/api/*` — registry, resolution, and link-building JSON endpoints
//! - `/` — dashboard with the navigation menu
//! - anything else — decoded as an obfuscated screen path, or redirected to `/`

pub mod api;
pub mod ui;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api::router())
        .merge(ui::router())
        .fallback(ui::screen_or_redirect)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use routecloak_core::RouteKey;
    use tower::ServiceExt;

    use super::*;
    use crate::config::ServerConfig;

    fn state() -> Arc<AppState> {
        let config = ServerConfig {
            route_secret: "router-test".to_owned(),
            ..ServerConfig::default()
        };
        Arc::new(AppState::from_config(&config).unwrap())
    }

    async fn get_path(state: Arc<AppState>, uri: &str) -> axum::response::Response {
        build_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn continents_base(state: &AppState) -> String {
        state
            .registry
            .link(
                RouteKey::Masters,
                RouteKey::Continents,
                &routecloak_core::ViewMode::List,
            )
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let resp = get_path(state(), "/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::X_FRAME_OPTIONS], "DENY");
    }

    #[tokio::test]
    async fn list_path_renders_list_screen() {
        let state = state();
        let base = continents_base(&state);
        let resp = get_path(state, &base).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.contains("ContinentList"));
    }

    #[tokio::test]
    async fn new_path_renders_form() {
        let state = state();
        let base = continents_base(&state);
        let body = body_string(get_path(state, &format!("{base}/new")).await).await;
        assert!(body.contains("ContinentForm"));
        assert!(body.contains("data-mode=\"new\""));
    }

    #[tokio::test]
    async fn edit_path_carries_id() {
        let state = state();
        let base = continents_base(&state);
        let body = body_string(get_path(state, &format!("{base}/abc123/edit")).await).await;
        assert!(body.contains("ContinentForm"));
        assert!(body.contains("data-id=\"abc123\""));
    }

    #[tokio::test]
    async fn garbage_path_redirects_to_root() {
        let resp = get_path(state(), "/garbage1/garbage2").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn dashboard_links_resolve() {
        let state = state();
        let base = continents_base(&state);
        let body = body_string(get_path(Arc::clone(&state), "/").await).await;
        assert!(body.contains(&format!("href=\"{base}\"")));
        assert!(!body.contains("/masters/"));
    }

    #[tokio::test]
    async fn non_get_methods_are_not_allowed() {
        let state = state();
        let base = continents_base(&state);
        for uri in [base.as_str(), "/garbage1/garbage2"] {
            let resp = build_router(Arc::clone(&state))
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        }
    }

    #[tokio::test]
    async fn head_renders_like_get() {
        let state = state();
        let base = continents_base(&state);
        let resp = build_router(state)
            .oneshot(
                Request::builder()
                    .method("HEAD")
                    .uri(&base)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

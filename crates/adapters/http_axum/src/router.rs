//! Axum router assembly.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use homehub_domain::settings::DashboardSettings;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// `/health` and `/dashboard/settings` are handled directly; every other
/// path is looked up in the assets directory, with `index.html` as the
/// fallback so client-side routes survive a reload.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build(state: AppState) -> Router {
    let assets_dir = state.assets_dir().to_path_buf();
    let index = ServeFile::new(assets_dir.join("index.html"));
    let assets = ServeDir::new(&assets_dir).fallback(index);
    tracing::debug!(assets = %assets_dir.display(), "serving dashboard assets");

    Router::new()
        .route("/health", get(health_check))
        .route("/dashboard/settings", get(dashboard_settings))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// `GET /dashboard/settings`: settings for the browser client.
async fn dashboard_settings(State(state): State<AppState>) -> Json<DashboardSettings> {
    Json(state.settings().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use homehub_domain::control::FallbackPolicy;
    use std::path::PathBuf;
    use tower::ServiceExt;

    /// Write a throwaway assets directory unique to `name`.
    fn assets_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "homehub-router-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<html><body>homehub</body></html>").unwrap();
        std::fs::write(dir.join("style.css"), "body { margin: 0; }").unwrap();
        dir
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(AppState::new(DashboardSettings::default(), assets_dir("health")));

        let (status, body) = get_body(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn should_serve_dashboard_settings_as_json() {
        let settings = DashboardSettings {
            fallback: FallbackPolicy::Unknown,
            ..DashboardSettings::default()
        };
        let app = build(AppState::new(settings, assets_dir("settings")));

        let (status, body) = get_body(app, "/dashboard/settings").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["fallback"], "unknown");
        assert_eq!(json["max_relays"], 32);
        assert_eq!(json["nav"]["strategy"], "create_own_dom");
    }

    #[tokio::test]
    async fn should_serve_static_asset() {
        let app = build(AppState::new(DashboardSettings::default(), assets_dir("static")));

        let (status, body) = get_body(app, "/style.css").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("margin"));
    }

    #[tokio::test]
    async fn should_fall_back_to_index_for_client_routes() {
        let app = build(AppState::new(DashboardSettings::default(), assets_dir("spa")));

        let (status, body) = get_body(app, "/events/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("homehub"));
    }
}

//! HTTP server for fonthub
//!
//! Serves the loaded metadata set as JSON under `/api` plus the static web
//! front end. The database is loaded once before the listener starts and is
//! shared read-only across requests.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/fonts` | every font |
//! | `GET` | `/api/fonts/selector` | fonts matching repeated `width`, `weight`, `style`, `language` keys |
//! | `GET` | `/api/fonts/{name}` | one font by name |
//! | `GET` | `/api/categories/{category}/fonts` | fonts listing a category |
//! | `GET` | `/health` | liveness probe |

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use fonthub_core::database::FontDatabase;
use fonthub_core::query::Selector;
use fonthub_core::record::FontRecord;

/// Envelope for successful API responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Envelope for failed API responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiError>)>;

#[derive(Clone)]
struct AppState {
    db: Arc<FontDatabase>,
}

/// Bind `bind` and serve the API plus the static front end until the
/// process is stopped.
pub async fn serve(
    bind: &str,
    db: Arc<FontDatabase>,
    static_dir: &std::path::Path,
) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;

    info!(
        bind = %bind,
        fonts = db.len(),
        static_dir = %static_dir.display(),
        "serving font metadata"
    );

    axum::serve(listener, app(db, static_dir))
        .await
        .context("serving HTTP")?;
    Ok(())
}

/// The full application: API routes, static files and request tracing.
pub fn app(db: Arc<FontDatabase>, static_dir: &std::path::Path) -> Router {
    router(db)
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
}

/// API routes only.
pub fn router(db: Arc<FontDatabase>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/fonts", get(all_fonts_handler))
        .route("/api/fonts/selector", get(selector_handler))
        .route("/api/fonts/{name}", get(font_handler))
        .route("/api/categories/{category}/fonts", get(category_handler))
        .with_state(AppState { db })
}

async fn all_fonts_handler(State(state): State<AppState>) -> Json<ApiResponse<Vec<FontRecord>>> {
    ApiResponse::ok(state.db.all())
}

/// Query keys repeat per value: `?width=condensed&weight=bold&weight=black`.
async fn selector_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<ApiResponse<Vec<FontRecord>>> {
    let selector = Selector::from_pairs(pairs);
    info!(?selector, "selector query");
    ApiResponse::ok(state.db.by_selector(&selector))
}

async fn font_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<FontRecord> {
    match state.db.get(&name) {
        Some(record) => Ok(ApiResponse::ok(record.clone())),
        None => Err(not_found(format!("no font named {name}"))),
    }
}

async fn category_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<ApiResponse<Vec<FontRecord>>> {
    ApiResponse::ok(state.db.by_category(&category))
}

fn not_found(message: String) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError {
            success: false,
            error: message,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    fn sample_db() -> Arc<FontDatabase> {
        let db = FontDatabase::from_records([
            FontRecord::new("A")
                .with_widths(["condensed"])
                .with_weights(["bold"])
                .with_categories(["sans-serif"]),
            FontRecord::new("B")
                .with_widths(["condensed"])
                .with_weights(["regular"])
                .with_categories(["serif"]),
            FontRecord::new("Noto Sans")
                .with_widths(["normal"])
                .with_languages(["latin", "greek"]),
        ])
        .expect("build database");
        Arc::new(db)
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    async fn get_names(uri: &str) -> Vec<String> {
        let (status, body) = get_body(router(sample_db()), uri).await;
        assert_eq!(status, StatusCode::OK, "uri: {uri}");
        let parsed: ApiResponse<Vec<FontRecord>> =
            serde_json::from_slice(&body).expect("parse response");
        assert!(parsed.success);
        parsed.data.into_iter().map(|r| r.name).collect()
    }

    #[tokio::test]
    async fn fonts_endpoint_lists_everything() {
        assert_eq!(get_names("/api/fonts").await, vec!["A", "B", "Noto Sans"]);
    }

    #[tokio::test]
    async fn selector_endpoint_unions_repeated_keys() {
        let names = get_names("/api/fonts/selector?weight=bold&weight=regular").await;
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn selector_endpoint_intersects_families() {
        let names = get_names("/api/fonts/selector?width=condensed&weight=bold").await;
        assert_eq!(names, vec!["A"]);
    }

    #[tokio::test]
    async fn selector_endpoint_without_params_matches_all() {
        assert_eq!(
            get_names("/api/fonts/selector").await,
            vec!["A", "B", "Noto Sans"]
        );
    }

    #[tokio::test]
    async fn selector_endpoint_unknown_value_is_empty_not_error() {
        assert!(get_names("/api/fonts/selector?weight=black").await.is_empty());
    }

    #[tokio::test]
    async fn selector_endpoint_blank_value_matches_nothing() {
        assert!(get_names("/api/fonts/selector?style=").await.is_empty());
        assert!(get_names("/api/fonts/selector?width=&weight=bold").await.is_empty());
    }

    #[tokio::test]
    async fn selector_endpoint_ignores_unknown_keys() {
        let names = get_names("/api/fonts/selector?language=greek&limit=1").await;
        assert_eq!(names, vec!["Noto Sans"]);
    }

    #[tokio::test]
    async fn font_endpoint_returns_record_or_404() {
        let (status, body) = get_body(router(sample_db()), "/api/fonts/Noto%20Sans").await;
        assert_eq!(status, StatusCode::OK);
        let parsed: ApiResponse<FontRecord> = serde_json::from_slice(&body).expect("parse");
        assert_eq!(parsed.data.languages, vec!["latin", "greek"]);

        let (status, body) = get_body(router(sample_db()), "/api/fonts/Missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let parsed: ApiError = serde_json::from_slice(&body).expect("parse error");
        assert!(!parsed.success);
        assert!(parsed.error.contains("Missing"));
    }

    #[tokio::test]
    async fn category_endpoint_filters_by_category() {
        assert_eq!(get_names("/api/categories/serif/fonts").await, vec!["B"]);
        assert!(get_names("/api/categories/script/fonts").await.is_empty());
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let (status, body) = get_body(router(sample_db()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn app_serves_index_and_static_files() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::write(tmp.path().join("index.html"), b"<h1>Hello Fonts</h1>").unwrap();
        std::fs::write(tmp.path().join("app.css"), b"body {}").unwrap();

        let (status, body) = get_body(app(sample_db(), tmp.path()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<h1>Hello Fonts</h1>");

        let (status, body) = get_body(app(sample_db(), tmp.path()), "/static/app.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"body {}");

        let (status, _) = get_body(app(sample_db(), tmp.path()), "/api/fonts").await;
        assert_eq!(status, StatusCode::OK);
    }
}

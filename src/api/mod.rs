//! Salesdash HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - The dashboard page
//!
//! ## Dashboard
//! - `GET /api/v1/layout` - KPI cards, dropdown options, date bounds, tabs
//! - `POST /api/v1/render` - Render a tab for the given filters
//! - `GET /api/v1/geo` - GeoJSON boundaries
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use salesdash::api::{serve, ApiConfig, AppState};
//! use salesdash::dashboard::DashboardContext;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = DashboardContext::new(table, geo);
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(ctx, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_size;

    let api_routes = Router::new()
        .route("/layout", get(routes::dashboard::get_layout))
        .route("/render", post(routes::dashboard::render_tab))
        .route("/geo", get(routes::dashboard::get_geo))
        .layer(DefaultBodyLimit::max(body_limit));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Salesdash listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Salesdash shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardContext;
    use crate::dataset::{GeoReference, SalesRecord, SalesTable};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use chrono::NaiveDate;
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let on = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let table: SalesTable = vec![
            SalesRecord::default()
                .region("A")
                .brand("Nike")
                .total(100.0)
                .purchased_on(on(10)),
            SalesRecord::default()
                .region("B")
                .brand("Adidas")
                .total(200.0)
                .purchased_on(on(20)),
            SalesRecord::default()
                .region("C")
                .brand("Puma")
                .total(300.0)
                .purchased_on(on(31)),
        ]
        .into_iter()
        .collect();

        let ctx = DashboardContext::new(table, GeoReference::empty());
        build_router(AppState::new(ctx, ApiConfig::default()))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_render(app: Router, body: &str) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/render")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get(create_test_app(), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let response = get(create_test_app(), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = get(create_test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["rows"], 3);
        assert_eq!(body["status"], "degraded");
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = get(create_test_app(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/api/v1/render"));
        // Box charts draw the computed outliers alongside the boxes
        assert!(html.contains("b.outliers"));
    }

    #[tokio::test]
    async fn test_layout() {
        let response = get(create_test_app(), "/api/v1/layout").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["cards"][0]["display"], "$600");
        assert_eq!(body["region_options"][0]["value"], "ALL");
        assert_eq!(body["date_range"]["min"], "2024-01-10");
        assert_eq!(body["tabs"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_render_region_filter() {
        let response = post_render(create_test_app(), r#"{"tab": "tab-1", "regions": ["B"]}"#).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["tab"], "tab-1");
        assert_eq!(body["total"], 200.0);
        assert_eq!(body["charts"][1]["data"]["type"], "bar");
        assert_eq!(body["charts"][1]["data"]["x"][0], "B");
    }

    #[tokio::test]
    async fn test_render_date_range_inclusive() {
        let response = post_render(
            create_test_app(),
            r#"{"tab": "tab-4", "start_date": "2024-01-20", "end_date": "2024-01-31T00:00:00"}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["row_count"], 2);
        assert_eq!(body["total"], 500.0);
    }

    #[tokio::test]
    async fn test_render_unknown_tab() {
        let response = post_render(create_test_app(), r#"{"tab": "tab-99"}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNKNOWN_TAB");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_render_invalid_date() {
        let response =
            post_render(create_test_app(), r#"{"start_date": "soon", "end_date": "later"}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_render_invalid_json() {
        let response = post_render(create_test_app(), "not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_geo() {
        let response = get(create_test_app(), "/api/v1/geo").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["type"], "FeatureCollection");
    }
}

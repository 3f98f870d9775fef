//! Dashboard Routes
//!
//! - GET /api/v1/layout - Static page description (KPIs, options, tabs)
//! - POST /api/v1/render - Render one tab for the current filter controls
//! - GET /api/v1/geo - GeoJSON boundaries for the choropleth

use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::api::dto::RenderRequest;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::{render, Layout, TabView};

/// GET /api/v1/layout
pub async fn get_layout(State(state): State<Arc<AppState>>) -> Json<Layout> {
    Json(state.dashboard.layout.as_ref().clone())
}

/// POST /api/v1/render
///
/// Produces exactly one tab view, or an error body the page shows in place
/// of the charts.
pub async fn render_tab(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderRequest>,
) -> ApiResult<Json<TabView>> {
    let filter = req.to_filter()?;
    let view = render(&state.dashboard, req.tab(), &filter)?;

    tracing::info!(
        tab = %view.tab,
        rows = view.row_count,
        charts = view.charts.len(),
        "Rendered dashboard tab"
    );

    Ok(Json(view))
}

/// GET /api/v1/geo
pub async fn get_geo(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(state.dashboard.geo.document().clone())
}

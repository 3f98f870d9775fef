//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::api::error::{ApiError, ApiResult};
use crate::dashboard::DEFAULT_TAB;
use crate::query::{parse_filter_date, SalesFilter};
use serde::{Deserialize, Serialize};

// ============================================
// RENDER DTOs
// ============================================

/// Render request: the active tab plus the four filter controls
///
/// Controls the user has cleared arrive as `null` or are omitted.
#[derive(Debug, Default, Deserialize)]
pub struct RenderRequest {
    /// Tab id, defaults to the first tab
    #[serde(default)]
    pub tab: Option<String>,
    /// Selected regions
    #[serde(default)]
    pub regions: Option<Vec<String>>,
    /// Selected brands
    #[serde(default)]
    pub brands: Option<Vec<String>>,
    /// Start date (`YYYY-MM-DD` or ISO date-time)
    #[serde(default)]
    pub start_date: Option<String>,
    /// End date (`YYYY-MM-DD` or ISO date-time)
    #[serde(default)]
    pub end_date: Option<String>,
}

impl RenderRequest {
    /// The requested tab id
    pub fn tab(&self) -> &str {
        self.tab.as_deref().unwrap_or(DEFAULT_TAB)
    }

    /// Convert the control values into a filter
    pub fn to_filter(&self) -> ApiResult<SalesFilter> {
        Ok(SalesFilter {
            regions: self.regions.clone().unwrap_or_default(),
            brands: self.brands.clone().unwrap_or_default(),
            start_date: parse_bound("start_date", self.start_date.as_deref())?,
            end_date: parse_bound("end_date", self.end_date.as_deref())?,
        })
    }
}

fn parse_bound(field: &str, value: Option<&str>) -> ApiResult<Option<chrono::NaiveDate>> {
    match value {
        Some(v) => parse_filter_date(v).map_err(|e| ApiError::Validation(format!("{}: {}", field, e))),
        None => Ok(None),
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Rows in the loaded sales table
    pub rows: usize,
    /// Boundary features in the geo reference
    pub geo_features: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

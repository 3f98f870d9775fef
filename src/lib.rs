//! # Salesdash
//!
//! Sales Analytics Dashboard - loads a sales table from a relational source
//! once, then serves a single-page dashboard whose eight tabs are rendered
//! from declarative chart specs over the filtered table.
//!
//! ## Features
//!
//! - **One-shot load**: SQLite extraction with per-value numeric/date coercion
//! - **Filters**: Region, brand and inclusive date range with an "ALL" sentinel
//! - **Declarative tabs**: Pie, bar, scatter, sunburst/treemap, choropleth, box,
//!   histogram and line charts built from a static registry
//! - **Pure rendering**: Every request re-filters and re-aggregates shared,
//!   read-only state
//!
//! ## Modules
//!
//! - [`dataset`]: Source extraction, normalization, geo reference, CSV import
//! - [`query`]: Filters, grouping keys and aggregation
//! - [`dashboard`]: Layout, tab registry and the render dispatcher
//! - [`api`]: HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use salesdash::dashboard::{render, DashboardContext};
//! use salesdash::dataset::{load_table, GeoReference, SqliteSource};
//! use salesdash::query::SalesFilter;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = load_table(&SqliteSource::from_url("sqlite://sales.db", "ventas")?)?;
//!     let ctx = DashboardContext::new(table, GeoReference::empty());
//!
//!     let filter = SalesFilter::builder().regions(&["Sudeste"]).build();
//!     let view = render(&ctx, "tab-3", &filter)?;
//!
//!     println!("{} rows, {} charts", view.row_count, view.charts.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod logging;
pub mod query;

// Re-export top-level types for convenience
pub use dataset::{
    load_table, DatasetError, DatasetResult, GeoReference, SalesRecord, SalesSource, SalesTable,
    SqliteSource,
};

pub use query::{AggregationFunc, GroupKey, Measure, QueryError, SalesFilter};

pub use dashboard::{render, DashboardContext, Layout, RenderError, TabView};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};

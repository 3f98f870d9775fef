//! Salesdash Dashboard
//!
//! The page model and the filter-and-render dispatcher:
//!
//! - **layout**: Static page description computed once (KPIs, options, tabs)
//! - **tabs**: Registry of the eight tabs and their chart declarations
//! - **charts**: Chart declarations and rendered view models
//! - **render**: The dispatcher turning (tab, filters) into a `TabView`
//! - **stats**: Box-plot statistics
//! - **style**: Presentation settings shared by every chart
//!
//! # Architecture
//!
//! ```text
//! startup:  SalesTable + GeoReference → DashboardContext (Layout built once)
//! request:  render(&ctx, tab, &filters) → TabView (pure, no caching)
//! ```

pub mod charts;
pub mod error;
pub mod layout;
pub mod render;
pub mod stats;
pub mod style;
pub mod tabs;

pub use charts::{ChartData, ChartKind, ChartSpec, ChartView, TabView};
pub use error::{RenderError, RenderResult};
pub use layout::{format_thousands, Layout};
pub use render::{render, render_chart};
pub use style::ChartStyle;
pub use tabs::{find_tab, TabSpec, DEFAULT_TAB, TABS};

use crate::config::Config;
use crate::dataset::{load_table, open_source, DatasetResult, GeoReference, SalesTable};
use std::path::Path;
use std::sync::Arc;

/// Read-only state shared by every render call
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub table: Arc<SalesTable>,
    pub geo: Arc<GeoReference>,
    pub layout: Arc<Layout>,
}

impl DashboardContext {
    /// Build the context, computing the layout from the unfiltered table
    pub fn new(table: SalesTable, geo: GeoReference) -> Self {
        let layout = Layout::build(&table);
        tracing::info!(
            rows = table.len(),
            regions = layout.region_options.len() - 1,
            brands = layout.brand_options.len() - 1,
            "Dashboard context ready"
        );

        Self {
            table: Arc::new(table),
            geo: Arc::new(geo),
            layout: Arc::new(layout),
        }
    }

    /// Load the sales table and geo reference named by the config
    ///
    /// Blocking; any failure aborts startup.
    pub fn load(config: &Config) -> DatasetResult<Self> {
        let source = open_source(&config.source.database_url, &config.source.table)?;
        let table = load_table(source.as_ref())?;
        let geo = GeoReference::load(Path::new(&config.geo.path), &config.geo.feature_id_key)?;
        Ok(Self::new(table, geo))
    }
}

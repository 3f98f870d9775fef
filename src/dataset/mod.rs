//! Salesdash Data Layer
//!
//! This module provides everything that runs once at startup:
//!
//! - **types**: Core data structures (RawTable, SalesRecord, SalesTable)
//! - **source**: Extraction from the relational store (SQLite)
//! - **postgres**: Extraction from PostgreSQL
//! - **normalize**: Coercion of numeric and date columns
//! - **geo**: GeoJSON boundary reference for the choropleth
//! - **import**: CSV export → SQLite table, for seeding a source
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Load Path:
//!   SalesSource → RawTable → normalize → SalesTable (Arc, read-only)
//!   GeoJSON file → GeoReference (Arc, read-only)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use salesdash::dataset::{load_table, SqliteSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SqliteSource::from_url("sqlite://sales.db", "ventas")?;
//!     let table = load_table(&source)?;
//!     println!("Loaded {} sales", table.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod geo;
pub mod import;
pub mod normalize;
pub mod postgres;
pub mod source;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use geo::{GeoReference, DEFAULT_FEATURE_ID_KEY};
pub use import::{import_csv, read_csv, write_sqlite, ImportReport};
pub use normalize::{normalize, parse_datetime, NormalizeReport};
pub use postgres::PostgresSource;
pub use source::{
    is_postgres_url, mask_password, open_source, parse_database_url, SalesSource, SqliteSource,
    DEFAULT_TABLE,
};
pub use types::{columns, RawTable, RawValue, SalesRecord, SalesTable};

/// Fetch and normalize the full sales table from a source
pub fn load_table(source: &dyn SalesSource) -> DatasetResult<SalesTable> {
    tracing::info!("Loading sales from {}", source.describe());

    let raw = source.fetch()?;
    let (table, report) = normalize(&raw)?;

    tracing::info!(
        rows = table.len(),
        coerced = report.total_coerced(),
        "Sales table normalized"
    );

    Ok(table)
}

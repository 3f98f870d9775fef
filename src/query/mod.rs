//! Salesdash Query Engine
//!
//! In-memory filtering and aggregation over the loaded sales table:
//!
//! - **AST**: Filter, grouping key, measure and aggregation types
//! - **Executor**: Partitioning, group-by, top-N and distinct counts
//!
//! # Filter semantics
//!
//! ```text
//! regions  []  or contains "ALL"  → no restriction
//! brands   []  or contains "ALL"  → no restriction
//! dates    both bounds present    → start <= purchase date <= end (inclusive)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use salesdash::query::{group_by, top_n, AggregationFunc, GroupKey, Measure, SalesFilter};
//!
//! let rows = SalesFilter::builder().brands(&["Nike"]).build().apply(table.iter());
//! let cities = top_n(
//!     group_by(&rows, &[GroupKey::City], Measure::Total, AggregationFunc::Sum),
//!     10,
//! );
//! ```

mod ast;
mod error;
mod executor;

pub use ast::{
    parse_filter_date, AggregationFunc, GroupKey, KeyValue, Measure, SalesFilter,
    SalesFilterBuilder, SELECT_ALL, WEEKDAY_NAMES,
};
pub use error::{QueryError, QueryResult};
pub use executor::{
    count_by, distinct_count, distinct_values, group_by, partition, sum, top_n, Group, Partition,
};

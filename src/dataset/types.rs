//! Core data types for the sales dataset
//!
//! This module defines the fundamental types used throughout the data layer:
//! - `RawValue` / `RawTable`: the untyped result set as read from the source
//! - `SalesRecord`: one normalized transaction
//! - `SalesTable`: the immutable, load-once collection of records

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Source column names of the sales table
pub mod columns {
    pub const PRODUCT_ID: &str = "producto_id";
    pub const PRODUCT: &str = "producto";
    pub const BRAND: &str = "marca";
    pub const GENDER: &str = "product_genero";
    pub const UNIT_PRICE: &str = "valor_unitario";
    pub const QUANTITY: &str = "cantidad";
    pub const LINE_VALUE: &str = "valor_total";
    pub const SHIPPING_COST: &str = "costo_envio";
    pub const NET_PROFIT: &str = "ganancia_neta";
    pub const TOTAL: &str = "total";
    pub const PRICE: &str = "precio";
    pub const PURCHASE_DATE: &str = "fecha_compra";
    pub const REGION: &str = "name_region";
    pub const STATE: &str = "abbrev_state";
    pub const CITY: &str = "ciudad";
    pub const SALESPERSON: &str = "nombre_vendedor";
    pub const CONDITION: &str = "condicion";

    /// Columns coerced to numbers during normalization
    pub const NUMERIC: [&str; 7] = [
        TOTAL,
        QUANTITY,
        UNIT_PRICE,
        LINE_VALUE,
        SHIPPING_COST,
        NET_PROFIT,
        PRICE,
    ];

    /// Columns kept as categorical text
    pub const CATEGORICAL: [&str; 9] = [
        PRODUCT_ID,
        PRODUCT,
        BRAND,
        GENDER,
        REGION,
        STATE,
        CITY,
        SALESPERSON,
        CONDITION,
    ];
}

/// A single cell as returned by the data source, before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl RawValue {
    /// Convenience constructor for text cells
    pub fn text(s: impl Into<String>) -> Self {
        RawValue::Text(s.into())
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Real(v)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Integer(v)
    }
}

/// Untyped result set: column names plus rows of raw cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    /// Create an empty table with the given columns
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Builder method: append a row
    pub fn row(mut self, values: Vec<RawValue>) -> Self {
        self.rows.push(values);
        self
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One normalized sales transaction
///
/// Numeric and date fields are `None` when the source value could not be
/// coerced. Categorical fields are `None` for SQL NULL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub product_id: Option<String>,
    pub product: Option<String>,
    pub brand: Option<String>,
    pub gender: Option<String>,
    pub unit_price: Option<f64>,
    pub quantity: Option<f64>,
    pub line_value: Option<f64>,
    pub shipping_cost: Option<f64>,
    pub net_profit: Option<f64>,
    pub total: Option<f64>,
    pub price: Option<f64>,
    pub purchased_at: Option<NaiveDateTime>,
    pub region: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub salesperson: Option<String>,
    pub condition: Option<String>,
}

impl SalesRecord {
    /// Calendar date of the purchase
    pub fn purchase_date(&self) -> Option<NaiveDate> {
        self.purchased_at.map(|dt| dt.date())
    }

    // Builder methods, mostly for fixtures

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn product(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.product_id = Some(id.into());
        self.product = Some(name.into());
        self
    }

    pub fn total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn net_profit(mut self, profit: f64) -> Self {
        self.net_profit = Some(profit);
        self
    }

    pub fn prices(mut self, unit_price: f64, price: f64) -> Self {
        self.unit_price = Some(unit_price);
        self.price = Some(price);
        self
    }

    pub fn purchased_on(mut self, date: NaiveDate) -> Self {
        self.purchased_at = date.and_hms_opt(0, 0, 0);
        self
    }

    pub fn purchased_at(mut self, at: NaiveDateTime) -> Self {
        self.purchased_at = Some(at);
        self
    }

    pub fn location(
        mut self,
        state: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        self.state = Some(state.into());
        self.city = Some(city.into());
        self
    }

    pub fn salesperson(mut self, name: impl Into<String>) -> Self {
        self.salesperson = Some(name.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

/// The full, immutable sales table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest purchase date, if any record has one
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(SalesRecord::purchase_date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}

impl FromIterator<SalesRecord> for SalesTable {
    fn from_iter<I: IntoIterator<Item = SalesRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_bounds() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let table: SalesTable = vec![
            SalesRecord::default().purchased_on(d(15)),
            SalesRecord::default(),
            SalesRecord::default().purchased_on(d(3)),
            SalesRecord::default().purchased_on(d(28)),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.date_bounds(), Some((d(3), d(28))));
        assert_eq!(SalesTable::default().date_bounds(), None);
    }

    #[test]
    fn test_raw_table_column_index() {
        let table = RawTable::new(&["total", "marca"]);
        assert_eq!(table.column_index("marca"), Some(1));
        assert_eq!(table.column_index("ciudad"), None);
        assert!(table.is_empty());
    }
}

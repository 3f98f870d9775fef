//! Type Normalizer
//!
//! Turns the untyped result set into typed [`SalesRecord`]s. Numeric columns
//! are coerced to finite `f64`, the purchase date to `NaiveDateTime`; values
//! that fail coercion become `None` and are counted in a [`NormalizeReport`].
//! A required column missing from the result set is a hard error.

use crate::dataset::error::{DatasetError, DatasetResult};
use crate::dataset::types::{columns, RawTable, RawValue, SalesRecord, SalesTable};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Date-time layouts tried in order for text dates
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Date-only layouts tried after the date-time ones
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

static NULL: RawValue = RawValue::Null;

/// Per-column count of values that were coerced to missing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeReport {
    pub rows: usize,
    pub coerced: BTreeMap<&'static str, usize>,
}

impl NormalizeReport {
    /// Total number of cells replaced by the missing marker
    pub fn total_coerced(&self) -> usize {
        self.coerced.values().sum()
    }

    fn record(&mut self, column: &'static str) {
        *self.coerced.entry(column).or_insert(0) += 1;
    }
}

/// Resolved positions of every required column
struct ColumnMap {
    product_id: usize,
    product: usize,
    brand: usize,
    gender: usize,
    unit_price: usize,
    quantity: usize,
    line_value: usize,
    shipping_cost: usize,
    net_profit: usize,
    total: usize,
    price: usize,
    purchased_at: usize,
    region: usize,
    state: usize,
    city: usize,
    salesperson: usize,
    condition: usize,
}

impl ColumnMap {
    fn resolve(raw: &RawTable) -> DatasetResult<Self> {
        let find = |name: &str| {
            raw.column_index(name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            product_id: find(columns::PRODUCT_ID)?,
            product: find(columns::PRODUCT)?,
            brand: find(columns::BRAND)?,
            gender: find(columns::GENDER)?,
            unit_price: find(columns::UNIT_PRICE)?,
            quantity: find(columns::QUANTITY)?,
            line_value: find(columns::LINE_VALUE)?,
            shipping_cost: find(columns::SHIPPING_COST)?,
            net_profit: find(columns::NET_PROFIT)?,
            total: find(columns::TOTAL)?,
            price: find(columns::PRICE)?,
            purchased_at: find(columns::PURCHASE_DATE)?,
            region: find(columns::REGION)?,
            state: find(columns::STATE)?,
            city: find(columns::CITY)?,
            salesperson: find(columns::SALESPERSON)?,
            condition: find(columns::CONDITION)?,
        })
    }
}

/// Normalize a raw result set into the typed sales table
pub fn normalize(raw: &RawTable) -> DatasetResult<(SalesTable, NormalizeReport)> {
    let map = ColumnMap::resolve(raw)?;
    let mut report = NormalizeReport {
        rows: raw.rows.len(),
        ..Default::default()
    };

    let records = raw
        .rows
        .iter()
        .map(|row| {
            let cell = |idx: usize| row.get(idx).unwrap_or(&NULL);
            let mut number = |idx: usize, column: &'static str| {
                let value = cell(idx);
                let coerced = to_number(value);
                if coerced.is_none() && *value != RawValue::Null {
                    report.record(column);
                }
                coerced
            };

            let unit_price = number(map.unit_price, columns::UNIT_PRICE);
            let quantity = number(map.quantity, columns::QUANTITY);
            let line_value = number(map.line_value, columns::LINE_VALUE);
            let shipping_cost = number(map.shipping_cost, columns::SHIPPING_COST);
            let net_profit = number(map.net_profit, columns::NET_PROFIT);
            let total = number(map.total, columns::TOTAL);
            let price = number(map.price, columns::PRICE);

            let date_cell = cell(map.purchased_at);
            let purchased_at = to_datetime(date_cell);
            if purchased_at.is_none() && *date_cell != RawValue::Null {
                report.record(columns::PURCHASE_DATE);
            }

            SalesRecord {
                product_id: to_text(cell(map.product_id)),
                product: to_text(cell(map.product)),
                brand: to_text(cell(map.brand)),
                gender: to_text(cell(map.gender)),
                unit_price,
                quantity,
                line_value,
                shipping_cost,
                net_profit,
                total,
                price,
                purchased_at,
                region: to_text(cell(map.region)),
                state: to_text(cell(map.state)),
                city: to_text(cell(map.city)),
                salesperson: to_text(cell(map.salesperson)),
                condition: to_text(cell(map.condition)),
            }
        })
        .collect::<SalesTable>();

    for (column, count) in &report.coerced {
        tracing::warn!(column, count, "Coerced unparseable values to missing");
    }

    Ok((records, report))
}

/// Coerce a cell to a finite number
pub fn to_number(value: &RawValue) -> Option<f64> {
    let n = match value {
        RawValue::Integer(i) => *i as f64,
        RawValue::Real(f) => *f,
        RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        RawValue::Null | RawValue::Blob(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Coerce a cell to a date-time
///
/// Integers and reals are read as Unix seconds.
pub fn to_datetime(value: &RawValue) -> Option<NaiveDateTime> {
    match value {
        RawValue::Text(s) => parse_datetime(s.trim()),
        RawValue::Integer(secs) => DateTime::from_timestamp(*secs, 0).map(|dt| dt.naive_utc()),
        RawValue::Real(secs) if secs.is_finite() => {
            let whole = secs.floor();
            let nanos = ((secs - whole) * 1e9) as u32;
            DateTime::from_timestamp(whole as i64, nanos).map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

/// Parse a textual date or date-time in any of the accepted layouts
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    // Postgres renders timestamptz as `2024-01-15 10:00:00+00`
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.naive_utc());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn to_text(value: &RawValue) -> Option<String> {
    match value {
        RawValue::Text(s) => Some(s.clone()),
        RawValue::Integer(i) => Some(i.to_string()),
        RawValue::Real(f) => Some(f.to_string()),
        RawValue::Null | RawValue::Blob(_) => None,
    }
}

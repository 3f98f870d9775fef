//! Query building blocks
//!
//! Declarative pieces the dashboard composes into chart aggregations:
//!
//! - `SalesFilter`: region / brand / date-range narrowing of the table
//! - `GroupKey` / `KeyValue`: categorical and calendar grouping dimensions
//! - `Measure`: numeric field of a sales record
//! - `AggregationFunc`: how a group's values collapse to one number
//!
//! # Example
//!
//! ```rust,ignore
//! use salesdash::query::{SalesFilter, GroupKey, Measure, AggregationFunc, group_by};
//!
//! let filter = SalesFilter::builder()
//!     .regions(&["Sudeste"])
//!     .between(start, end)
//!     .build();
//! let rows = filter.apply(table.iter());
//! let by_city = group_by(&rows, &[GroupKey::City], Measure::Total, AggregationFunc::Sum);
//! ```

use crate::dataset::{columns, parse_datetime, SalesRecord};
use crate::query::error::{QueryError, QueryResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Synthetic dropdown value meaning "impose no filter on this dimension"
pub const SELECT_ALL: &str = "ALL";

/// Filter inputs of the dashboard
///
/// Empty selections and half-open date ranges impose no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesFilter {
    /// Selected region names
    #[serde(default)]
    pub regions: Vec<String>,
    /// Selected brand names
    #[serde(default)]
    pub brands: Vec<String>,
    /// Inclusive start of the purchase date range
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of the purchase date range
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl SalesFilter {
    /// Start building a filter
    pub fn builder() -> SalesFilterBuilder {
        SalesFilterBuilder::default()
    }

    /// Region predicate applies only to a non-empty selection without the sentinel
    pub fn region_active(&self) -> bool {
        selection_active(&self.regions)
    }

    /// Brand predicate applies only to a non-empty selection without the sentinel
    pub fn brand_active(&self) -> bool {
        selection_active(&self.brands)
    }

    /// The date range, when both bounds are present
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start_date?, self.end_date?))
    }

    /// True when no predicate would remove any row
    pub fn is_unrestricted(&self) -> bool {
        !self.region_active() && !self.brand_active() && self.date_range().is_none()
    }

    /// Check a single record against region, brand and date predicates, in that order
    pub fn matches(&self, record: &SalesRecord) -> bool {
        if self.region_active() && !contains(&self.regions, record.region.as_deref()) {
            return false;
        }

        if self.brand_active() && !contains(&self.brands, record.brand.as_deref()) {
            return false;
        }

        if let Some((start, end)) = self.date_range() {
            match record.purchase_date() {
                Some(date) if date >= start && date <= end => {}
                _ => return false,
            }
        }

        true
    }

    /// Narrow a set of records to those matching every active predicate
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a SalesRecord>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Parse a date-picker value, accepting plain dates and full timestamps
///
/// Blank input means "no bound".
pub fn parse_filter_date(input: &str) -> QueryResult<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    parse_datetime(input)
        .map(|dt| Some(dt.date()))
        .ok_or_else(|| QueryError::InvalidDate(input.to_string()))
}

fn selection_active(selection: &[String]) -> bool {
    !selection.is_empty() && !selection.iter().any(|s| s == SELECT_ALL)
}

fn contains(selection: &[String], value: Option<&str>) -> bool {
    value.is_some_and(|v| selection.iter().any(|s| s == v))
}

/// Builder for [`SalesFilter`]
#[derive(Debug, Clone, Default)]
pub struct SalesFilterBuilder {
    filter: SalesFilter,
}

impl SalesFilterBuilder {
    /// Restrict to the given regions
    pub fn regions(mut self, regions: &[&str]) -> Self {
        self.filter.regions = regions.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Restrict to the given brands
    pub fn brands(mut self, brands: &[&str]) -> Self {
        self.filter.brands = brands.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the inclusive start date
    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.filter.start_date = Some(date);
        self
    }

    /// Set the inclusive end date
    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.filter.end_date = Some(date);
        self
    }

    /// Set both date bounds
    pub fn between(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date(start).end_date(end)
    }

    /// Build the filter
    pub fn build(self) -> SalesFilter {
        self.filter
    }
}

/// Dimensions a chart can group by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Region,
    Brand,
    Product,
    ProductId,
    City,
    Salesperson,
    Gender,
    State,
    Condition,
    /// Day of week of the purchase, Monday first
    Weekday,
    /// Calendar month of the purchase
    Month,
    /// Calendar day of the purchase
    Day,
}

impl GroupKey {
    /// Extract this dimension from a record
    pub fn value_of(&self, record: &SalesRecord) -> Option<KeyValue> {
        let text = |v: &Option<String>| v.clone().map(KeyValue::Text);

        match self {
            Self::Region => text(&record.region),
            Self::Brand => text(&record.brand),
            Self::Product => text(&record.product),
            Self::ProductId => text(&record.product_id),
            Self::City => text(&record.city),
            Self::Salesperson => text(&record.salesperson),
            Self::Gender => text(&record.gender),
            Self::State => text(&record.state),
            Self::Condition => text(&record.condition),
            Self::Weekday => record
                .purchase_date()
                .map(|d| KeyValue::Weekday(d.weekday().num_days_from_monday())),
            Self::Month => record
                .purchase_date()
                .map(|d| KeyValue::Month(d.year(), d.month())),
            Self::Day => record.purchase_date().map(KeyValue::Day),
        }
    }

    /// Axis label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Region => "Region",
            Self::Brand => "Brand",
            Self::Product => "Product",
            Self::ProductId => "Product ID",
            Self::City => "City",
            Self::Salesperson => "Salesperson",
            Self::Gender => "Product Gender",
            Self::State => "State",
            Self::Condition => "Condition",
            Self::Weekday => "Weekday",
            Self::Month => "Month",
            Self::Day => "Purchase Date",
        }
    }

    /// Source column backing this dimension
    pub fn column(&self) -> &'static str {
        match self {
            Self::Region => columns::REGION,
            Self::Brand => columns::BRAND,
            Self::Product => columns::PRODUCT,
            Self::ProductId => columns::PRODUCT_ID,
            Self::City => columns::CITY,
            Self::Salesperson => columns::SALESPERSON,
            Self::Gender => columns::GENDER,
            Self::State => columns::STATE,
            Self::Condition => columns::CONDITION,
            Self::Weekday | Self::Month | Self::Day => columns::PURCHASE_DATE,
        }
    }

    /// Whether this key is derived from the purchase date
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Weekday | Self::Month | Self::Day)
    }
}

impl FromStr for GroupKey {
    type Err = QueryError;

    fn from_str(s: &str) -> QueryResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "region" | "name_region" => Ok(Self::Region),
            "brand" | "marca" => Ok(Self::Brand),
            "product" | "producto" => Ok(Self::Product),
            "product_id" | "producto_id" => Ok(Self::ProductId),
            "city" | "ciudad" => Ok(Self::City),
            "salesperson" | "nombre_vendedor" => Ok(Self::Salesperson),
            "gender" | "product_genero" => Ok(Self::Gender),
            "state" | "abbrev_state" => Ok(Self::State),
            "condition" | "condicion" => Ok(Self::Condition),
            "weekday" => Ok(Self::Weekday),
            "month" => Ok(Self::Month),
            "day" | "date" => Ok(Self::Day),
            other => Err(QueryError::UnknownDimension(other.to_string())),
        }
    }
}

/// A grouping key value
///
/// Ordering follows the natural order of each kind: text lexicographically,
/// calendar keys chronologically, weekdays Monday to Sunday.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyValue {
    Text(String),
    Day(NaiveDate),
    Month(i32, u32),
    /// Days from Monday (0..=6)
    Weekday(u32),
}

impl KeyValue {
    /// The calendar date for day keys
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Day(d) => Some(*d),
            _ => None,
        }
    }
}

impl std::fmt::Display for KeyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Day(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Month(y, m) => write!(f, "{:04}-{:02}", y, m),
            Self::Weekday(n) => {
                let name = WEEKDAY_NAMES.get(*n as usize).copied().unwrap_or("Unknown");
                write!(f, "{}", name)
            }
        }
    }
}

/// Day names, Monday first
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Numeric fields of a sales record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Total,
    Quantity,
    UnitPrice,
    Price,
    NetProfit,
    ShippingCost,
    LineValue,
}

impl Measure {
    /// Extract this measure from a record
    pub fn value_of(&self, record: &SalesRecord) -> Option<f64> {
        match self {
            Self::Total => record.total,
            Self::Quantity => record.quantity,
            Self::UnitPrice => record.unit_price,
            Self::Price => record.price,
            Self::NetProfit => record.net_profit,
            Self::ShippingCost => record.shipping_cost,
            Self::LineValue => record.line_value,
        }
    }

    /// Axis label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Total => "Total Sales",
            Self::Quantity => "Quantity",
            Self::UnitPrice => "Unit Price",
            Self::Price => "Price",
            Self::NetProfit => "Net Profit",
            Self::ShippingCost => "Shipping Cost",
            Self::LineValue => "Line Value",
        }
    }

    /// Source column backing this measure
    pub fn column(&self) -> &'static str {
        match self {
            Self::Total => columns::TOTAL,
            Self::Quantity => columns::QUANTITY,
            Self::UnitPrice => columns::UNIT_PRICE,
            Self::Price => columns::PRICE,
            Self::NetProfit => columns::NET_PROFIT,
            Self::ShippingCost => columns::SHIPPING_COST,
            Self::LineValue => columns::LINE_VALUE,
        }
    }
}

impl FromStr for Measure {
    type Err = QueryError;

    fn from_str(s: &str) -> QueryResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "total" => Ok(Self::Total),
            "quantity" | "cantidad" => Ok(Self::Quantity),
            "unit_price" | "valor_unitario" => Ok(Self::UnitPrice),
            "price" | "precio" => Ok(Self::Price),
            "net_profit" | "ganancia_neta" => Ok(Self::NetProfit),
            "shipping_cost" | "costo_envio" => Ok(Self::ShippingCost),
            "line_value" | "valor_total" => Ok(Self::LineValue),
            other => Err(QueryError::UnknownMeasure(other.to_string())),
        }
    }
}

/// Aggregation functions available to chart specs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationFunc {
    /// Sum of values (0 for an empty group)
    Sum,
    /// Average of values
    Avg,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
    /// Count of values (0 for an empty group)
    Count,
}

impl AggregationFunc {
    /// Apply aggregation to a slice of values
    pub fn apply(&self, values: &[f64]) -> Option<f64> {
        match self {
            Self::Sum => Some(values.iter().sum()),
            Self::Count => Some(values.len() as f64),
            _ if values.is_empty() => None,
            Self::Avg => Some(values.iter().sum::<f64>() / values.len() as f64),
            Self::Min => Some(values.iter().cloned().fold(f64::INFINITY, f64::min)),
            Self::Max => Some(values.iter().cloned().fold(f64::NEG_INFINITY, f64::max)),
        }
    }
}

impl std::fmt::Display for AggregationFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sum => write!(f, "SUM"),
            Self::Avg => write!(f, "AVG"),
            Self::Min => write!(f, "MIN"),
            Self::Max => write!(f, "MAX"),
            Self::Count => write!(f, "COUNT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_filter_builder() {
        let filter = SalesFilter::builder()
            .regions(&["Norte"])
            .brands(&["Nike", "Adidas"])
            .between(date(2024, 1, 1), date(2024, 1, 31))
            .build();

        assert_eq!(filter.regions, vec!["Norte"]);
        assert_eq!(filter.brands.len(), 2);
        assert_eq!(
            filter.date_range(),
            Some((date(2024, 1, 1), date(2024, 1, 31)))
        );
        assert!(!filter.is_unrestricted());
    }

    #[test]
    fn test_empty_and_sentinel_selections_are_inactive() {
        assert!(SalesFilter::default().is_unrestricted());

        let filter = SalesFilter::builder()
            .regions(&[SELECT_ALL])
            .brands(&["Nike", SELECT_ALL, "Puma"])
            .build();
        assert!(!filter.region_active());
        assert!(!filter.brand_active());
        assert!(filter.is_unrestricted());
    }

    #[test]
    fn test_half_open_date_range_is_inactive() {
        let filter = SalesFilter::builder().start_date(date(2024, 1, 1)).build();
        assert_eq!(filter.date_range(), None);

        // A record without a date still passes
        assert!(filter.matches(&SalesRecord::default()));
    }

    #[test]
    fn test_matches_date_bounds_inclusive() {
        let filter = SalesFilter::builder()
            .between(date(2024, 1, 1), date(2024, 1, 31))
            .build();

        let on = |d| SalesRecord::default().purchased_on(d);
        assert!(filter.matches(&on(date(2024, 1, 1))));
        assert!(filter.matches(&on(date(2024, 1, 31))));
        assert!(!filter.matches(&on(date(2024, 2, 1))));
        assert!(!filter.matches(&on(date(2023, 12, 31))));

        // Time of day does not push a purchase out of its calendar day
        let late = date(2024, 1, 31).and_hms_opt(23, 59, 59).unwrap();
        assert!(filter.matches(&SalesRecord::default().purchased_at(late)));

        // Missing dates never satisfy an active range
        assert!(!filter.matches(&SalesRecord::default()));
    }

    #[test]
    fn test_matches_missing_region() {
        let filter = SalesFilter::builder().regions(&["Sur"]).build();
        assert!(!filter.matches(&SalesRecord::default()));
        assert!(filter.matches(&SalesRecord::default().region("Sur")));
    }

    #[test]
    fn test_filter_deserializes_with_defaults() {
        let filter: SalesFilter =
            serde_json::from_str(r#"{"brands": ["Nike"], "start_date": "2024-01-01"}"#).unwrap();
        assert!(filter.regions.is_empty());
        assert_eq!(filter.start_date, Some(date(2024, 1, 1)));
        assert_eq!(filter.end_date, None);
    }

    #[test]
    fn test_parse_filter_date() {
        assert_eq!(parse_filter_date("2024-03-01"), Ok(Some(date(2024, 3, 1))));
        assert_eq!(
            parse_filter_date("2024-03-01T10:30:00"),
            Ok(Some(date(2024, 3, 1)))
        );
        assert_eq!(parse_filter_date("  "), Ok(None));
        assert!(matches!(
            parse_filter_date("yesterday"),
            Err(QueryError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse_keys_and_measures() {
        assert_eq!("region".parse::<GroupKey>(), Ok(GroupKey::Region));
        assert_eq!("marca".parse::<GroupKey>(), Ok(GroupKey::Brand));
        assert_eq!("Month".parse::<GroupKey>(), Ok(GroupKey::Month));
        assert!("colour".parse::<GroupKey>().is_err());

        assert_eq!("ganancia_neta".parse::<Measure>(), Ok(Measure::NetProfit));
        assert_eq!("total".parse::<Measure>(), Ok(Measure::Total));
        assert!(matches!(
            "margin".parse::<Measure>(),
            Err(QueryError::UnknownMeasure(_))
        ));
    }

    #[test]
    fn test_group_key_values() {
        // 2024-01-17 is a Wednesday
        let record = SalesRecord::default()
            .region("Sul")
            .purchased_on(date(2024, 1, 17));

        assert_eq!(
            GroupKey::Region.value_of(&record),
            Some(KeyValue::Text("Sul".to_string()))
        );
        assert_eq!(GroupKey::Brand.value_of(&record), None);
        assert_eq!(GroupKey::Weekday.value_of(&record), Some(KeyValue::Weekday(2)));
        assert_eq!(GroupKey::Month.value_of(&record), Some(KeyValue::Month(2024, 1)));
        assert_eq!(
            GroupKey::Day.value_of(&record),
            Some(KeyValue::Day(date(2024, 1, 17)))
        );
        assert!(GroupKey::Month.is_temporal());
        assert_eq!(GroupKey::City.column(), "ciudad");
    }

    #[test]
    fn test_key_value_display_and_order() {
        assert_eq!(KeyValue::Weekday(0).to_string(), "Monday");
        assert_eq!(KeyValue::Weekday(6).to_string(), "Sunday");
        assert_eq!(KeyValue::Month(2024, 3).to_string(), "2024-03");
        assert_eq!(KeyValue::Day(date(2024, 3, 5)).to_string(), "2024-03-05");

        assert!(KeyValue::Weekday(0) < KeyValue::Weekday(4));
        assert!(KeyValue::Month(2023, 12) < KeyValue::Month(2024, 1));
    }

    #[test]
    fn test_measure_values() {
        let record = SalesRecord::default().total(10.0).net_profit(-2.5);
        assert_eq!(Measure::Total.value_of(&record), Some(10.0));
        assert_eq!(Measure::NetProfit.value_of(&record), Some(-2.5));
        assert_eq!(Measure::Quantity.value_of(&record), None);
        assert_eq!(Measure::NetProfit.column(), "ganancia_neta");
    }

    #[test]
    fn test_aggregation_functions() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        assert_eq!(AggregationFunc::Avg.apply(&values), Some(3.0));
        assert_eq!(AggregationFunc::Sum.apply(&values), Some(15.0));
        assert_eq!(AggregationFunc::Min.apply(&values), Some(1.0));
        assert_eq!(AggregationFunc::Max.apply(&values), Some(5.0));
        assert_eq!(AggregationFunc::Count.apply(&values), Some(5.0));

        // Empty groups sum and count to zero, other functions have no value
        let empty: Vec<f64> = vec![];
        assert_eq!(AggregationFunc::Sum.apply(&empty), Some(0.0));
        assert_eq!(AggregationFunc::Count.apply(&empty), Some(0.0));
        assert_eq!(AggregationFunc::Avg.apply(&empty), None);
    }
}

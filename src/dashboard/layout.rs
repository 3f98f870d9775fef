//! Layout Builder
//!
//! Computes the static page description once from the unfiltered table:
//! headline KPI cards, dropdown options, date picker bounds and the tab strip.
//! Filter changes never touch it.

use crate::dashboard::tabs::{DEFAULT_TAB, TABS};
use crate::dataset::SalesTable;
use crate::query::{distinct_count, distinct_values, sum, GroupKey, Measure, SELECT_ALL};
use chrono::NaiveDate;
use serde::Serialize;

/// Label of the sentinel dropdown entry
pub const SELECT_ALL_LABEL: &str = "Select All";

/// Bootstrap accent of a KPI card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Primary,
    Success,
    Info,
    Warning,
}

/// Headline figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: f64,
    /// Value with thousands separators, e.g. `$1,234`
    pub display: String,
    pub accent: Accent,
}

/// Dropdown entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    fn same(value: String) -> Self {
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Date picker bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

/// Tab strip entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabLink {
    pub id: &'static str,
    pub label: &'static str,
}

/// Static page description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub brand: &'static str,
    pub heading: &'static str,
    pub cards: Vec<KpiCard>,
    pub region_options: Vec<SelectOption>,
    pub brand_options: Vec<SelectOption>,
    pub date_range: Option<DateBounds>,
    pub tabs: Vec<TabLink>,
    pub default_tab: &'static str,
}

impl Layout {
    /// Build the layout from the full, unfiltered table
    pub fn build(table: &SalesTable) -> Self {
        let rows: Vec<_> = table.iter().collect();

        let total = sum(&rows, Measure::Total);
        let quantity = sum(&rows, Measure::Quantity);
        let profit = sum(&rows, Measure::NetProfit);
        let products = distinct_count(&rows, GroupKey::ProductId) as f64;

        let cards = vec![
            KpiCard {
                title: "Total Sales",
                value: total,
                display: format_thousands(total, true),
                accent: Accent::Primary,
            },
            KpiCard {
                title: "Products Sold",
                value: quantity,
                display: format_thousands(quantity, false),
                accent: Accent::Success,
            },
            KpiCard {
                title: "Net Profit",
                value: profit,
                display: format_thousands(profit, true),
                accent: Accent::Info,
            },
            KpiCard {
                title: "Unique Products",
                value: products,
                display: format_thousands(products, false),
                accent: Accent::Warning,
            },
        ];

        let date_range = table
            .date_bounds()
            .map(|(min, max)| DateBounds { min, max });

        Self {
            brand: "Sales Dashboard",
            heading: "Sales Analysis",
            cards,
            region_options: options(table, GroupKey::Region),
            brand_options: options(table, GroupKey::Brand),
            date_range,
            tabs: TABS
                .iter()
                .map(|t| TabLink {
                    id: t.id,
                    label: t.label,
                })
                .collect(),
            default_tab: DEFAULT_TAB,
        }
    }
}

fn options(table: &SalesTable, key: GroupKey) -> Vec<SelectOption> {
    std::iter::once(SelectOption {
        label: SELECT_ALL_LABEL.to_string(),
        value: SELECT_ALL.to_string(),
    })
    .chain(
        distinct_values(table.iter(), key)
            .into_iter()
            .map(SelectOption::same),
    )
    .collect()
}

/// Round to a whole number and group digits with commas
pub fn format_thousands(value: f64, currency: bool) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    let symbol = if currency { "$" } else { "" };
    format!("{}{}{}", sign, symbol, grouped)
}

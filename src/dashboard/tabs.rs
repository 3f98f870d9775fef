//! Tab registry
//!
//! Maps each tab id to its label and ordered chart declarations.

use crate::dashboard::charts::{
    ChartKind, ChartSpec, HierarchyStyle, Ranking, ScatterAxis, ScatterSource, TimeBucket,
};
use crate::query::{AggregationFunc, GroupKey, Measure};

/// Tab shown before the user picks one
pub const DEFAULT_TAB: &str = "tab-1";

/// Number of groups kept by ranked bars
pub const TOP_N: usize = 10;

/// One dashboard tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub charts: &'static [ChartSpec],
}

const fn sum_bar(key: GroupKey, measure: Measure, ranking: Ranking, range_slider: bool) -> ChartKind {
    ChartKind::Bar {
        key,
        measure,
        agg: AggregationFunc::Sum,
        ranking,
        range_slider,
    }
}

const fn rows_scatter(
    x: ScatterAxis,
    y: Measure,
    size: Option<Measure>,
    color: Option<GroupKey>,
) -> ChartKind {
    ChartKind::Scatter(ScatterSource::Rows {
        x,
        y,
        size,
        color,
        hover: Some(GroupKey::Product),
    })
}

const PRICE_PROFIT_BY_BRAND: ChartKind = rows_scatter(
    ScatterAxis::Measure(Measure::Price),
    Measure::NetProfit,
    None,
    Some(GroupKey::Brand),
);

const GENDER_TOTAL: ChartSpec = ChartSpec::new(
    "Total Sales by Product Gender",
    6,
    sum_bar(GroupKey::Gender, Measure::Total, Ranking::All, true),
);

/// All tabs in display order
pub static TABS: [TabSpec; 8] = [
    TabSpec {
        id: "tab-1",
        label: "Overview",
        charts: &[
            ChartSpec::new(
                "Sales by Product Condition",
                6,
                ChartKind::Pie {
                    names: GroupKey::Condition,
                    values: Measure::Total,
                },
            ),
            ChartSpec::new(
                "Sales by Region",
                6,
                sum_bar(GroupKey::Region, Measure::Total, Ranking::All, true),
            ),
            ChartSpec::new(
                "Unit Price vs Quantity by Brand",
                12,
                rows_scatter(
                    ScatterAxis::Measure(Measure::UnitPrice),
                    Measure::Quantity,
                    Some(Measure::Total),
                    Some(GroupKey::Brand),
                ),
            ),
            ChartSpec::new(
                "Sales by Region, Brand and Product",
                12,
                ChartKind::Hierarchy {
                    style: HierarchyStyle::Sunburst,
                    path: &[GroupKey::Region, GroupKey::Brand, GroupKey::Product],
                    values: Measure::Total,
                },
            )
            .with_height(1000),
        ],
    },
    TabSpec {
        id: "tab-2",
        label: "Products",
        charts: &[
            ChartSpec::new(
                "Sales Hierarchy by Brand and Product",
                12,
                ChartKind::Hierarchy {
                    style: HierarchyStyle::Treemap,
                    path: &[GroupKey::Brand, GroupKey::Product],
                    values: Measure::Total,
                },
            ),
            ChartSpec::new(
                "Unit Price Distribution by Brand",
                6,
                ChartKind::Box {
                    key: GroupKey::Brand,
                    field: Measure::UnitPrice,
                },
            ),
            ChartSpec::new("Price vs Profit by Brand", 6, PRICE_PROFIT_BY_BRAND),
        ],
    },
    TabSpec {
        id: "tab-3",
        label: "Geography",
        charts: &[
            ChartSpec::new(
                "Total Sales by State",
                12,
                ChartKind::Choropleth {
                    key: GroupKey::State,
                    measure: Measure::Total,
                },
            ),
            ChartSpec::new(
                "Top 10 Cities by Sales",
                12,
                sum_bar(GroupKey::City, Measure::Total, Ranking::TopN(TOP_N), true),
            ),
        ],
    },
    TabSpec {
        id: "tab-4",
        label: "Trends",
        charts: &[
            ChartSpec::new(
                "Sales Trend over Time",
                12,
                ChartKind::Line {
                    bucket: TimeBucket::Day,
                    measure: Measure::Total,
                    split: None,
                    range_slider: true,
                },
            ),
            ChartSpec::new(
                "Monthly Sales",
                6,
                sum_bar(GroupKey::Month, Measure::Total, Ranking::All, true),
            ),
            ChartSpec::new(
                "Sales Distribution by Weekday",
                6,
                ChartKind::Box {
                    key: GroupKey::Weekday,
                    field: Measure::Total,
                },
            ),
            ChartSpec::new(
                "Sales by Brand over Time",
                12,
                rows_scatter(
                    ScatterAxis::Key(GroupKey::Day),
                    Measure::Total,
                    Some(Measure::Quantity),
                    Some(GroupKey::Brand),
                ),
            ),
        ],
    },
    TabSpec {
        id: "tab-5",
        label: "Salespeople",
        charts: &[
            ChartSpec::new(
                "Top 10 Salespeople by Total Sales",
                6,
                sum_bar(GroupKey::Salesperson, Measure::Total, Ranking::TopN(TOP_N), true),
            ),
            ChartSpec::new(
                "Quantity Sold vs Total Sales by Salesperson",
                6,
                ChartKind::Scatter(ScatterSource::Grouped {
                    by: GroupKey::Salesperson,
                    x: Measure::Quantity,
                    y: Measure::Total,
                }),
            ),
            ChartSpec::new(
                "Profit Distribution by Salesperson",
                12,
                ChartKind::Box {
                    key: GroupKey::Salesperson,
                    field: Measure::NetProfit,
                },
            ),
            ChartSpec::new(
                "Total Sales vs Net Profit by Salesperson",
                12,
                ChartKind::Scatter(ScatterSource::Grouped {
                    by: GroupKey::Salesperson,
                    x: Measure::Total,
                    y: Measure::NetProfit,
                }),
            ),
        ],
    },
    TabSpec {
        id: "tab-6",
        label: "Categories",
        charts: &[
            ChartSpec::new(
                "Sales Trends by Product Gender",
                12,
                ChartKind::Line {
                    bucket: TimeBucket::Day,
                    measure: Measure::Total,
                    split: Some(GroupKey::Gender),
                    range_slider: true,
                },
            ),
            GENDER_TOTAL,
            ChartSpec::new(
                "Unit Price Distribution by Product Gender",
                6,
                ChartKind::Box {
                    key: GroupKey::Gender,
                    field: Measure::UnitPrice,
                },
            ),
        ],
    },
    TabSpec {
        id: "tab-7",
        label: "Demographics",
        charts: &[
            ChartSpec::new(
                "Sales Count by Region",
                12,
                ChartKind::Histogram {
                    key: GroupKey::Region,
                },
            ),
            GENDER_TOTAL,
            ChartSpec::new(
                "Region vs Sales by Product Gender",
                6,
                rows_scatter(
                    ScatterAxis::Key(GroupKey::Region),
                    Measure::Total,
                    None,
                    Some(GroupKey::Gender),
                ),
            ),
        ],
    },
    TabSpec {
        id: "tab-8",
        label: "Profitability",
        charts: &[
            ChartSpec::new(
                "Top 10 Salespeople by Net Profit",
                12,
                sum_bar(
                    GroupKey::Salesperson,
                    Measure::NetProfit,
                    Ranking::TopN(TOP_N),
                    true,
                ),
            ),
            ChartSpec::new("Price vs Net Profit by Brand", 6, PRICE_PROFIT_BY_BRAND),
            ChartSpec::new(
                "Profit Distribution by Brand",
                6,
                ChartKind::Box {
                    key: GroupKey::Brand,
                    field: Measure::NetProfit,
                },
            ),
        ],
    },
];

/// Look up a tab by id
pub fn find_tab(id: &str) -> Option<&'static TabSpec> {
    TABS.iter().find(|t| t.id == id)
}

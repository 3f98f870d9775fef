//! Chart declarations and their rendered view models
//!
//! A [`ChartSpec`] says *what* a chart shows (keys, measures, ranking).
//! Rendering turns it into a [`ChartView`] holding the aggregated series,
//! which serializes to the JSON the dashboard page plots.

use crate::dashboard::stats::BoxSummary;
use crate::dashboard::style::ChartStyle;
use crate::query::{AggregationFunc, GroupKey, Measure};
use serde::Serialize;

/// Which groups of a bar chart are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// Every group, key ascending
    All,
    /// The N largest groups, value descending
    TopN(usize),
}

/// Horizontal axis of a row-level scatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterAxis {
    Measure(Measure),
    /// Categorical or date axis
    Key(GroupKey),
}

impl ScatterAxis {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Measure(m) => m.label(),
            Self::Key(k) => k.label(),
        }
    }
}

/// Where scatter points come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterSource {
    /// One point per row
    Rows {
        x: ScatterAxis,
        y: Measure,
        size: Option<Measure>,
        color: Option<GroupKey>,
        hover: Option<GroupKey>,
    },
    /// One point per group, both axes summed over the group
    Grouped { by: GroupKey, x: Measure, y: Measure },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyStyle {
    Sunburst,
    Treemap,
}

/// Time bucket of a line chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    Day,
    Month,
}

impl TimeBucket {
    pub fn key(&self) -> GroupKey {
        match self {
            Self::Day => GroupKey::Day,
            Self::Month => GroupKey::Month,
        }
    }
}

/// Declarative chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie {
        names: GroupKey,
        values: Measure,
    },
    Bar {
        key: GroupKey,
        measure: Measure,
        agg: AggregationFunc,
        ranking: Ranking,
        range_slider: bool,
    },
    Scatter(ScatterSource),
    Hierarchy {
        style: HierarchyStyle,
        path: &'static [GroupKey],
        values: Measure,
    },
    Choropleth {
        key: GroupKey,
        measure: Measure,
    },
    Box {
        key: GroupKey,
        field: Measure,
    },
    Histogram {
        key: GroupKey,
    },
    Line {
        bucket: TimeBucket,
        measure: Measure,
        split: Option<GroupKey>,
        range_slider: bool,
    },
}

/// One chart of a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: &'static str,
    /// Grid columns out of 12
    pub width: u8,
    /// Fixed height in pixels
    pub height: Option<u32>,
    pub kind: ChartKind,
}

impl ChartSpec {
    pub const fn new(title: &'static str, width: u8, kind: ChartKind) -> Self {
        Self {
            title,
            width,
            height: None,
            kind,
        }
    }

    pub const fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }
}

/// A scatter or axis coordinate: numeric, or a category / date label
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Coord {
    Number(f64),
    Text(String),
}

/// Points sharing one color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    /// Color group, `None` for an uncolored chart
    pub name: Option<String>,
    pub x: Vec<Coord>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec<f64>>,
    /// Hover text per point
    pub text: Vec<String>,
}

impl ScatterSeries {
    pub fn new(name: Option<String>, sized: bool) -> Self {
        Self {
            name,
            x: Vec::new(),
            y: Vec::new(),
            size: sized.then(Vec::new),
            text: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// One line of a line chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: Option<String>,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

/// Aggregated data of a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    Pie {
        labels: Vec<String>,
        values: Vec<f64>,
    },
    Bar {
        x_label: &'static str,
        y_label: &'static str,
        x: Vec<String>,
        y: Vec<f64>,
        range_slider: bool,
    },
    Scatter {
        x_label: &'static str,
        y_label: &'static str,
        series: Vec<ScatterSeries>,
    },
    Hierarchy {
        style: HierarchyStyle,
        ids: Vec<String>,
        labels: Vec<String>,
        parents: Vec<String>,
        values: Vec<f64>,
    },
    Choropleth {
        z_label: &'static str,
        feature_id_key: String,
        locations: Vec<String>,
        values: Vec<f64>,
        /// Locations with no boundary in the geo reference
        unmatched: Vec<String>,
    },
    Box {
        x_label: &'static str,
        y_label: &'static str,
        boxes: Vec<BoxSummary>,
    },
    Histogram {
        x_label: &'static str,
        x: Vec<String>,
        counts: Vec<usize>,
    },
    Line {
        x_label: &'static str,
        y_label: &'static str,
        series: Vec<LineSeries>,
        range_slider: bool,
    },
}

/// A rendered chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub title: &'static str,
    pub width: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub data: ChartData,
    pub style: ChartStyle,
}

/// The output of one render call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabView {
    pub tab: String,
    pub label: &'static str,
    /// Rows left after filtering
    pub row_count: usize,
    /// Sum of the total column over the filtered rows
    pub total: f64,
    pub charts: Vec<ChartView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_data_tagging() {
        let data = ChartData::Pie {
            labels: vec!["new".to_string()],
            values: vec![1.0],
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["type"], "pie");
        assert_eq!(json["labels"][0], "new");
    }

    #[test]
    fn test_coord_is_untagged() {
        let series = ScatterSeries {
            name: None,
            x: vec![Coord::Number(1.5), Coord::Text("Sul".to_string())],
            y: vec![2.0, 3.0],
            size: None,
            text: vec![String::new(), String::new()],
        };
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["x"], serde_json::json!([1.5, "Sul"]));
        assert!(json.get("size").is_none());
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_chart_spec_builder() {
        let spec = ChartSpec::new("Sales", 12, ChartKind::Histogram { key: GroupKey::Region })
            .with_height(1000);
        assert_eq!(spec.height, Some(1000));
        assert_eq!(TimeBucket::Month.key(), GroupKey::Month);
        assert_eq!(ScatterAxis::Measure(Measure::Price).label(), "Price");
    }
}

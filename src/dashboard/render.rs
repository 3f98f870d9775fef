//! Filter-and-Render Dispatcher
//!
//! One pure operation: filter the shared table, then aggregate it into every
//! chart the requested tab declares.
//!
//! ```text
//! (tab, SalesFilter) → find_tab → SalesFilter::apply → render_chart × N → TabView
//! ```
//!
//! Nothing is cached; each call re-filters and re-aggregates.

use crate::dashboard::charts::{
    ChartData, ChartKind, ChartSpec, ChartView, Coord, HierarchyStyle, LineSeries, Ranking,
    ScatterAxis, ScatterSeries, ScatterSource, TabView, TimeBucket,
};
use crate::dashboard::error::{RenderError, RenderResult};
use crate::dashboard::stats::summarize;
use crate::dashboard::style::ChartStyle;
use crate::dashboard::tabs::find_tab;
use crate::dashboard::DashboardContext;
use crate::dataset::{GeoReference, SalesRecord};
use crate::query::{
    count_by, group_by, partition, sum, top_n, AggregationFunc, Group, GroupKey, KeyValue,
    Measure, SalesFilter,
};
use std::collections::BTreeMap;
use std::time::Instant;

/// Render one tab for the given filter inputs
pub fn render(ctx: &DashboardContext, tab: &str, filters: &SalesFilter) -> RenderResult<TabView> {
    let spec = find_tab(tab).ok_or_else(|| RenderError::UnknownTab(tab.to_string()))?;
    let start = Instant::now();

    let rows = filters.apply(ctx.table.iter());
    let charts = spec
        .charts
        .iter()
        .map(|chart| render_chart(chart, &rows, &ctx.geo))
        .collect();

    tracing::debug!(
        tab = spec.id,
        rows = rows.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Rendered tab"
    );

    Ok(TabView {
        tab: spec.id.to_string(),
        label: spec.label,
        row_count: rows.len(),
        total: sum(&rows, Measure::Total),
        charts,
    })
}

/// Aggregate filtered rows into a single chart
pub fn render_chart(spec: &ChartSpec, rows: &[&SalesRecord], geo: &GeoReference) -> ChartView {
    let data = match spec.kind {
        ChartKind::Pie { names, values } => {
            let groups = group_by(rows, &[names], values, AggregationFunc::Sum);
            ChartData::Pie {
                labels: labels(&groups),
                values: values_of(&groups),
            }
        }
        ChartKind::Bar {
            key,
            measure,
            agg,
            ranking,
            range_slider,
        } => {
            let mut groups = group_by(rows, &[key], measure, agg);
            if let Ranking::TopN(n) = ranking {
                groups = top_n(groups, n);
            }
            ChartData::Bar {
                x_label: key.label(),
                y_label: measure.label(),
                x: labels(&groups),
                y: values_of(&groups),
                range_slider,
            }
        }
        ChartKind::Scatter(source) => scatter(source, rows),
        ChartKind::Hierarchy {
            style,
            path,
            values,
        } => hierarchy(style, path, values, rows),
        ChartKind::Choropleth { key, measure } => {
            let groups = group_by(rows, &[key], measure, AggregationFunc::Sum);
            let locations = labels(&groups);
            let unmatched = locations
                .iter()
                .filter(|code| !geo.contains(code))
                .cloned()
                .collect();
            ChartData::Choropleth {
                z_label: measure.label(),
                feature_id_key: geo.feature_id_key().to_string(),
                locations,
                values: values_of(&groups),
                unmatched,
            }
        }
        ChartKind::Box { key, field } => ChartData::Box {
            x_label: key.label(),
            y_label: field.label(),
            boxes: partition(rows, &[key], field)
                .into_iter()
                .filter_map(|(keys, part)| summarize(keys[0].to_string(), &part.values))
                .collect(),
        },
        ChartKind::Histogram { key } => {
            let groups = count_by(rows, key);
            ChartData::Histogram {
                x_label: key.label(),
                x: labels(&groups),
                counts: groups.iter().map(|g| g.rows).collect(),
            }
        }
        ChartKind::Line {
            bucket,
            measure,
            split,
            range_slider,
        } => line(bucket, measure, split, range_slider, rows),
    };

    ChartView {
        title: spec.title,
        width: spec.width,
        height: spec.height,
        data,
        style: ChartStyle::default(),
    }
}

fn labels(groups: &[Group]) -> Vec<String> {
    groups.iter().map(Group::label).collect()
}

fn values_of(groups: &[Group]) -> Vec<f64> {
    groups.iter().map(|g| g.value).collect()
}

fn scatter(source: ScatterSource, rows: &[&SalesRecord]) -> ChartData {
    match source {
        ScatterSource::Rows {
            x,
            y,
            size,
            color,
            hover,
        } => {
            // Color group (None when uncolored) → series
            let mut series: BTreeMap<Option<KeyValue>, ScatterSeries> = BTreeMap::new();

            for record in rows {
                let x_value = match x {
                    ScatterAxis::Measure(m) => m.value_of(record).map(Coord::Number),
                    ScatterAxis::Key(k) => k.value_of(record).map(|v| Coord::Text(v.to_string())),
                };
                let (Some(x_value), Some(y_value)) = (x_value, y.value_of(record)) else {
                    continue;
                };
                let size_value = match size {
                    Some(m) => match m.value_of(record) {
                        Some(v) => Some(v),
                        None => continue,
                    },
                    None => None,
                };
                let color_value = match color {
                    Some(k) => match k.value_of(record) {
                        Some(v) => Some(v),
                        None => continue,
                    },
                    None => None,
                };

                let entry = series.entry(color_value.clone()).or_insert_with(|| {
                    ScatterSeries::new(color_value.map(|v| v.to_string()), size.is_some())
                });
                entry.x.push(x_value);
                entry.y.push(y_value);
                if let (Some(sizes), Some(v)) = (entry.size.as_mut(), size_value) {
                    sizes.push(v);
                }
                entry.text.push(
                    hover
                        .and_then(|k| k.value_of(record))
                        .map(|v| v.to_string())
                        .unwrap_or_default(),
                );
            }

            ChartData::Scatter {
                x_label: x.label(),
                y_label: y.label(),
                series: series.into_values().collect(),
            }
        }
        ScatterSource::Grouped { by, x, y } => {
            let xs = group_by(rows, &[by], x, AggregationFunc::Sum);
            let ys = group_by(rows, &[by], y, AggregationFunc::Sum);

            let mut points = ScatterSeries::new(None, false);
            // SUM keeps every partition, so both groupings share keys and order
            for (gx, gy) in xs.iter().zip(ys.iter()) {
                points.x.push(Coord::Number(gx.value));
                points.y.push(gy.value);
                points.text.push(gx.label());
            }

            ChartData::Scatter {
                x_label: x.label(),
                y_label: y.label(),
                series: vec![points],
            }
        }
    }
}

/// Flatten a path grouping into ids/parents with parent values summing their children
fn hierarchy(
    style: HierarchyStyle,
    path: &[GroupKey],
    measure: Measure,
    rows: &[&SalesRecord],
) -> ChartData {
    let mut nodes: BTreeMap<Vec<String>, f64> = BTreeMap::new();

    for leaf in group_by(rows, path, measure, AggregationFunc::Sum) {
        let names: Vec<String> = leaf.keys.iter().map(KeyValue::to_string).collect();
        for depth in 1..=names.len() {
            *nodes.entry(names[..depth].to_vec()).or_default() += leaf.value;
        }
    }

    let mut ids = Vec::with_capacity(nodes.len());
    let mut labels = Vec::with_capacity(nodes.len());
    let mut parents = Vec::with_capacity(nodes.len());
    let mut values = Vec::with_capacity(nodes.len());

    for (names, value) in nodes {
        ids.push(node_id(&names));
        parents.push(node_id(&names[..names.len() - 1]));
        labels.push(names.last().cloned().unwrap_or_default());
        values.push(value);
    }

    ChartData::Hierarchy {
        style,
        ids,
        labels,
        parents,
        values,
    }
}

/// `/`-joined path; `\` and `/` inside a name are backslash-escaped
fn node_id(names: &[String]) -> String {
    names
        .iter()
        .map(|name| name.replace('\\', "\\\\").replace('/', "\\/"))
        .collect::<Vec<_>>()
        .join("/")
}

fn line(
    bucket: TimeBucket,
    measure: Measure,
    split: Option<GroupKey>,
    range_slider: bool,
    rows: &[&SalesRecord],
) -> ChartData {
    let mut keys = vec![bucket.key()];
    keys.extend(split);

    let mut series: BTreeMap<Option<KeyValue>, LineSeries> = BTreeMap::new();
    for group in group_by(rows, &keys, measure, AggregationFunc::Sum) {
        let name = group.keys.get(1).cloned();
        let line = series.entry(name.clone()).or_insert_with(|| LineSeries {
            name: name.map(|v| v.to_string()),
            x: Vec::new(),
            y: Vec::new(),
        });
        line.x.push(group.label());
        line.y.push(group.value);
    }

    ChartData::Line {
        x_label: bucket.key().label(),
        y_label: measure.label(),
        series: series.into_values().collect(),
        range_slider,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::tabs::TABS;
    use crate::dataset::SalesTable;
    use crate::query::SELECT_ALL;
    use chrono::NaiveDate;

    const GEO: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"sigla": "SP"}, "geometry": null},
            {"type": "Feature", "properties": {"sigla": "RJ"}, "geometry": null}
        ]
    }"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(region: &str, brand: &str, total: f64, on: NaiveDate) -> SalesRecord {
        SalesRecord::default()
            .region(region)
            .brand(brand)
            .total(total)
            .purchased_on(on)
    }

    fn full(record: SalesRecord, n: usize) -> SalesRecord {
        let sellers = ["Ana", "Bruno", "Carla", "Diego"];
        let states = [("SP", "São Paulo"), ("RJ", "Niterói"), ("MG", "Belo Horizonte")];
        let (state, city) = states[n % states.len()];
        record
            .product(format!("P{}", n % 5), format!("Product {}", n % 5))
            .quantity((n % 4 + 1) as f64)
            .net_profit(n as f64 * 1.5 - 10.0)
            .prices(10.0 + n as f64, 12.0 + n as f64)
            .location(state, city)
            .salesperson(sellers[n % sellers.len()])
            .gender(if n % 2 == 0 { "Masculino" } else { "Femenino" })
            .condition(if n % 3 == 0 { "Usado" } else { "Nuevo" })
    }

    fn context(records: Vec<SalesRecord>) -> DashboardContext {
        let geo = GeoReference::from_str(GEO, "properties.sigla").unwrap();
        DashboardContext::new(records.into_iter().collect::<SalesTable>(), geo)
    }

    fn rich_context() -> DashboardContext {
        let regions = ["Norte", "Sul", "Sudeste"];
        let brands = ["Nike", "Adidas", "Puma", "Olympikus"];
        let records = (0..40)
            .map(|n| {
                full(
                    sale(
                        regions[n % regions.len()],
                        brands[n % brands.len()],
                        100.0 + n as f64 * 7.0,
                        date(2024, 1 + (n % 3) as u32, 1 + (n % 28) as u32),
                    ),
                    n,
                )
            })
            .collect();
        context(records)
    }

    fn abc_context() -> DashboardContext {
        context(vec![
            sale("A", "Nike", 100.0, date(2024, 1, 10)),
            sale("B", "Adidas", 200.0, date(2024, 1, 20)),
            sale("C", "Puma", 300.0, date(2024, 2, 5)),
        ])
    }

    fn bar(view: &ChartView) -> (&[String], &[f64]) {
        match &view.data {
            ChartData::Bar { x, y, .. } => (x, y),
            other => panic!("expected bar, got {:?}", other),
        }
    }

    fn region_filter(regions: &[&str]) -> SalesFilter {
        SalesFilter::builder().regions(regions).build()
    }

    #[test]
    fn test_unknown_tab() {
        let ctx = abc_context();
        let err = render(&ctx, "tab-42", &SalesFilter::default()).unwrap_err();
        assert_eq!(err, RenderError::UnknownTab("tab-42".to_string()));
    }

    #[test]
    fn test_every_tab_renders_its_charts() {
        let ctx = rich_context();
        for tab in &TABS {
            let view = render(&ctx, tab.id, &SalesFilter::default()).unwrap();
            assert_eq!(view.tab, tab.id);
            assert_eq!(view.label, tab.label);
            assert_eq!(view.charts.len(), tab.charts.len());
            assert_eq!(view.row_count, 40);

            for (chart, spec) in view.charts.iter().zip(tab.charts) {
                assert_eq!(chart.title, spec.title);
                assert_eq!(chart.width, spec.width);
                assert_eq!(chart.style, ChartStyle::default());
            }
        }
    }

    #[test]
    fn test_selecting_region_b_totals_200() {
        let ctx = abc_context();
        let view = render(&ctx, "tab-1", &region_filter(&["B"])).unwrap();

        assert_eq!(view.row_count, 1);
        assert_eq!(view.total, 200.0);

        let (x, y) = bar(&view.charts[1]);
        assert_eq!(x, ["B"]);
        assert_eq!(y, [200.0]);
    }

    #[test]
    fn test_empty_or_all_region_selection_is_noop() {
        let ctx = abc_context();
        let baseline = render(&ctx, "tab-1", &SalesFilter::default()).unwrap();

        for filter in [region_filter(&[]), region_filter(&[SELECT_ALL, "A"])] {
            let view = render(&ctx, "tab-1", &filter).unwrap();
            assert_eq!(view, baseline);
        }
        assert_eq!(baseline.total, 600.0);
    }

    #[test]
    fn test_brand_sentinel_short_circuits_names() {
        let ctx = abc_context();
        let filter = SalesFilter::builder()
            .brands(&["Nike", SELECT_ALL, "Puma"])
            .build();
        let view = render(&ctx, "tab-1", &filter).unwrap();

        // Not filtered to the literal "ALL" (which would be empty) nor to Nike/Puma
        assert_eq!(view.row_count, 3);
        assert_eq!(view.total, 600.0);
    }

    #[test]
    fn test_date_range_scenario() {
        let ctx = context(vec![
            sale("A", "Nike", 10.0, date(2024, 1, 31)),
            sale("A", "Nike", 20.0, date(2024, 2, 1)),
            sale("A", "Nike", 40.0, date(2024, 1, 1)),
        ]);
        let filter = SalesFilter::builder()
            .between(date(2024, 1, 1), date(2024, 1, 31))
            .build();
        let view = render(&ctx, "tab-4", &filter).unwrap();

        assert_eq!(view.row_count, 2);
        assert_eq!(view.total, 50.0);

        let (months, totals) = bar(&view.charts[1]);
        assert_eq!(months, ["2024-01"]);
        assert_eq!(totals, [50.0]);
    }

    #[test]
    fn test_filter_is_subset_and_idempotent() {
        let ctx = rich_context();
        let filter = SalesFilter::builder()
            .regions(&["Norte", "Sul"])
            .brands(&["Nike", "Puma"])
            .between(date(2024, 1, 5), date(2024, 2, 20))
            .build();

        let once = filter.apply(ctx.table.iter());
        assert!(once.len() < ctx.table.len());
        assert!(once
            .iter()
            .all(|r| ctx.table.iter().any(|t| std::ptr::eq(t, *r))));

        let twice = filter.apply(once.iter().copied());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_breakdowns_conserve_filtered_total() {
        let ctx = rich_context();
        let filter = region_filter(&["Sul", "Sudeste"]);
        let close = |a: f64, b: f64| (a - b).abs() < 1e-6;

        for tab in &TABS {
            let view = render(&ctx, tab.id, &filter).unwrap();
            for (chart, spec) in view.charts.iter().zip(tab.charts) {
                let summed = match (&chart.data, spec.kind) {
                    (ChartData::Pie { values, .. }, _) => values.iter().sum::<f64>(),
                    (
                        ChartData::Bar { y, .. },
                        ChartKind::Bar {
                            measure: Measure::Total,
                            ranking: Ranking::All,
                            ..
                        },
                    ) => y.iter().sum(),
                    (ChartData::Choropleth { values, .. }, _) => values.iter().sum(),
                    (ChartData::Line { series, .. }, _) => {
                        series.iter().flat_map(|s| s.y.iter()).sum()
                    }
                    (ChartData::Hierarchy { parents, values, .. }, _) => parents
                        .iter()
                        .zip(values)
                        .filter(|(p, _)| p.is_empty())
                        .map(|(_, v)| v)
                        .sum(),
                    _ => continue,
                };
                assert!(
                    close(summed, view.total),
                    "{} / {}: {} != {}",
                    tab.id,
                    chart.title,
                    summed,
                    view.total
                );
            }
        }
    }

    #[test]
    fn test_top_ten_sorted_and_truncated() {
        let records = (0..15)
            .map(|n| {
                sale("Norte", "Nike", 10.0 * (n + 1) as f64, date(2024, 1, 1))
                    .location("SP", format!("City {:02}", n))
            })
            .collect();
        let ctx = context(records);
        let view = render(&ctx, "tab-3", &SalesFilter::default()).unwrap();

        let (cities, totals) = bar(&view.charts[1]);
        assert_eq!(cities.len(), 10);
        assert_eq!(cities[0], "City 14");
        assert!(totals.windows(2).all(|w| w[0] >= w[1]));

        // Fewer categories than the cutoff
        let small = context(vec![
            sale("Sul", "Nike", 30.0, date(2024, 1, 1)).salesperson("Ana"),
            sale("Sul", "Nike", 50.0, date(2024, 1, 2)).salesperson("Bruno"),
            sale("Sul", "Puma", 20.0, date(2024, 1, 3)).salesperson("Carla"),
            sale("Sul", "Puma", 15.0, date(2024, 1, 4)).salesperson("Ana"),
        ]);
        let view = render(&small, "tab-5", &SalesFilter::default()).unwrap();
        let (people, totals) = bar(&view.charts[0]);
        assert_eq!(people, &["Bruno", "Ana", "Carla"]);
        assert_eq!(totals, &[50.0, 45.0, 20.0]);
    }

    #[test]
    fn test_sunburst_hierarchy() {
        let ctx = context(vec![
            sale("Sul", "Nike", 10.0, date(2024, 1, 1)).product("1", "Boné"),
            sale("Sul", "Nike", 5.0, date(2024, 1, 1)).product("2", "Meia"),
            sale("Sul", "Puma", 7.0, date(2024, 1, 1)).product("3", "Boné"),
        ]);
        let view = render(&ctx, "tab-1", &SalesFilter::default()).unwrap();
        let sunburst = &view.charts[3];
        assert_eq!(sunburst.height, Some(1000));

        match &sunburst.data {
            ChartData::Hierarchy {
                style,
                ids,
                parents,
                values,
                labels,
            } => {
                assert_eq!(*style, HierarchyStyle::Sunburst);
                assert_eq!(
                    ids,
                    &[
                        "Sul",
                        "Sul/Nike",
                        "Sul/Nike/Boné",
                        "Sul/Nike/Meia",
                        "Sul/Puma",
                        "Sul/Puma/Boné"
                    ]
                );
                assert_eq!(parents[0], "");
                assert_eq!(parents[2], "Sul/Nike");
                assert_eq!(labels[5], "Boné");
                assert_eq!(values, &[22.0, 15.0, 10.0, 5.0, 7.0, 7.0]);
            }
            other => panic!("expected hierarchy, got {:?}", other),
        }
    }

    #[test]
    fn test_hierarchy_ids_unique_with_slashes_in_names() {
        let ctx = context(vec![
            sale("Sul", "Nike/Kids", 10.0, date(2024, 1, 1)).product("1", "Boné"),
            sale("Sul", "Nike", 5.0, date(2024, 1, 1)).product("2", "Kids/Boné"),
        ]);
        let view = render(&ctx, "tab-1", &SalesFilter::default()).unwrap();

        match &view.charts[3].data {
            ChartData::Hierarchy { ids, parents, labels, .. } => {
                let unique: std::collections::BTreeSet<&String> = ids.iter().collect();
                assert_eq!(unique.len(), ids.len());
                assert_eq!(
                    ids,
                    &[
                        "Sul",
                        "Sul/Nike",
                        "Sul/Nike/Kids\\/Boné",
                        "Sul/Nike\\/Kids",
                        "Sul/Nike\\/Kids/Boné"
                    ]
                );
                assert_eq!(parents[2], "Sul/Nike");
                assert_eq!(parents[4], "Sul/Nike\\/Kids");
                assert_eq!(labels[2], "Kids/Boné");
                assert!(parents.iter().all(|p| p.is_empty() || ids.contains(p)));
            }
            other => panic!("expected hierarchy, got {:?}", other),
        }
    }

    #[test]
    fn test_choropleth_flags_unmatched_states() {
        let ctx = rich_context();
        let view = render(&ctx, "tab-3", &SalesFilter::default()).unwrap();

        match &view.charts[0].data {
            ChartData::Choropleth {
                locations,
                unmatched,
                feature_id_key,
                ..
            } => {
                assert_eq!(locations, &["MG", "RJ", "SP"]);
                assert_eq!(unmatched, &["MG"]);
                assert_eq!(feature_id_key, "properties.sigla");
            }
            other => panic!("expected choropleth, got {:?}", other),
        }
    }

    #[test]
    fn test_weekday_boxes_in_calendar_order() {
        // 2024-01-01 is a Monday
        let ctx = context(vec![
            sale("A", "Nike", 5.0, date(2024, 1, 7)),
            sale("A", "Nike", 1.0, date(2024, 1, 1)),
            sale("A", "Nike", 3.0, date(2024, 1, 3)),
            sale("A", "Nike", 9.0, date(2024, 1, 8)),
        ]);
        let view = render(&ctx, "tab-4", &SalesFilter::default()).unwrap();

        match &view.charts[2].data {
            ChartData::Box { boxes, .. } => {
                let names: Vec<&str> = boxes.iter().map(|b| b.name.as_str()).collect();
                assert_eq!(names, vec!["Monday", "Wednesday", "Sunday"]);
                assert_eq!(boxes[0].count, 2);
                assert_eq!(boxes[0].median, 5.0);
            }
            other => panic!("expected box, got {:?}", other),
        }
    }

    #[test]
    fn test_row_scatter_skips_incomplete_rows() {
        let ctx = context(vec![
            sale("A", "Nike", 10.0, date(2024, 1, 1))
                .prices(5.0, 6.0)
                .quantity(2.0)
                .product("1", "Boné"),
            // No unit price
            sale("A", "Nike", 10.0, date(2024, 1, 1)).quantity(2.0),
            sale("A", "Puma", 30.0, date(2024, 1, 1))
                .prices(7.0, 8.0)
                .quantity(1.0),
        ]);
        let view = render(&ctx, "tab-1", &SalesFilter::default()).unwrap();

        match &view.charts[2].data {
            ChartData::Scatter { series, x_label, .. } => {
                assert_eq!(*x_label, "Unit Price");
                assert_eq!(series.len(), 2);
                assert_eq!(series[0].name.as_deref(), Some("Nike"));
                assert_eq!(series[0].len(), 1);
                assert_eq!(series[0].size, Some(vec![10.0]));
                assert_eq!(series[0].text, vec!["Boné"]);
                assert_eq!(series[1].text, vec![""]);
            }
            other => panic!("expected scatter, got {:?}", other),
        }
    }

    #[test]
    fn test_grouped_scatter_per_salesperson() {
        let ctx = context(vec![
            sale("A", "Nike", 10.0, date(2024, 1, 1))
                .salesperson("Ana")
                .quantity(2.0),
            sale("A", "Nike", 15.0, date(2024, 1, 1))
                .salesperson("Ana")
                .quantity(1.0),
            sale("A", "Nike", 4.0, date(2024, 1, 1)).salesperson("Bruno"),
        ]);
        let view = render(&ctx, "tab-5", &SalesFilter::default()).unwrap();

        match &view.charts[1].data {
            ChartData::Scatter { series, .. } => {
                let points = &series[0];
                assert_eq!(points.text, vec!["Ana", "Bruno"]);
                assert_eq!(points.x, vec![Coord::Number(3.0), Coord::Number(0.0)]);
                assert_eq!(points.y, vec![25.0, 4.0]);
            }
            other => panic!("expected scatter, got {:?}", other),
        }
    }

    #[test]
    fn test_line_split_by_gender() {
        let ctx = context(vec![
            sale("A", "Nike", 10.0, date(2024, 1, 2)).gender("Masculino"),
            sale("A", "Nike", 5.0, date(2024, 1, 1)).gender("Femenino"),
            sale("A", "Nike", 7.0, date(2024, 1, 1)).gender("Masculino"),
            sale("A", "Nike", 1.0, date(2024, 1, 1)),
        ]);
        let view = render(&ctx, "tab-6", &SalesFilter::default()).unwrap();

        match &view.charts[0].data {
            ChartData::Line {
                series,
                range_slider,
                ..
            } => {
                assert!(*range_slider);
                assert_eq!(series.len(), 2);
                assert_eq!(series[0].name.as_deref(), Some("Femenino"));
                assert_eq!(series[1].x, vec!["2024-01-01", "2024-01-02"]);
                assert_eq!(series[1].y, vec![7.0, 10.0]);
            }
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn test_histogram_counts_rows() {
        let ctx = abc_context();
        let filter = region_filter(&["A", "C"]);
        let view = render(&ctx, "tab-7", &filter).unwrap();

        match &view.charts[0].data {
            ChartData::Histogram { x, counts, .. } => {
                assert_eq!(x, &["A", "C"]);
                assert_eq!(counts, &[1, 1]);
            }
            other => panic!("expected histogram, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_filter_result_renders_empty_charts() {
        let ctx = abc_context();
        let view = render(&ctx, "tab-2", &region_filter(&["Z"])).unwrap();
        assert_eq!(view.row_count, 0);
        assert_eq!(view.total, 0.0);
        assert_eq!(view.charts.len(), 3);
    }
}

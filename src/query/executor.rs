//! Query Executor
//!
//! Runs aggregations over a filtered slice of sales records:
//! 1. Partition rows by one or more group keys (rows missing a key are skipped)
//! 2. Collect the measure per partition (missing values are skipped)
//! 3. Collapse each partition with an aggregation function
//!
//! # Execution Pipeline
//!
//! ```text
//! SalesTable → SalesFilter::apply → partition → aggregate → [top_n] → Vec<Group>
//! ```
//!
//! Groups come back sorted by key ascending; `top_n` re-sorts by value.

use crate::dataset::SalesRecord;
use crate::query::ast::{AggregationFunc, GroupKey, KeyValue, Measure};
use std::collections::{BTreeMap, HashSet};

/// One aggregated group
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Key values, one per grouping dimension
    pub keys: Vec<KeyValue>,
    /// Aggregated measure
    pub value: f64,
    /// Rows that fell into this group
    pub rows: usize,
}

impl Group {
    /// The outermost key
    pub fn key(&self) -> &KeyValue {
        &self.keys[0]
    }

    /// Display label of the outermost key
    pub fn label(&self) -> String {
        self.key().to_string()
    }
}

/// Measure values of one partition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub values: Vec<f64>,
    pub rows: usize,
}

/// Split records by the given keys, collecting the measure per partition
///
/// Partitions are ordered by key ascending.
pub fn partition(
    records: &[&SalesRecord],
    keys: &[GroupKey],
    measure: Measure,
) -> BTreeMap<Vec<KeyValue>, Partition> {
    let mut parts: BTreeMap<Vec<KeyValue>, Partition> = BTreeMap::new();

    for record in records {
        let Some(key) = keys
            .iter()
            .map(|k| k.value_of(record))
            .collect::<Option<Vec<_>>>()
        else {
            continue;
        };

        let part = parts.entry(key).or_default();
        part.rows += 1;
        if let Some(v) = measure.value_of(record) {
            part.values.push(v);
        }
    }

    parts
}

/// Group records and aggregate a measure per group
///
/// Groups whose aggregation has no value (e.g. AVG over only missing
/// values) are dropped. SUM and COUNT of such groups are 0.
pub fn group_by(
    records: &[&SalesRecord],
    keys: &[GroupKey],
    measure: Measure,
    func: AggregationFunc,
) -> Vec<Group> {
    partition(records, keys, measure)
        .into_iter()
        .filter_map(|(keys, part)| {
            func.apply(&part.values).map(|value| Group {
                keys,
                value,
                rows: part.rows,
            })
        })
        .collect()
}

/// Count rows per key, regardless of any measure
pub fn count_by(records: &[&SalesRecord], key: GroupKey) -> Vec<Group> {
    let mut counts: BTreeMap<KeyValue, usize> = BTreeMap::new();
    for record in records {
        if let Some(k) = key.value_of(record) {
            *counts.entry(k).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(k, rows)| Group {
            keys: vec![k],
            value: rows as f64,
            rows,
        })
        .collect()
}

/// Keep the `n` largest groups, descending by value, ties by key ascending
pub fn top_n(mut groups: Vec<Group>, n: usize) -> Vec<Group> {
    groups.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.keys.cmp(&b.keys)));
    groups.truncate(n);
    groups
}

/// Sum of a measure over records, skipping missing values
pub fn sum(records: &[&SalesRecord], measure: Measure) -> f64 {
    records.iter().filter_map(|r| measure.value_of(r)).sum()
}

/// Number of distinct non-missing values of a key
pub fn distinct_count(records: &[&SalesRecord], key: GroupKey) -> usize {
    records
        .iter()
        .filter_map(|r| key.value_of(r))
        .collect::<HashSet<_>>()
        .len()
}

/// Distinct non-missing values of a key, in first-appearance order
pub fn distinct_values<'a, I>(records: I, key: GroupKey) -> Vec<String>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter_map(|r| key.value_of(r))
        .filter(|k| seen.insert(k.clone()))
        .map(|k| k.to_string())
        .collect()
}

//! Pure views over a loaded [`Dataset`]. None of them mutate the dataset
//! and none of them can fail once the dataset is loaded.

use crate::domain::model::{Dataset, GroupKey, Lookup, Metric, Record, Total};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// 由大到小；NaN 一律排在最後
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.total_cmp(&a),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}

/// 依指標由大到小排序；`sort_by` 是穩定排序，同值保留原始順序
fn sort_descending(records: &mut [Record], metric: Metric) {
    records.sort_by(|a, b| descending(a.metric(metric), b.metric(metric)));
}

/// The `n` records with the largest `metric`, descending. `n` larger than
/// the dataset returns every record.
pub fn top_n(dataset: &Dataset, n: usize, metric: Metric) -> Vec<Record> {
    let mut records = dataset.records().to_vec();
    sort_descending(&mut records, metric);
    records.truncate(n);
    records
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotals {
    pub group: String,
    pub rows: usize,
    pub totals: BTreeMap<Metric, Total>,
}

impl GroupTotals {
    pub fn total(&self, metric: Metric) -> Lookup<Total> {
        self.totals.get(&metric).copied().into()
    }
}

/// Per-group sums, one entry per group value present in the dataset, in
/// order of first occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedView {
    pub key: GroupKey,
    pub metrics: Vec<Metric>,
    pub groups: Vec<GroupTotals>,
}

impl GroupedView {
    pub fn get(&self, group: &str) -> Option<&GroupTotals> {
        self.groups.iter().find(|g| g.group == group)
    }

    /// `Unavailable` when the group has no rows or the metric was not summed.
    pub fn lookup(&self, group: &str, metric: Metric) -> Lookup<Total> {
        match self.get(group) {
            Some(totals) => totals.total(metric),
            None => Lookup::Unavailable,
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

pub fn group_totals(dataset: &Dataset, key: GroupKey, metrics: &[Metric]) -> GroupedView {
    let mut groups: Vec<GroupTotals> = Vec::new();

    for record in dataset.records() {
        let value = record.group_value(key);
        let index = match groups.iter().position(|g| g.group == value) {
            Some(index) => index,
            None => {
                groups.push(GroupTotals {
                    group: value.to_string(),
                    rows: 0,
                    totals: metrics.iter().map(|m| (*m, Total::zero(*m))).collect(),
                });
                groups.len() - 1
            }
        };

        let entry = &mut groups[index];
        entry.rows += 1;
        for metric in metrics {
            let sum = entry
                .totals
                .entry(*metric)
                .or_insert_with(|| Total::zero(*metric));
            *sum = sum.add(record, *metric);
        }
    }

    GroupedView {
        key,
        metrics: metrics.to_vec(),
        groups,
    }
}

/// Case-insensitive literal matcher over `Domain` for one or more brand
/// patterns. An empty pattern matches every domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandMatcher {
    patterns: Vec<String>,
    lowered: Vec<String>,
}

impl BrandMatcher {
    pub fn new<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let patterns: Vec<String> = patterns
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect();
        let lowered = patterns.iter().map(|p| p.to_lowercase()).collect();
        Self { patterns, lowered }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_match(&self, domain: &str) -> bool {
        let domain = domain.to_lowercase();
        self.lowered.iter().any(|p| domain.contains(p.as_str()))
    }

    pub fn filter(&self, dataset: &Dataset) -> Vec<Record> {
        dataset
            .records()
            .iter()
            .filter(|r| self.is_match(&r.domain))
            .cloned()
            .collect()
    }
}

/// Rows whose `Domain` contains `pattern`, ignoring case.
pub fn brand_filter(dataset: &Dataset, pattern: &str) -> Vec<Record> {
    BrandMatcher::new([pattern]).filter(dataset)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl CategoryFilter {
    pub fn only<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CategoryFilter::Only(categories.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(allowed) => allowed.contains(category),
        }
    }
}

/// Rows allowed by `filter`, sorted descending by `metric`.
pub fn filter_sort(dataset: &Dataset, filter: &CategoryFilter, metric: Metric) -> Vec<Record> {
    let mut records: Vec<Record> = dataset
        .records()
        .iter()
        .filter(|r| filter.allows(&r.category))
        .cloned()
        .collect();
    sort_descending(&mut records, metric);
    records
}

// src/aggregate.rs
//! Categorical frequency aggregation with top-N truncation.
//!
//! Counts one field at a time, sorts descending by count with ties kept in
//! first-encountered order, and truncates to the requested N. An empty
//! record set or an absent field yields an empty result — a valid state the
//! rendering collaborator detects and handles, never an error here.

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::process::EnrichedRecord;

/// Default truncation used when the caller does not ask for a specific N.
pub const DEFAULT_TOP_N: usize = 10;

/// Rendering hint carried through to the excluded plotting collaborator.
/// The aggregation itself never consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    RankedBar,
    ProportionalShare,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Ordered `(value, count)` distribution for exactly one categorical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub field: String,
    pub top_n: usize,
    pub chart: ChartKind,
    pub entries: Vec<CategoryCount>,
}

impl AggregationResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total count across the retained entries (≤ record count).
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "aggregate_requests_total",
            "Categorical aggregations computed."
        );
    });
}

/// Count occurrences of each distinct value of `field`, recomputed from
/// scratch on every call (no incremental state).
pub fn aggregate(
    records: &[EnrichedRecord],
    field: &str,
    top_n: usize,
    chart: ChartKind,
) -> AggregationResult {
    ensure_metrics_described();
    counter!("aggregate_requests_total").increment(1);

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for rec in records {
        let Some(value) = rec.field_value(field) else {
            // records without the field simply don't contribute
            continue;
        };
        match counts.get_mut(&value) {
            Some(c) => *c += 1,
            None => {
                counts.insert(value.clone(), 1);
                first_seen.push(value);
            }
        }
    }

    let mut entries: Vec<CategoryCount> = first_seen
        .into_iter()
        .map(|value| {
            let count = counts[&value];
            CategoryCount { value, count }
        })
        .collect();
    // stable sort: ties keep first-encountered order for determinism
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(top_n);

    AggregationResult {
        field: field.to_string(),
        top_n,
        chart,
        entries,
    }
}

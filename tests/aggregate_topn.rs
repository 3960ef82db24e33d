// tests/aggregate_topn.rs
use serde_json::json;
use tweet_sentiment_analyzer::{
    aggregate, ChartKind, DatasetProcessor, EnrichedRecord, RawRecord, DEFAULT_TOP_N,
};

fn enriched(langs_and_contents: &[(&str, &str)]) -> Vec<EnrichedRecord> {
    let raw: Vec<RawRecord> = langs_and_contents
        .iter()
        .map(|(lang, content)| {
            json!({"content": content, "lang": lang})
                .as_object()
                .unwrap()
                .clone()
        })
        .collect();
    DatasetProcessor::new().process(&raw).unwrap()
}

#[test]
fn language_distribution_reference_fixture() {
    let recs = enriched(&[("en", "a"), ("en", "b"), ("es", "c"), ("unknown", "d")]);
    let out = aggregate(&recs, "language", 2, ChartKind::RankedBar);
    let pairs: Vec<(&str, usize)> = out
        .entries
        .iter()
        .map(|e| (e.value.as_str(), e.count))
        .collect();
    // descending order; "unknown" excluded by the top-2 cutoff
    assert_eq!(pairs, vec![("en", 2), ("es", 1)]);
}

#[test]
fn empty_record_set_returns_empty_result() {
    let out = aggregate(&[], "language", DEFAULT_TOP_N, ChartKind::ProportionalShare);
    assert!(out.is_empty());
    assert_eq!(out.field, "language");
}

#[test]
fn sentiment_label_distribution() {
    let recs = enriched(&[
        ("en", "i love this"),
        ("en", "i hate this"),
        ("en", "i love that"),
        ("en", "whatever"),
    ]);
    let out = aggregate(&recs, "sentiment_label", DEFAULT_TOP_N, ChartKind::RankedBar);
    assert_eq!(out.entries[0].value, "positive");
    assert_eq!(out.entries[0].count, 2);
    let total: usize = out.entries.iter().map(|e| e.count).sum();
    assert_eq!(total, recs.len());
}

#[test]
fn counts_are_sorted_descending() {
    let recs = enriched(&[
        ("pt", "a"),
        ("en", "b"),
        ("en", "c"),
        ("en", "d"),
        ("es", "e"),
        ("es", "f"),
    ]);
    let out = aggregate(&recs, "language", DEFAULT_TOP_N, ChartKind::RankedBar);
    let counts: Vec<usize> = out.entries.iter().map(|e| e.count).collect();
    let mut sorted = counts.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(counts, sorted);
    assert!(out.entries.len() <= DEFAULT_TOP_N.min(3));
}

#[test]
fn length_bounded_by_distinct_values_and_top_n() {
    let recs = enriched(&[("en", "a"), ("es", "b")]);
    let big_n = aggregate(&recs, "language", 50, ChartKind::RankedBar);
    assert_eq!(big_n.entries.len(), 2);
    let small_n = aggregate(&recs, "language", 1, ChartKind::RankedBar);
    assert_eq!(small_n.entries.len(), 1);
}

// src/process.rs
//! Batch dataset processing: schema validation up front, then per record
//! normalize → score → classify → resolve language. Output order mirrors
//! input order; the caller's records are never mutated.

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::{classify, SentimentLabel};
use crate::error::PipelineError;
use crate::normalize;
use crate::sentiment::{LexiconScorer, PolarityScorer};

pub const CONTENT_FIELD: &str = "content";
pub const LANG_FIELD: &str = "lang";
pub const LANGUAGE_FIELD: &str = "language";
/// Sentinel used when a record carries no language column.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// One input row: a JSON object with at least a `content` key. Extra
/// columns pass through untouched.
pub type RawRecord = serde_json::Map<String, Value>;

/// Terminal artifact of the pipeline: the record plus every derived field.
/// Passthrough columns are flattened back into the serialized object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub content: String,
    pub cleaned_content: String,
    pub language: String,
    pub sent_pos: f64,
    pub sent_neu: f64,
    pub sent_neg: f64,
    pub sent_compound: f64,
    pub sentiment_label: SentimentLabel,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl EnrichedRecord {
    /// Categorical value of `field` for aggregation. Known pipeline columns
    /// resolve directly; anything else is looked up among the passthrough
    /// columns. Non-scalar and missing values yield `None`.
    pub fn field_value(&self, field: &str) -> Option<String> {
        match field {
            CONTENT_FIELD => Some(self.content.clone()),
            "cleaned_content" => Some(self.cleaned_content.clone()),
            LANGUAGE_FIELD => Some(self.language.clone()),
            "sentiment_label" => Some(self.sentiment_label.as_str().to_string()),
            _ => self.extra.get(field).and_then(scalar_to_string),
        }
    }
}

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "process_batches_total",
            "Batches accepted by the dataset processor."
        );
        describe_counter!(
            "process_records_total",
            "Records enriched by the dataset processor."
        );
        describe_counter!(
            "process_empty_cleaned_total",
            "Records whose content normalized to the empty string."
        );
    });
}

/// Orchestrates normalizer → scorer → classifier over a record batch.
/// Holds the scorer behind the `PolarityScorer` seam so engines can be
/// swapped without touching the rest of the pipeline.
pub struct DatasetProcessor {
    scorer: Box<dyn PolarityScorer + Send + Sync>,
}

impl Default for DatasetProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetProcessor {
    /// Processor with the default lexicon engine.
    pub fn new() -> Self {
        Self::with_scorer(LexiconScorer::new())
    }

    pub fn with_scorer<S: PolarityScorer + Send + Sync + 'static>(scorer: S) -> Self {
        Self {
            scorer: Box::new(scorer),
        }
    }

    /// Single pass over the batch. The schema check runs over the whole
    /// batch first: an invalid record fails the batch before any row is
    /// enriched, so there is never partial output.
    pub fn process(&self, records: &[RawRecord]) -> Result<Vec<EnrichedRecord>, PipelineError> {
        ensure_metrics_described();
        validate_content_schema(records)?;

        let mut out = Vec::with_capacity(records.len());
        let mut empty_cleaned = 0u64;

        for rec in records {
            // Presence and scalar-ness were validated above.
            let content = rec
                .get(CONTENT_FIELD)
                .and_then(scalar_to_string)
                .expect("content validated");

            let cleaned = normalize::clean_text(&content);
            if cleaned.is_empty() {
                empty_cleaned += 1;
            }
            let score = self.scorer.score(&cleaned);
            let label = classify(score.compound);
            let language = resolve_language(rec);
            let extra = passthrough_fields(rec);

            out.push(EnrichedRecord {
                content,
                cleaned_content: cleaned,
                language,
                sent_pos: score.pos,
                sent_neu: score.neu,
                sent_neg: score.neg,
                sent_compound: score.compound,
                sentiment_label: label,
                extra,
            });
        }

        counter!("process_batches_total").increment(1);
        counter!("process_records_total").increment(out.len() as u64);
        counter!("process_empty_cleaned_total").increment(empty_cleaned);
        tracing::debug!(records = out.len(), empty_cleaned, "batch enriched");

        Ok(out)
    }
}

/// Fail-fast schema check for the whole batch: every record must carry a
/// non-null, text-coercible `content`.
fn validate_content_schema(records: &[RawRecord]) -> Result<(), PipelineError> {
    for (row, rec) in records.iter().enumerate() {
        match rec.get(CONTENT_FIELD) {
            None | Some(Value::Null) => return Err(PipelineError::Schema { row }),
            Some(Value::Array(_)) | Some(Value::Object(_)) => {
                return Err(PipelineError::MalformedRecord { row })
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Value-level coercion: strings pass through, numbers and booleans take
/// their natural textual form. Never the literal "nan".
fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `lang` wins over `language` (the original dataset uses `lang`); absent
/// or non-text values resolve to the sentinel.
fn resolve_language(rec: &RawRecord) -> String {
    for key in [LANG_FIELD, LANGUAGE_FIELD] {
        if let Some(Value::String(s)) = rec.get(key) {
            if !s.is_empty() {
                return s.clone();
            }
        }
    }
    UNKNOWN_LANGUAGE.to_string()
}

/// Columns that pass through unmodified: everything except `content` and
/// the language columns (which are resolved into `language`).
fn passthrough_fields(rec: &RawRecord) -> serde_json::Map<String, Value> {
    rec.iter()
        .filter(|(k, _)| !matches!(k.as_str(), CONTENT_FIELD | LANG_FIELD | LANGUAGE_FIELD))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

// src/api.rs
//! HTTP surface for the batch pipeline. The upload/rendering shell lives
//! elsewhere; this router only accepts record batches as JSON and hands
//! back enriched rows and aggregated distributions.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::aggregate::{aggregate, AggregationResult, ChartKind};
use crate::cache::{content_key, ResultCache};
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::process::{DatasetProcessor, EnrichedRecord, RawRecord};

#[derive(Clone)]
pub struct AppState {
    processor: Arc<DatasetProcessor>,
    cache: Arc<ResultCache>,
    default_top_n: usize,
}

pub fn create_router(config: &PipelineConfig) -> Router {
    let state = AppState {
        processor: Arc::new(DatasetProcessor::new()),
        cache: Arc::new(ResultCache::with_capacity(config.cache.capacity)),
        default_top_n: config.aggregation.default_top_n,
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/process", post(process_batch))
        .route("/aggregate", post(aggregate_field))
        .route("/debug/cache", get(debug_cache))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct ProcessResp {
    key: String,
    cached: bool,
    count: usize,
    processed_at: i64,
    records: Vec<EnrichedRecord>,
}

async fn process_batch(
    State(state): State<AppState>,
    Json(records): Json<Vec<RawRecord>>,
) -> Result<Json<ProcessResp>, (StatusCode, String)> {
    let key = content_key(&records);

    let (batch, cached) = match state.cache.get(&key) {
        Some(hit) => (hit, true),
        None => {
            let processed = state.processor.process(&records).map_err(reject)?;
            (state.cache.insert(key.clone(), processed), false)
        }
    };

    Ok(Json(ProcessResp {
        key,
        cached,
        count: batch.len(),
        processed_at: chrono::Utc::now().timestamp(),
        records: batch.as_ref().clone(),
    }))
}

#[derive(serde::Deserialize)]
struct AggregateReq {
    /// Cache key from a previous /process response…
    #[serde(default)]
    key: Option<String>,
    /// …or a fresh batch to process (cache-aware) and aggregate.
    #[serde(default)]
    records: Option<Vec<RawRecord>>,
    field: String,
    #[serde(default)]
    top_n: Option<usize>,
    #[serde(default)]
    chart: Option<ChartKind>,
}

async fn aggregate_field(
    State(state): State<AppState>,
    Json(req): Json<AggregateReq>,
) -> Result<Json<AggregationResult>, (StatusCode, String)> {
    let batch = match (&req.key, &req.records) {
        (Some(key), _) => state.cache.get(key).ok_or((
            StatusCode::NOT_FOUND,
            format!("no cached batch for key {key}"),
        ))?,
        (None, Some(records)) => {
            let key = content_key(records);
            match state.cache.get(&key) {
                Some(hit) => hit,
                None => {
                    let processed = state.processor.process(records).map_err(reject)?;
                    state.cache.insert(key, processed)
                }
            }
        }
        (None, None) => {
            return Err((
                StatusCode::BAD_REQUEST,
                "either `key` or `records` is required".to_string(),
            ))
        }
    };

    let top_n = req.top_n.unwrap_or(state.default_top_n);
    let chart = req.chart.unwrap_or(ChartKind::RankedBar);
    Ok(Json(aggregate(&batch, &req.field, top_n, chart)))
}

fn reject(err: PipelineError) -> (StatusCode, String) {
    (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
}

#[derive(serde::Serialize)]
struct CacheInfo {
    capacity: usize,
    entries: usize,
}

async fn debug_cache(State(state): State<AppState>) -> Json<CacheInfo> {
    Json(CacheInfo {
        capacity: state.cache.capacity(),
        entries: state.cache.len(),
    })
}

// src/cache.rs
//! Content-addressed cache for processed batches.
//!
//! The surrounding layer keys re-use on raw-input identity: identical
//! batches hash to the same key and hit the cached enrichment, anything
//! else recomputes. Bounded FIFO eviction keeps the store small; entries
//! are shared out as `Arc` so hits never clone the batch.

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::process::{EnrichedRecord, RawRecord};

/// Stable hex key over the canonical JSON of the input batch.
pub fn content_key(records: &[RawRecord]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    for rec in records {
        let bytes = serde_json::to_vec(rec).expect("json object serializes");
        hasher.update(&bytes);
        // separator so record boundaries can't alias
        hasher.update([0u8]);
    }
    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for b in digest.iter() {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("cache_hits_total", "Batch cache hits.");
        describe_counter!("cache_misses_total", "Batch cache misses.");
    });
}

#[derive(Debug)]
struct Inner {
    map: HashMap<String, Arc<Vec<EnrichedRecord>>>,
    /// Insertion order for FIFO eviction.
    order: VecDeque<String>,
}

/// Thread-safe bounded store of processed batches.
#[derive(Debug)]
pub struct ResultCache {
    inner: Mutex<Inner>,
    cap: usize,
}

impl ResultCache {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
            cap: cap.max(1),
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<Vec<EnrichedRecord>>> {
        ensure_metrics_described();
        let inner = self.inner.lock().expect("cache mutex poisoned");
        match inner.map.get(key) {
            Some(v) => {
                counter!("cache_hits_total").increment(1);
                Some(Arc::clone(v))
            }
            None => {
                counter!("cache_misses_total").increment(1);
                None
            }
        }
    }

    /// Store a processed batch. Re-inserting an existing key returns the
    /// already-cached value (idempotent by construction: same key means
    /// same input, which means same output).
    pub fn insert(&self, key: String, records: Vec<EnrichedRecord>) -> Arc<Vec<EnrichedRecord>> {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        if let Some(existing) = inner.map.get(&key) {
            return Arc::clone(existing);
        }
        while inner.order.len() >= self.cap {
            if let Some(evicted) = inner.order.pop_front() {
                inner.map.remove(&evicted);
            }
        }
        let value = Arc::new(records);
        inner.map.insert(key.clone(), Arc::clone(&value));
        inner.order.push_back(key);
        value
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache mutex poisoned").map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::DatasetProcessor;
    use serde_json::json;

    fn raw(content: &str) -> RawRecord {
        json!({"content": content}).as_object().unwrap().clone()
    }

    #[test]
    fn key_is_stable_and_input_sensitive() {
        let a = vec![raw("hello"), raw("world")];
        let b = vec![raw("hello"), raw("world")];
        let c = vec![raw("world"), raw("hello")];
        assert_eq!(content_key(&a), content_key(&b));
        assert_ne!(content_key(&a), content_key(&c));
        assert_eq!(content_key(&a).len(), 64);
    }

    #[test]
    fn record_boundaries_do_not_alias() {
        let one = vec![raw("ab")];
        let two = vec![raw("a"), raw("b")];
        assert_ne!(content_key(&one), content_key(&two));
    }

    #[test]
    fn hit_returns_shared_batch() {
        let cache = ResultCache::with_capacity(4);
        let batch = vec![raw("nice day")];
        let key = content_key(&batch);

        assert!(cache.get(&key).is_none());
        let processed = DatasetProcessor::new().process(&batch).unwrap();
        let stored = cache.insert(key.clone(), processed);
        let hit = cache.get(&key).expect("cached");
        assert!(Arc::ptr_eq(&stored, &hit));
    }

    #[test]
    fn eviction_is_fifo_and_bounded() {
        let cache = ResultCache::with_capacity(2);
        cache.insert("k1".into(), Vec::new());
        cache.insert("k2".into(), Vec::new());
        cache.insert("k3".into(), Vec::new());
        assert_eq!(cache.len(), 2);
        assert!(cache.get("k1").is_none(), "oldest entry evicted first");
        assert!(cache.get("k2").is_some());
        assert!(cache.get("k3").is_some());
    }

    #[test]
    fn reinsert_keeps_first_value() {
        let cache = ResultCache::with_capacity(2);
        let first = cache.insert("k".into(), Vec::new());
        let second = cache.insert("k".into(), Vec::new());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }
}

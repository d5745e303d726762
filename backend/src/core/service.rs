use crate::core::extract::extract_thumbnails;
use crate::core::models::{ApiEnvelope, ServiceStats, ThumbnailMap};
use crate::core::search::CoverSearchProvider;
use crate::core::store::{ResultStore, StoreError};
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Orchestrates cover lookup, extraction and persistence, and keeps the
/// process-lifetime counters served by /stats.
///
/// The store mutex serializes the load-merge-save section so concurrent
/// requests cannot lose each other's merges.
pub struct ThumbnailService {
    provider: Box<dyn CoverSearchProvider>,
    store: Mutex<ResultStore>,
    api_hits: AtomicU64,
    cache_hits: AtomicU64,
    error_count: AtomicU64,
    started_at: DateTime<Utc>,
    cache_ttl: Duration,
}

impl ThumbnailService {
    pub fn new(
        provider: Box<dyn CoverSearchProvider>,
        store: ResultStore,
        cache_ttl_secs: u64,
    ) -> Self {
        Self {
            provider,
            store: Mutex::new(store),
            api_hits: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
            started_at: Utc::now(),
            cache_ttl: Duration::seconds(cache_ttl_secs as i64),
        }
    }

    /// Look one ISBN up, fold the result into the persisted map and return
    /// only the newly extracted entries.
    pub fn fetch_one(&self, isbn: &str) -> Result<ThumbnailMap, StoreError> {
        let envelope = self.search_counted(isbn);
        let new_entries = extract_thumbnails(&envelope);
        self.merge_and_save(&new_entries)?;
        Ok(new_entries)
    }

    /// Batch lookup. A failing ISBN contributes nothing and the batch keeps
    /// going; the disk merge happens once, after all upstream calls.
    pub fn fetch_many(&self, isbns: &[String]) -> Result<ThumbnailMap, StoreError> {
        let mut accumulated = ThumbnailMap::new();

        for isbn in isbns {
            let envelope = self.search_counted(isbn);
            if !envelope.is_empty() {
                accumulated.extend(extract_thumbnails(&envelope));
            }
        }

        self.merge_and_save(&accumulated)?;
        Ok(accumulated)
    }

    /// One upstream attempt bumps exactly one of the three counters. An
    /// upstream failure degrades to the empty envelope so callers treat it
    /// the same as "zero matches".
    fn search_counted(&self, isbn: &str) -> ApiEnvelope {
        match self.provider.search(isbn) {
            Ok(lookup) => {
                if lookup.from_cache {
                    self.cache_hits.fetch_add(1, Ordering::Relaxed);
                } else {
                    self.api_hits.fetch_add(1, Ordering::Relaxed);
                }
                lookup.envelope
            }
            Err(e) => {
                self.error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("{} error for isbn {isbn}: {e}", self.provider.name());
                ApiEnvelope::default()
            }
        }
    }

    /// Load-merge-save under the store lock; new entries win on conflict.
    /// An unreadable result file is counted and treated as empty.
    fn merge_and_save(&self, new_entries: &ThumbnailMap) -> Result<(), StoreError> {
        let store = match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut merged = match store.load() {
            Ok(map) => map,
            Err(e) => {
                self.error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Result file unreadable, starting from empty: {e}");
                ThumbnailMap::new()
            }
        };

        merged.extend(new_entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        store.save(&merged)
    }

    pub fn statistics(&self) -> ServiceStats {
        let now = Utc::now();
        let uptime = now - self.started_at;
        let countdown = ((self.started_at + self.cache_ttl) - now).max(Duration::zero());

        ServiceStats {
            api_hits: self.api_hits.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            error_count: self.error_count.load(Ordering::Relaxed),
            service_start_time: self.started_at.to_rfc3339(),
            uptime: format_duration(uptime),
            cache_countdown: format_duration(countdown),
        }
    }

    /// Lets the web layer record validation failures that never reach the
    /// network path.
    pub fn increment_error_count(&self) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Render a duration as "1d 2h 3m 4s", dropping leading zero units.
fn format_duration(d: Duration) -> String {
    let total = d.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 || !parts.is_empty() {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 || !parts.is_empty() {
        parts.push(format!("{minutes}m"));
    }
    parts.push(format!("{seconds}s"));
    parts.join(" ")
}

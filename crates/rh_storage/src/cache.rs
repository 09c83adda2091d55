//! Read-through TTL cache in front of an [`ArticleSource`].
//!
//! One entry per cache. A miss starts a refresh; callers that miss while it
//! is running await the same shared future instead of fetching again. A
//! failed refresh leaves the previous entry in place (still subject to its
//! TTL) and hands the error to every waiter.

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use rh_core::normalize::normalize_document;
use rh_core::{ArticleSource, Clock, Dataset, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

type Refresh = Shared<BoxFuture<'static, Result<Arc<Dataset>>>>;

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Arc<Dataset>,
    fetched_at: DateTime<Utc>,
}

struct InFlight {
    started_at: DateTime<Utc>,
    refresh: Refresh,
}

#[derive(Default)]
struct Slot {
    entry: Option<CacheEntry>,
    in_flight: Option<InFlight>,
}

pub struct ArticleCache {
    source: Arc<dyn ArticleSource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    slot: Mutex<Slot>,
}

impl ArticleCache {
    pub fn new(source: Arc<dyn ArticleSource>, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(source, clock, DEFAULT_TTL)
    }

    pub fn with_ttl(source: Arc<dyn ArticleSource>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl,
            slot: Mutex::new(Slot::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        // A clock that went backwards counts as zero elapsed.
        let elapsed = (now - entry.fetched_at).to_std().unwrap_or(Duration::ZERO);
        elapsed < self.ttl
    }

    /// Returns the cached dataset, refreshing it first when absent or expired.
    pub async fn get(&self) -> Result<Arc<Dataset>> {
        let refresh = {
            let mut slot = self.lock();
            let now = self.clock.now();

            if let Some(entry) = &slot.entry {
                if self.is_fresh(entry, now) {
                    debug!("📦 Cache hit ({} articles)", entry.data.articles.len());
                    return Ok(entry.data.clone());
                }
            }

            match &slot.in_flight {
                Some(in_flight) => {
                    debug!("⏳ Joining in-flight refresh");
                    in_flight.refresh.clone()
                }
                None => {
                    let refresh = self.start_refresh();
                    slot.in_flight = Some(InFlight {
                        started_at: now,
                        refresh: refresh.clone(),
                    });
                    refresh
                }
            }
        };

        let result = refresh.clone().await;
        self.complete(&refresh, &result);
        result
    }

    fn start_refresh(&self) -> Refresh {
        let source = self.source.clone();
        let clock = self.clock.clone();
        async move {
            info!("🔄 Refreshing dataset from {}", source.name());
            let document = source.fetch().await?;
            let dataset = normalize_document(document, clock.as_ref());
            info!(
                "✨ Loaded {} articles and {} categories",
                dataset.articles.len(),
                dataset.categories.len()
            );
            Ok(Arc::new(dataset))
        }
        .boxed()
        .shared()
    }

    /// Stores the outcome of `refresh` if it is still the pending one.
    fn complete(&self, refresh: &Refresh, result: &Result<Arc<Dataset>>) {
        let mut slot = self.lock();
        let is_current = slot
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.refresh.ptr_eq(refresh));
        if !is_current {
            return;
        }

        if let Some(in_flight) = slot.in_flight.take() {
            match result {
                Ok(data) => {
                    slot.entry = Some(CacheEntry {
                        data: data.clone(),
                        fetched_at: in_flight.started_at,
                    });
                }
                Err(e) => warn!("❌ Refresh from {} failed: {}", self.source.name(), e),
            }
        }
    }

    /// When the stored entry was fetched, fresh or not.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.lock().entry.as_ref().map(|entry| entry.fetched_at)
    }
}

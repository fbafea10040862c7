//! Keyed query cache with last-request-wins semantics.
//!
//! Every key carries a generation counter and a [`CancellationToken`].
//! Starting a fetch bumps the generation; a response is written to the cache
//! only if its generation is still current, so a slow response can never
//! overwrite a fresher one. The caller that issued the slow request still
//! gets its own result. Cancelling a key or clearing the cache discards
//! in-flight results entirely. There is no retry: a failed fetch is recorded
//! and returned.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use clienthub_backend::BackendError;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::key::QueryKey;

/// State of one query key.
#[derive(Debug, Clone)]
enum QueryState<V> {
    /// Never fetched, cancelled or invalidated.
    Idle,
    Loading,
    Failed { message: String },
    Ready { data: V, fetched_at: Instant },
}

/// Why a fetch produced no value for its caller.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The cache was cleared (the session ended) while the fetch was in
    /// flight.
    #[error("Query superseded by a session change")]
    Superseded,

    /// The key was cancelled while the fetch was in flight.
    #[error("Query cancelled")]
    Cancelled,
}

struct Entry<V> {
    generation: u64,
    cancel: CancellationToken,
    state: QueryState<V>,
}

impl<V> Entry<V> {
    fn new() -> Self {
        Self {
            generation: 0,
            cancel: CancellationToken::new(),
            state: QueryState::Idle,
        }
    }

    /// Cancel in-flight work and start over with a fresh token.
    fn reset(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.generation += 1;
        self.state = QueryState::Idle;
    }
}

/// Cache of query results of one value type, keyed by [`QueryKey`].
pub struct QueryClient<V> {
    entries: Mutex<HashMap<QueryKey, Entry<V>>>,
    stale_after: Duration,
}

impl<V: Clone> QueryClient<V> {
    /// Results older than `stale_after` are refetched on the next read.
    pub fn new(stale_after: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            stale_after,
        }
    }

    /// Return the cached value for `key` if fresh, otherwise run `fetch`.
    ///
    /// `fetch` is only polled when the cache misses.
    pub async fn fetch<F>(&self, key: QueryKey, fetch: F) -> Result<V, QueryError>
    where
        F: Future<Output = Result<V, BackendError>>,
    {
        let (generation, cancel) = {
            let mut entries = self.entries.lock().await;
            let entry = entries.entry(key).or_insert_with(Entry::new);
            match &entry.state {
                QueryState::Ready { data, fetched_at } if fetched_at.elapsed() < self.stale_after => {
                    tracing::trace!(%key, "Query cache hit");
                    return Ok(data.clone());
                }
                QueryState::Failed { message } => {
                    tracing::debug!(%key, previous_error = %message, "Refetching failed query");
                }
                _ => {}
            }
            entry.generation += 1;
            entry.state = QueryState::Loading;
            (entry.generation, entry.cancel.clone())
        };

        tracing::debug!(%key, generation, "Query started");

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                let cleared = !self.entries.lock().await.contains_key(&key);
                tracing::debug!(%key, generation, cleared, "Query discarded in flight");
                return Err(if cleared {
                    QueryError::Superseded
                } else {
                    QueryError::Cancelled
                });
            }
            result = fetch => result,
        };

        let mut entries = self.entries.lock().await;
        let Some(entry) = entries.get_mut(&key) else {
            tracing::debug!(%key, generation, "Query result discarded, cache cleared");
            return Err(QueryError::Superseded);
        };
        if cancel.is_cancelled() {
            tracing::debug!(%key, generation, "Query result discarded, cancelled");
            return Err(QueryError::Cancelled);
        }
        if entry.generation != generation {
            // A newer request owns the cache entry; answer this caller only.
            tracing::debug!(
                %key,
                generation,
                current = entry.generation,
                "Query result not cached, newer request in flight"
            );
            return result.map_err(QueryError::Backend);
        }

        match result {
            Ok(data) => {
                entry.state = QueryState::Ready {
                    data: data.clone(),
                    fetched_at: Instant::now(),
                };
                Ok(data)
            }
            Err(err) => {
                tracing::warn!(%key, generation, error = %err, "Query failed");
                entry.state = QueryState::Failed {
                    message: err.to_string(),
                };
                Err(QueryError::Backend(err))
            }
        }
    }

    /// Drop the cached value for `key` so the next read refetches. A fetch
    /// already in flight still answers its caller but no longer fills the
    /// cache.
    pub async fn invalidate(&self, key: &QueryKey) {
        if let Some(entry) = self.entries.lock().await.get_mut(key) {
            entry.generation += 1;
            entry.state = QueryState::Idle;
        }
    }

    /// Cancel any in-flight fetch for `key` and forget its value.
    pub async fn cancel(&self, key: &QueryKey) {
        if let Some(entry) = self.entries.lock().await.get_mut(key) {
            entry.reset();
        }
    }

    /// Cancel everything in flight and drop every entry.
    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        for entry in entries.values_mut() {
            entry.reset();
        }
        entries.clear();
    }
}

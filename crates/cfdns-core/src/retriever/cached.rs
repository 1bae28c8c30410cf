// # Cached Retriever
//
// Time-bounded memoization of one slowly changing external value (the
// public IP), so repeated reconciliations do not hammer the lookup service.
//
// ## Expiry
//
// Every successful fetch stores the value under a new generation number and
// arms a tokio timer for that generation. When the timer fires it clears the
// slot, unless a newer fetch has replaced the value in the meantime. Reads
// never look at the clock: a present value is served, an absent one is
// fetched.
//
// The timer task only holds a `Weak` handle to the slot and is aborted when
// the retriever is dropped, so it can never keep the cache alive.
//
// ## Concurrency
//
// The slot is a mutex-guarded cell that is never held across an await.
// Concurrent misses each fetch (fetches are idempotent reads); the last one
// to store wins and owns the timer.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::error::{Error, Result};
use crate::traits::{ByteRetriever, StringRetriever};

#[derive(Debug, Default)]
struct Slot {
    value: Option<String>,
    generation: u64,
    expiry: Option<JoinHandle<()>>,
}

/// TTL cache in front of a [`ByteRetriever`]
///
/// Holds at most one value. The fetched body is decoded as UTF-8 and
/// trimmed; an empty result is a discovery error and is not cached.
///
/// # Example
///
/// ```rust,ignore
/// use cfdns_core::retriever::CachedRetriever;
/// use cfdns_core::StringRetriever;
/// use std::time::Duration;
///
/// let ip = CachedRetriever::new(url_retriever, Duration::from_secs(300));
/// let first = ip.get().await?;  // fetches
/// let second = ip.get().await?; // served from the cache
/// ```
pub struct CachedRetriever<B> {
    source: B,
    ttl: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl<B: ByteRetriever> CachedRetriever<B> {
    /// Wrap `source`, keeping each fetched value for `ttl`
    pub fn new(source: B, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn cached(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .value
            .clone()
    }

    fn store(&self, value: String) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.generation = slot.generation.wrapping_add(1);
        slot.value = Some(value);

        let timer = spawn_expiry(Arc::downgrade(&self.slot), slot.generation, self.ttl);
        if let Some(previous) = slot.expiry.replace(timer) {
            previous.abort();
        }
    }
}

fn spawn_expiry(slot: Weak<Mutex<Slot>>, generation: u64, ttl: Duration) -> JoinHandle<()> {
    let deadline = Instant::now() + ttl;

    tokio::spawn(async move {
        tokio::time::sleep_until(deadline).await;

        let Some(slot) = slot.upgrade() else {
            return;
        };
        let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.generation == generation {
            slot.value = None;
            slot.expiry = None;
            tracing::debug!("Cached value expired after {:?}", ttl);
        }
    })
}

#[async_trait]
impl<B: ByteRetriever> StringRetriever for CachedRetriever<B> {
    async fn get(&self) -> Result<String> {
        if let Some(value) = self.cached() {
            tracing::trace!("Serving cached value");
            return Ok(value);
        }

        tracing::debug!("Cache empty, fetching value");
        let body = self.source.fetch().await?;
        let value = String::from_utf8(body)
            .map_err(|e| Error::discovery(format!("Response is not valid UTF-8: {}", e)))?
            .trim()
            .to_string();

        if value.is_empty() {
            return Err(Error::discovery("Response body is empty"));
        }

        self.store(value.clone());
        Ok(value)
    }
}

impl<B> Drop for CachedRetriever<B> {
    fn drop(&mut self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(expiry) = slot.expiry.take() {
            expiry.abort();
        }
    }
}

impl<B> std::fmt::Debug for CachedRetriever<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedRetriever")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;

use crate::error::Error;

/// TTL for token metadata and price lookups. Metadata is immutable in
/// practice; prices only need to be fresh within a poll cycle.
const TOKEN_CACHE_TTL_SECS: u64 = 300;
const TOKEN_CACHE_CAPACITY: u64 = 512;

pub fn token_cache<T>() -> Cache<String, T>
where
    T: Clone + Send + Sync + 'static,
{
    Cache::builder()
        .time_to_live(Duration::from_secs(TOKEN_CACHE_TTL_SECS))
        .max_capacity(TOKEN_CACHE_CAPACITY)
        .build()
}

/// Fetches a cached value or computes it with the provided async
/// function. Moka coalesces concurrent misses: only one caller executes
/// the fetch, the rest wait for its result.
pub async fn cached_fetch<T, F, Fut>(
    cache: &Cache<String, T>,
    key: &str,
    fetch_fn: F,
) -> Result<T, Error>
where
    T: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    cache
        .try_get_with_by_ref(key, fetch_fn())
        .await
        .map_err(|e| Error::TaskError(e.to_string()))
}

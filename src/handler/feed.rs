use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    notification::Notifier,
    provider::{ApiError, ApiErrorKind},
};

/// Point-in-time copy of a feed's state for the HTTP layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
struct Inner<T> {
    data: T,
    loading: bool,
    error: Option<String>,
    digest: Option<String>,
}

/// Cache for one polled entity. Carries the loading flag (only flipped
/// by user-initiated refreshes), the last error, a digest of the stored
/// payload so identical responses don't churn downstream consumers, and
/// a generation counter so a response that lost the race against a
/// newer fetch is discarded instead of clobbering it.
#[derive(Debug)]
pub struct Feed<T> {
    inner: RwLock<Inner<T>>,
    generation: AtomicU64,
}

impl<T: Clone + Serialize> Feed<T> {
    pub fn new(initial: T) -> Self {
        Feed {
            inner: RwLock::new(Inner {
                data: initial,
                loading: false,
                error: None,
                digest: None,
            }),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn snapshot(&self) -> FeedSnapshot<T> {
        let inner = self.inner.read().await;
        FeedSnapshot {
            data: inner.data.clone(),
            loading: inner.loading,
            error: inner.error.clone(),
        }
    }

    pub async fn data(&self) -> T {
        self.inner.read().await.data.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }

    /// Starts a fetch cycle and returns its generation. Background
    /// (timer-driven) refreshes never flip the loading flag.
    pub async fn begin(&self, background: bool) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if !background {
            self.inner.write().await.loading = true;
        }
        generation
    }

    /// Applies a fetch outcome. `empty` is the value substituted when
    /// the failure is the benign kind (a brand-new wallet with nothing
    /// on chain yet).
    pub async fn resolve(
        &self,
        generation: u64,
        result: Result<T, ApiError>,
        empty: T,
        notifier: &Notifier,
    ) {
        if generation < self.generation.load(Ordering::SeqCst) {
            debug!("discarding stale response (generation {})", generation);
            return;
        }

        if let Err(error) = &result {
            notifier.route_api(error).await;
        }

        let mut inner = self.inner.write().await;
        inner.loading = false;

        match result {
            Ok(data) => {
                let digest = sha256::digest(serde_json::to_string(&data).unwrap_or_default());
                if inner.digest.as_deref() != Some(digest.as_str()) {
                    inner.data = data;
                    inner.digest = Some(digest);
                }
                inner.error = None;
            }
            Err(error) => match error.kind {
                ApiErrorKind::ExpectedEmpty => {
                    inner.data = empty;
                    inner.digest = None;
                    inner.error = None;
                }
                _ => {
                    inner.error = Some(error.message);
                }
            },
        }
    }

    /// Disconnect path: drop to the empty value without a network call
    /// and invalidate anything still in flight.
    pub async fn reset(&self, empty: T) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.write().await;
        inner.data = empty;
        inner.loading = false;
        inner.error = None;
        inner.digest = None;
    }
}

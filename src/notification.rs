use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::warn;

use crate::provider::{ApiError, ApiErrorKind};

/// In-process notification surface. Feeds and actions route every
/// failure here exactly once: benign data errors are swallowed, timeouts
/// are logged, access denials flip the modal flag, everything else is
/// queued as a toast. The HTTP layer drains it.
#[derive(Debug, Default)]
pub struct Notifier {
    toasts: Mutex<Vec<String>>,
    access_modal: AtomicBool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeBatch {
    pub toasts: Vec<String>,
    pub access_modal: bool,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn toast(&self, message: &str) {
        self.toasts.lock().await.push(message.to_owned());
    }

    pub fn show_access_modal(&self) {
        self.access_modal.store(true, Ordering::SeqCst);
    }

    pub fn dismiss_access_modal(&self) {
        self.access_modal.store(false, Ordering::SeqCst);
    }

    pub fn access_modal_visible(&self) -> bool {
        self.access_modal.load(Ordering::SeqCst)
    }

    pub async fn pending_toasts(&self) -> Vec<String> {
        self.toasts.lock().await.clone()
    }

    /// Returns queued toasts plus the modal flag and clears the queue.
    /// The modal flag stays up until explicitly dismissed.
    pub async fn drain(&self) -> NoticeBatch {
        let mut toasts = self.toasts.lock().await;
        NoticeBatch {
            toasts: std::mem::take(&mut *toasts),
            access_modal: self.access_modal_visible(),
        }
    }

    /// Single routing point for the error taxonomy.
    pub async fn route_api(&self, error: &ApiError) {
        match error.kind {
            ApiErrorKind::ExpectedEmpty => {}
            ApiErrorKind::Timeout => {
                warn!("request timed out: {}", error.message);
            }
            ApiErrorKind::AccessDenied => {
                self.show_access_modal();
            }
            ApiErrorKind::Other => {
                self.toast(&error.message).await;
            }
        }
    }

    pub async fn route_error(&self, error: &crate::error::Error) {
        match error {
            crate::error::Error::Api(api) => self.route_api(api).await,
            other => self.toast(&other.to_string()).await,
        }
    }
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

static LASTFM_API_CALLS: OnceLock<Arc<ApiCallCounter>> = OnceLock::new();

/// Counts calls made to the Last.fm API.
///
/// Purely observational: nothing reads it to decide whether to make a call.
#[derive(Debug, Default)]
pub struct ApiCallCounter {
    calls: AtomicU64,
}

impl ApiCallCounter {
    pub const fn new() -> Self {
        Self {
            calls: AtomicU64::new(0),
        }
    }

    /// The process-wide counter, created on first use.
    pub fn global() -> Arc<ApiCallCounter> {
        LASTFM_API_CALLS
            .get_or_init(|| Arc::new(ApiCallCounter::new()))
            .clone()
    }

    pub fn inc(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

use serde_json::Value;
use std::time::SystemTime;
use tokio::sync::{Mutex, MutexGuard};

/// A complete snapshot of the upstream payload and the time it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: Value,
    pub fetched_at: SystemTime,
}

/// Single-slot in-memory cache for the player payload.
///
/// The slot starts empty and is overwritten wholesale on every successful
/// fetch; it holds either nothing or the full snapshot from the most recent
/// fetch. The guard is held across the refresh, so concurrent invocations
/// never observe a half-written entry.
#[derive(Debug, Default)]
pub struct PlayerCache {
    entry: Mutex<Option<CacheEntry>>,
}

impl PlayerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        self.entry.lock().await
    }
}

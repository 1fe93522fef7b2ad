use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::api::sleeper::FetchError;
use crate::models::cache::{CacheEntry, PlayerCache};

/// How long a fetched payload stays fresh.
pub const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Seam between the service and the upstream endpoint, so tests can script
/// the upstream instead of reaching over the network.
#[async_trait]
pub trait PlayerFetcher: Send + Sync {
    async fn fetch_players(&self) -> Result<Value, FetchError>;
}

/// Time source, injected so tests control expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Which path produced the payload being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeSource {
    /// Fetched from the upstream on this invocation.
    Fresh,
    /// Served from the cache within its TTL.
    Cached,
    /// Served from an expired cache entry because the refresh failed.
    Stale,
}

#[derive(Debug, Clone)]
pub struct ServedPlayers {
    pub payload: Value,
    pub source: ServeSource,
}

/// The single user-visible failure: the upstream fetch failed and there is no
/// cached snapshot to fall back on.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Failed to fetch player data and no cache available.")]
    Unavailable(#[source] FetchError),
}

/// Fronts the upstream players endpoint with a single-entry TTL cache.
///
/// The fetcher and clock are injected, the cache is owned here rather than
/// living in module state, and the three ways a payload can be served are
/// named explicitly in [`ServeSource`].
pub struct PlayerService {
    fetcher: Arc<dyn PlayerFetcher>,
    clock: Arc<dyn Clock>,
    cache: PlayerCache,
}

impl PlayerService {
    pub fn new(fetcher: Arc<dyn PlayerFetcher>) -> Self {
        Self::with_clock(fetcher, Arc::new(SystemClock))
    }

    pub fn with_clock(fetcher: Arc<dyn PlayerFetcher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            fetcher,
            clock,
            cache: PlayerCache::new(),
        }
    }

    /// Serve the player payload: cached if fresh, otherwise refetched, falling
    /// back to the stale entry when the refetch fails.
    ///
    /// The cache guard is held across the refresh, so at most one upstream
    /// fetch is in flight and the read-then-write on the entry is atomic.
    pub async fn serve_players(&self) -> Result<ServedPlayers, ServeError> {
        let now = self.clock.now();
        let mut entry = self.cache.lock().await;

        if let Some(cached) = entry.as_ref() {
            if is_fresh(cached.fetched_at, now) {
                debug!("Serving player data from cache");
                return Ok(ServedPlayers {
                    payload: cached.payload.clone(),
                    source: ServeSource::Cached,
                });
            }
        }

        match self.fetcher.fetch_players().await {
            Ok(payload) => {
                info!("Fetched new player data and updated cache");
                *entry = Some(CacheEntry {
                    payload: payload.clone(),
                    fetched_at: now,
                });
                Ok(ServedPlayers {
                    payload,
                    source: ServeSource::Fresh,
                })
            }
            Err(err) => match entry.as_ref() {
                Some(cached) => {
                    warn!(error = %err, "Error fetching new data, serving stale cache");
                    Ok(ServedPlayers {
                        payload: cached.payload.clone(),
                        source: ServeSource::Stale,
                    })
                }
                None => {
                    error!(error = %err, "Error fetching player data with no cache to fall back on");
                    Err(ServeError::Unavailable(err))
                }
            },
        }
    }
}

/// Half-open freshness window: exactly `CACHE_TTL` elapsed counts as stale.
/// An entry stamped in the future (clock went backwards) counts as fresh.
fn is_fresh(fetched_at: SystemTime, now: SystemTime) -> bool {
    match now.duration_since(fetched_at) {
        Ok(elapsed) => elapsed < CACHE_TTL,
        Err(_) => true,
    }
}

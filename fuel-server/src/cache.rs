//! Tiered in-memory cache for the upstream feeds.
//!
//! Station metadata and price snapshots change at very different rates:
//! forecourts rarely appear or move, while prices churn throughout the
//! day. Each feed gets its own single-entry cache with an independent
//! TTL.
//!
//! Concurrent misses on the same slot are coalesced by moka's
//! `try_get_with`: exactly one refresh runs and every waiter observes
//! its result. A failed refresh is shared with the waiters of that
//! attempt and nothing is stored, so the next call retries from cold.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{PriceRecord, Station};
use crate::fuel::FuelApiError;

/// Default TTL for station metadata.
const DEFAULT_STATION_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Default TTL for price snapshots.
const DEFAULT_PRICE_TTL: Duration = Duration::from_secs(10 * 60);

/// Configuration for the data cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the station-metadata slot.
    pub station_ttl: Duration,

    /// TTL for the price-snapshot slot.
    pub price_ttl: Duration,
}

impl CacheConfig {
    /// Set the station-metadata TTL.
    pub fn with_station_ttl(mut self, ttl: Duration) -> Self {
        self.station_ttl = ttl;
        self
    }

    /// Set the price-snapshot TTL.
    pub fn with_price_ttl(mut self, ttl: Duration) -> Self {
        self.price_ttl = ttl;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            station_ttl: DEFAULT_STATION_TTL,
            price_ttl: DEFAULT_PRICE_TTL,
        }
    }
}

/// Cache over the two upstream feeds.
///
/// Each slot holds at most one entry (the whole feed); entries are
/// replaced wholesale on refresh, never merged.
pub struct DataCache {
    stations: MokaCache<(), Arc<Vec<Station>>>,
    prices: MokaCache<(), Arc<Vec<PriceRecord>>>,
}

impl DataCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let stations = MokaCache::builder()
            .time_to_live(config.station_ttl)
            .max_capacity(1)
            .build();

        let prices = MokaCache::builder()
            .time_to_live(config.price_ttl)
            .max_capacity(1)
            .build();

        Self { stations, prices }
    }

    /// The cached station feed, or the result of `refresh`.
    ///
    /// `refresh` is polled only on a miss; concurrent misses share one
    /// refresh and all receive its value (or its error).
    pub async fn stations(
        &self,
        refresh: impl Future<Output = Result<Vec<Station>, FuelApiError>>,
    ) -> Result<Arc<Vec<Station>>, Arc<FuelApiError>> {
        self.stations
            .try_get_with((), async move { refresh.await.map(Arc::new) })
            .await
    }

    /// The cached price feed, or the result of `refresh`.
    pub async fn prices(
        &self,
        refresh: impl Future<Output = Result<Vec<PriceRecord>, FuelApiError>>,
    ) -> Result<Arc<Vec<PriceRecord>>, Arc<FuelApiError>> {
        self.prices
            .try_get_with((), async move { refresh.await.map(Arc::new) })
            .await
    }

    /// Drop both slots, forcing the next calls to refresh.
    pub fn invalidate_all(&self) {
        self.stations.invalidate_all();
        self.prices.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn station(id: &str) -> Station {
        Station {
            id: id.to_string(),
            name: id.to_string(),
            brand: None,
            postcode: "SW1A 1AA".to_string(),
            latitude: 51.5,
            longitude: -0.12,
        }
    }

    fn fetch_error() -> FuelApiError {
        FuelApiError::Api {
            resource: "stations".to_string(),
            status: 502,
            body: "bad gateway".to_string(),
        }
    }

    #[tokio::test]
    async fn value_within_ttl_skips_refresh() {
        let cache = DataCache::new(&CacheConfig::default());
        let refreshes = AtomicUsize::new(0);

        for _ in 0..3 {
            let result = cache
                .stations(async {
                    refreshes.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![station("a")])
                })
                .await
                .unwrap();
            assert_eq!(result.len(), 1);
        }

        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_misses_share_one_refresh() {
        let cache = Arc::new(DataCache::new(&CacheConfig::default()));
        let refreshes = Arc::new(AtomicUsize::new(0));

        let refresh = |counter: Arc<AtomicUsize>| async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![station("a")])
        };

        let (a, b) = tokio::join!(
            cache.stations(refresh(refreshes.clone())),
            cache.stations(refresh(refreshes.clone()))
        );

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_refresh_is_not_cached() {
        let cache = DataCache::new(&CacheConfig::default());
        let refreshes = AtomicUsize::new(0);

        let err = cache
            .stations(async {
                refreshes.fetch_add(1, Ordering::SeqCst);
                Err(fetch_error())
            })
            .await
            .unwrap_err();
        assert!(matches!(*err, FuelApiError::Api { status: 502, .. }));

        // Next call retries from cold and succeeds
        let result = cache
            .stations(async {
                refreshes.fetch_add(1, Ordering::SeqCst);
                Ok(vec![station("a")])
            })
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(refreshes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn slots_refresh_independently() {
        let cache = DataCache::new(&CacheConfig::default());
        let station_refreshes = AtomicUsize::new(0);
        let price_refreshes = AtomicUsize::new(0);

        cache
            .stations(async {
                station_refreshes.fetch_add(1, Ordering::SeqCst);
                Ok(vec![station("a")])
            })
            .await
            .unwrap();

        cache
            .prices(async {
                price_refreshes.fetch_add(1, Ordering::SeqCst);
                Ok(vec![])
            })
            .await
            .unwrap();

        assert_eq!(station_refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(price_refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entry_refreshes_again() {
        let config = CacheConfig::default().with_price_ttl(Duration::from_millis(50));
        let cache = DataCache::new(&config);
        let refreshes = AtomicUsize::new(0);

        cache
            .prices(async {
                refreshes.fetch_add(1, Ordering::SeqCst);
                Ok(vec![])
            })
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;

        cache
            .prices(async {
                refreshes.fetch_add(1, Ordering::SeqCst);
                Ok(vec![])
            })
            .await
            .unwrap();

        assert_eq!(refreshes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_all_clears_both_slots() {
        let cache = DataCache::new(&CacheConfig::default());
        let refreshes = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .stations(async {
                    refreshes.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![station("a")])
                })
                .await
                .unwrap();
            cache.invalidate_all();
        }

        assert_eq!(refreshes.load(Ordering::SeqCst), 2);
    }
}

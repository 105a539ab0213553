use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::modules::mapping::SeasonCatalogProvider;
use crate::modules::matching::{SeasonCandidate, ShowId};
use crate::shared::errors::AppResult;

/// Decorator that adds transparent caching to any SeasonCatalogProvider
///
/// Sequels and split cours usually point at the same TMDB show, so a batch
/// asks for the same season list many times. Only successful lookups are
/// cached; an error is returned as-is and the next call tries again.
pub struct CachingSeasonCatalog {
    /// The wrapped catalog
    inner: Arc<dyn SeasonCatalogProvider>,
    cache: DashMap<ShowId, Vec<SeasonCandidate>>,
}

impl CachingSeasonCatalog {
    pub fn new(inner: Arc<dyn SeasonCatalogProvider>) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    pub fn cached_shows(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl SeasonCatalogProvider for CachingSeasonCatalog {
    async fn fetch(&self, show_id: ShowId) -> AppResult<Vec<SeasonCandidate>> {
        if let Some(cached) = self.cache.get(&show_id) {
            log::debug!("Cache HIT for seasons of show {}", show_id);
            return Ok(cached.value().clone());
        }

        log::debug!("Cache MISS for seasons of show {}", show_id);

        let seasons = self.inner.fetch(show_id).await?;
        self.cache.insert(show_id, seasons.clone());

        Ok(seasons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::matching::AnchorDate;
    use crate::shared::errors::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCatalog {
        calls: AtomicUsize,
        fail_first: bool,
    }

    #[async_trait]
    impl SeasonCatalogProvider for CountingCatalog {
        async fn fetch(&self, show_id: ShowId) -> AppResult<Vec<SeasonCandidate>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && call == 0 {
                return Err(AppError::ExternalServiceError("TMDB down".to_string()));
            }
            Ok(vec![SeasonCandidate::new(
                1,
                show_id * 10,
                Some(AnchorDate::from_ymd(2013, 4, 7).unwrap()),
            )])
        }
    }

    fn catalog(fail_first: bool) -> Arc<CountingCatalog> {
        Arc::new(CountingCatalog {
            calls: AtomicUsize::new(0),
            fail_first,
        })
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let inner = catalog(false);
        let caching = CachingSeasonCatalog::new(inner.clone());

        let first = caching.fetch(1429).await.unwrap();
        let second = caching.fetch(1429).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(caching.cached_shows(), 1);
    }

    #[tokio::test]
    async fn test_shows_are_cached_separately() {
        let inner = catalog(false);
        let caching = CachingSeasonCatalog::new(inner.clone());

        assert_eq!(caching.fetch(1).await.unwrap()[0].season_id, 10);
        assert_eq!(caching.fetch(2).await.unwrap()[0].season_id, 20);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let inner = catalog(true);
        let caching = CachingSeasonCatalog::new(inner.clone());

        assert!(caching.fetch(1429).await.is_err());
        assert_eq!(caching.cached_shows(), 0);
        assert!(caching.fetch(1429).await.is_ok());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }
}

//! Preventive tip lookup.
//!
//! Lists stored tips, searches them (augmented by external summary providers), and picks a
//! tip of the day from an injected random source.

use std::sync::Arc;

use medcare_types::NonEmptyText;
use rand::Rng;

use crate::models::{PreventiveTip, TipSearchHit};
use crate::provider::SummaryProvider;
use crate::store::RecordStore;
use crate::{MedcareError, MedcareResult};

#[derive(Clone)]
pub struct TipService {
    store: Arc<dyn RecordStore>,
    providers: Vec<Arc<dyn SummaryProvider>>,
}

impl TipService {
    /// Creates a tip service. `providers` are consulted in order on every search.
    pub fn new(store: Arc<dyn RecordStore>, providers: Vec<Arc<dyn SummaryProvider>>) -> Self {
        Self { store, providers }
    }

    pub fn list_all(&self) -> MedcareResult<Vec<PreventiveTip>> {
        self.store.list_tips()
    }

    /// Searches stored tips and then every provider, in that order.
    ///
    /// Provider calls are made one after another. A provider that fails is logged and
    /// contributes nothing; its failure never reaches the caller.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `query` is blank.
    /// - `NotFound` if neither the store nor any provider produced a result.
    /// - Storage failures from the store search.
    pub async fn search_tips(&self, query: &str) -> MedcareResult<Vec<TipSearchHit>> {
        let needle = NonEmptyText::new(query)
            .map_err(|_| MedcareError::InvalidInput("Search query is required.".into()))?;

        let mut results: Vec<TipSearchHit> = self
            .store
            .search_tips(&needle)?
            .into_iter()
            .map(TipSearchHit::Stored)
            .collect();

        for provider in &self.providers {
            match provider.lookup(needle.as_str()).await {
                Ok(Some(summary)) => results.push(TipSearchHit::External(summary)),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("{} lookup for '{}' failed: {}", provider.name(), needle, e);
                }
            }
        }

        if results.is_empty() {
            return Err(MedcareError::NotFound("No tips found.".into()));
        }
        Ok(results)
    }

    /// Selects one stored tip uniformly at random using `rng`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the tip collection is empty.
    pub fn random_tip<R: Rng + ?Sized>(&self, rng: &mut R) -> MedcareResult<PreventiveTip> {
        let not_found = || MedcareError::NotFound("No preventive tips available.".into());

        let count = self.store.tip_count()?;
        if count == 0 {
            return Err(not_found());
        }
        let index = rng.gen_range(0..count);
        // A concurrent writer can only grow the collection, so `index` stays valid.
        self.store.tip_at(index)?.ok_or_else(not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Summary;
    use crate::provider::ProviderError;
    use crate::store::MemoryStore;
    use crate::test_support::tip;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SummaryProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn lookup(&self, _query: &str) -> Result<Option<Summary>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err("connection refused".into())
        }
    }

    struct FixedProvider;

    #[async_trait]
    impl SummaryProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn lookup(&self, query: &str) -> Result<Option<Summary>, ProviderError> {
            Ok(Some(Summary {
                title: query.to_string(),
                category: "Fixed".into(),
                description: format!("About {query}"),
                image: "img".into(),
            }))
        }
    }

    struct SilentProvider;

    #[async_trait]
    impl SummaryProvider for SilentProvider {
        fn name(&self) -> &str {
            "silent"
        }

        async fn lookup(&self, _query: &str) -> Result<Option<Summary>, ProviderError> {
            Ok(None)
        }
    }

    fn stocked_store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_records(
            vec![],
            vec![
                tip("Wash hands", "Hygiene", "Use soap and water"),
                tip("Sleep", "Lifestyle", "Seven to nine hours"),
                tip("Vaccinate", "Immunisation", "Keep vaccines up to date"),
            ],
        ))
    }

    #[test]
    fn test_list_all_returns_every_tip() {
        let svc = TipService::new(stocked_store(), vec![]);
        assert_eq!(svc.list_all().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_puts_store_hits_before_provider_hits() {
        let svc = TipService::new(
            stocked_store(),
            vec![Arc::new(SilentProvider), Arc::new(FixedProvider)],
        );

        let hits = svc.search_tips("soap").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(matches!(&hits[0], TipSearchHit::Stored(t) if t.title == "Wash hands"));
        assert!(matches!(&hits[1], TipSearchHit::External(s) if s.category == "Fixed"));
    }

    #[tokio::test]
    async fn test_search_swallows_provider_failures() {
        let failing = Arc::new(FailingProvider {
            calls: AtomicUsize::new(0),
        });
        let svc = TipService::new(
            stocked_store(),
            vec![
                failing.clone() as Arc<dyn SummaryProvider>,
                Arc::new(FixedProvider),
            ],
        );

        let hits = svc.search_tips("vaccine").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_search_not_found_when_everything_is_empty() {
        let svc = TipService::new(
            Arc::new(MemoryStore::new()),
            vec![
                Arc::new(FailingProvider {
                    calls: AtomicUsize::new(0),
                }),
                Arc::new(SilentProvider),
            ],
        );

        let err = svc.search_tips("xyz123notfound").await.unwrap_err();
        assert!(matches!(err, MedcareError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_search_external_results_alone_are_enough() {
        let svc = TipService::new(Arc::new(MemoryStore::new()), vec![Arc::new(FixedProvider)]);
        let hits = svc.search_tips("asthma").await.unwrap();
        assert_eq!(hits[0].title(), "asthma");
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let svc = TipService::new(stocked_store(), vec![]);
        assert!(matches!(
            svc.search_tips("  ").await,
            Err(MedcareError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_random_tip_on_empty_store_is_not_found() {
        let svc = TipService::new(Arc::new(MemoryStore::new()), vec![]);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            svc.random_tip(&mut rng),
            Err(MedcareError::NotFound(_))
        ));
    }

    #[test]
    fn test_random_tip_always_returns_a_stored_tip() {
        let store = stocked_store();
        let stored = store.list_tips().unwrap();
        let svc = TipService::new(store, vec![]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let tip = svc.random_tip(&mut rng).unwrap();
            assert!(stored.contains(&tip));
            seen.insert(tip.id);
        }
        assert_eq!(seen.len(), stored.len());
    }

    #[test]
    fn test_random_tip_is_deterministic_for_a_seed() {
        let svc = TipService::new(stocked_store(), vec![]);
        let first = svc.random_tip(&mut StdRng::seed_from_u64(9)).unwrap();
        let second = svc.random_tip(&mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(first, second);
    }
}

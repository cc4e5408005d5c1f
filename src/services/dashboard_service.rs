use crate::models::DashboardCounts;
use crate::store::{Collection, SharedStore};

use super::ServiceError;

#[derive(Clone)]
pub struct DashboardService {
    store: SharedStore,
}

impl DashboardService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Document counts per collection, fetched one collection at a time.
    pub async fn counts(&self) -> Result<DashboardCounts, ServiceError> {
        Ok(DashboardCounts {
            users: self.count(Collection::Users).await?,
            gyms: self.count(Collection::Gyms).await?,
            diet_plans: self.count(Collection::DietPlans).await?,
            events: self.count(Collection::Events).await?,
        })
    }

    async fn count(&self, collection: Collection) -> Result<usize, ServiceError> {
        let documents = self.store.list(collection).await.map_err(|e| {
            tracing::error!("Failed to count {}: {}", collection, e);
            e
        })?;
        Ok(documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Document, Fields, MockDocumentStore};
    use mockall::Sequence;
    use std::sync::Arc;

    fn docs(n: usize) -> Vec<Document> {
        (0..n).map(|i| Document::new(i.to_string(), Fields::new())).collect()
    }

    #[tokio::test]
    async fn test_counts_each_collection_in_order() {
        let mut store = MockDocumentStore::new();
        let mut seq = Sequence::new();
        for (collection, n) in [
            (Collection::Users, 3),
            (Collection::Gyms, 2),
            (Collection::DietPlans, 1),
            (Collection::Events, 0),
        ] {
            store
                .expect_list()
                .withf(move |c| *c == collection)
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| Ok(docs(n)));
        }

        let counts = DashboardService::new(Arc::new(store)).counts().await.unwrap();
        assert_eq!(
            counts,
            DashboardCounts {
                users: 3,
                gyms: 2,
                diet_plans: 1,
                events: 0
            }
        );
    }

    #[tokio::test]
    async fn test_first_failure_stops_the_sequence() {
        let mut store = MockDocumentStore::new();
        store
            .expect_list()
            .withf(|c| *c == Collection::Users)
            .times(1)
            .returning(|_| Err(crate::store::StoreError::PermissionDenied("denied".to_string())));

        let result = DashboardService::new(Arc::new(store)).counts().await;
        assert!(result.is_err());
    }
}

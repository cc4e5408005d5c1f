use crate::models::AppUser;
use crate::store::SharedStore;

use super::records::list;
use super::ServiceError;

#[derive(Clone)]
pub struct UserService {
    store: SharedStore,
}

impl UserService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<AppUser>, ServiceError> {
        list::<AppUser>(self.store.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Collection, MemoryStore, MockDocumentStore, StoreError};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list_users() {
        let store = MemoryStore::new();
        store
            .insert(
                Collection::Users,
                "u1",
                json!({"firstName": "Asha", "lastName": "Rao", "weight": "61"})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .await;

        let users = UserService::new(Arc::new(store)).list().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].full_name(), "Asha Rao");
        assert_eq!(users[0].weight, Some(61.0));
    }

    #[tokio::test]
    async fn test_list_failure_is_surfaced() {
        let mut store = MockDocumentStore::new();
        store.expect_list().returning(|_| {
            Err(StoreError::Remote {
                status: 503,
                message: "unavailable".to_string(),
            })
        });

        let result = UserService::new(Arc::new(store)).list().await;
        assert!(matches!(result, Err(ServiceError::Store(StoreError::Remote { status: 503, .. }))));
    }
}

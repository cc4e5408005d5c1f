use crate::models::{DietPlan, DietPlanDraft, Record};
use crate::store::{to_fields, SharedStore};

use super::records::{fetch, fetch_document, list};
use super::ServiceError;

#[derive(Clone)]
pub struct DietPlanService {
    store: SharedStore,
}

impl DietPlanService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<DietPlan>, ServiceError> {
        list::<DietPlan>(self.store.as_ref()).await
    }

    pub async fn get(&self, id: &str) -> Result<DietPlan, ServiceError> {
        fetch::<DietPlan>(self.store.as_ref(), id).await
    }

    /// Validate the draft and store it as one document.
    pub async fn create(&self, draft: DietPlanDraft) -> Result<DietPlan, ServiceError> {
        let mut plan = draft.submit()?;

        let id = self
            .store
            .create(DietPlan::COLLECTION, to_fields(&plan)?)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create diet plan: {}", e);
                e
            })?;

        tracing::info!("Created diet plan {} ({})", id, plan.dietary_preference);
        plan.id = id;
        Ok(plan)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        fetch_document::<DietPlan>(self.store.as_ref(), id).await?;

        self.store
            .delete(DietPlan::COLLECTION, id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete diet plan {}: {}", id, e);
                e
            })?;

        tracing::info!("Deleted diet plan {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealEntryForm, MealSlot};
    use crate::store::{Collection, DocumentStore, MemoryStore, MockDocumentStore};
    use serde_json::json;
    use std::sync::Arc;

    fn complete_draft() -> DietPlanDraft {
        let mut draft = DietPlanDraft::new();
        draft.dietary_preference = "High Protein".to_string();
        draft.calories = Some(2200.0);
        for slot in MealSlot::ALL {
            *draft.entry_mut(slot, 0).unwrap() = MealEntryForm {
                name: format!("{} bowl", slot),
                image_url: "https://cdn.example.com/bowl.png".to_string(),
                calories: Some(400.0),
                carbs: "40g".to_string(),
                fat: "10g".to_string(),
                protein: "35g".to_string(),
            };
        }
        draft
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryStore::new();
        let service = DietPlanService::new(Arc::new(store.clone()));

        let created = service.create(complete_draft()).await.unwrap();
        assert_eq!(created.id.len(), 20);

        let fetched = service.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);

        let doc = store.get(Collection::DietPlans, &created.id).await.unwrap().unwrap();
        assert_eq!(doc.fields["snacks"][0]["name"], json!("snacks bowl"));
        assert!(!doc.fields.contains_key("id"));
    }

    #[tokio::test]
    async fn test_invalid_draft_is_never_written() {
        let mut store = MockDocumentStore::new();
        store.expect_create().times(0);

        let mut draft = complete_draft();
        draft.entry_mut(MealSlot::Dinner, 0).unwrap().name.clear();

        let result = DietPlanService::new(Arc::new(store)).create(draft).await;
        match result {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors.get("dinner.0.name"), Some("Name is required"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        let service = DietPlanService::new(Arc::new(store.clone()));
        let created = service.create(complete_draft()).await.unwrap();

        service.delete(&created.id).await.unwrap();
        assert_eq!(store.len(Collection::DietPlans).await, 0);

        assert!(matches!(
            service.delete(&created.id).await,
            Err(ServiceError::NotFound { .. })
        ));
    }
}

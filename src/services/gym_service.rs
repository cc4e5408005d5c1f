use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::{ApprovalStatus, Gym, GymTier, Record, Transaction, TransactionStatus};
use crate::store::{Fields, SharedStore};

use super::records::{decode_one, fetch, fetch_document, list};
use super::ServiceError;

/// Gyms past the approval step, plus how many are still waiting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociatedGyms {
    pub gyms: Vec<Gym>,
    pub pending_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GymTransactions {
    pub gym_id: String,
    pub gym_name: String,
    pub transactions: Vec<Transaction>,
}

#[derive(Clone)]
pub struct GymService {
    store: SharedStore,
}

impl GymService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list_associated(&self) -> Result<AssociatedGyms, ServiceError> {
        let (pending, gyms): (Vec<Gym>, Vec<Gym>) = list::<Gym>(self.store.as_ref())
            .await?
            .into_iter()
            .partition(|gym| gym.approval_status.is_pending());

        Ok(AssociatedGyms {
            gyms,
            pending_count: pending.len(),
        })
    }

    pub async fn list_pending(&self) -> Result<Vec<Gym>, ServiceError> {
        Ok(list::<Gym>(self.store.as_ref())
            .await?
            .into_iter()
            .filter(|gym| gym.approval_status.is_pending())
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<Gym, ServiceError> {
        fetch::<Gym>(self.store.as_ref(), id).await
    }

    /// Pending -> Approved. Without an explicit tier the owner's requested tier is granted.
    pub async fn approve(&self, id: &str, tier: Option<GymTier>) -> Result<Gym, ServiceError> {
        let mut gym = self.pending_gym(id).await?;
        let tier = tier.or(gym.requested_tier);

        let mut fields = Fields::new();
        fields.insert("isApproved".to_string(), json!(ApprovalStatus::Approved));
        if let Some(tier) = tier {
            fields.insert("gym_type".to_string(), json!(tier));
        }

        self.write(id, fields).await?;
        tracing::info!("Approved gym {} with tier {:?}", id, tier);

        gym.approval_status = ApprovalStatus::Approved;
        if tier.is_some() {
            gym.tier = tier;
        }
        Ok(gym)
    }

    /// Pending -> Not-Approved. The tier is left untouched.
    pub async fn reject(&self, id: &str) -> Result<Gym, ServiceError> {
        let mut gym = self.pending_gym(id).await?;

        let mut fields = Fields::new();
        fields.insert("isApproved".to_string(), json!(ApprovalStatus::NotApproved));

        self.write(id, fields).await?;
        tracing::info!("Rejected gym {}", id);

        gym.approval_status = ApprovalStatus::NotApproved;
        Ok(gym)
    }

    pub async fn transactions(&self, id: &str) -> Result<GymTransactions, ServiceError> {
        let gym = self.get(id).await?;
        Ok(GymTransactions {
            gym_id: gym.id,
            gym_name: gym.name,
            transactions: gym.transactions,
        })
    }

    /// Mark one embedded transaction as paid.
    ///
    /// The whole `transactions` array is written back, so concurrent edits to
    /// the same gym are last-write-wins. Unknown entry fields are preserved.
    pub async fn mark_transaction_paid(
        &self,
        id: &str,
        index: usize,
    ) -> Result<Transaction, ServiceError> {
        let document = fetch_document::<Gym>(self.store.as_ref(), id).await?;
        let gym: Gym = decode_one(&document)?;

        let current = gym
            .transactions
            .get(index)
            .ok_or_else(|| ServiceError::TransactionNotFound {
                gym_id: id.to_string(),
                index,
            })?;
        if current.status.is_paid() {
            return Err(ServiceError::InvalidTransition(format!(
                "Transaction {} of gym {} is already paid",
                index, id
            )));
        }

        let mut raw_transactions = match document.fields.get("transactions") {
            Some(Value::Array(entries)) => entries.clone(),
            _ => Vec::new(),
        };
        let entry = raw_transactions
            .get_mut(index)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| ServiceError::MalformedDocument {
                collection: Gym::COLLECTION,
                id: id.to_string(),
                reason: format!("transaction {} is not an object", index),
            })?;
        entry.insert(
            "transactionStatus".to_string(),
            Value::String(TransactionStatus::Paid.to_string()),
        );

        let mut fields = Fields::new();
        fields.insert("transactions".to_string(), Value::Array(raw_transactions));
        self.write(id, fields).await?;
        tracing::info!("Marked transaction {} of gym {} as paid", index, id);

        let mut paid = current.clone();
        paid.status = TransactionStatus::Paid;
        Ok(paid)
    }

    async fn pending_gym(&self, id: &str) -> Result<Gym, ServiceError> {
        let gym = self.get(id).await?;
        if !gym.approval_status.is_pending() {
            return Err(ServiceError::InvalidTransition(format!(
                "Gym {} is not pending ({})",
                id, gym.approval_status
            )));
        }
        Ok(gym)
    }

    async fn write(&self, id: &str, fields: Fields) -> Result<(), ServiceError> {
        self.store
            .update(Gym::COLLECTION, id, fields)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update gym {}: {}", id, e);
                ServiceError::from(e)
            })
    }
}

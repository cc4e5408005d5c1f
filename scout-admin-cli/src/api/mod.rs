use anyhow::Context;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use scout_admin::auth::{AdminSession, AuthResponse};
use scout_admin::models::{
    AppUser, DashboardCounts, DietPlan, DietPlanDraft, DietPlanSummary, Event, EventCategories,
    EventForm, Gym, GymTier, Transaction,
};
use scout_admin::services::{AssociatedGyms, GymTransactions};

use crate::config::Config;

mod error;

pub use error::ApiError;

/// Login request payload
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ApproveRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<GymTier>,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// API client for the admin server. One request per call, never retried.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config, token: Option<&str>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::NotLoggedIn)?;
        Ok(self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Request failed with {}: {}", status, body);
            Err(ApiError::from_status(status, body))
        }
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, body))
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path)?).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/api/auth/login", self.base_url);
        tracing::debug!("Logging in as {}", email);

        self.send(self.client.post(&url).json(&LoginRequest { email, password }))
            .await
    }

    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        self.send(self.request(Method::POST, "/api/auth/logout")?).await
    }

    pub async fn session(&self) -> Result<AdminSession, ApiError> {
        self.get("/api/auth/session").await
    }

    pub async fn dashboard(&self) -> Result<DashboardCounts, ApiError> {
        self.get("/api/dashboard").await
    }

    pub async fn users(&self) -> Result<Vec<AppUser>, ApiError> {
        self.get("/api/users").await
    }

    pub async fn gyms(&self) -> Result<AssociatedGyms, ApiError> {
        self.get("/api/gyms").await
    }

    pub async fn pending_gyms(&self) -> Result<Vec<Gym>, ApiError> {
        self.get("/api/gyms/pending").await
    }

    pub async fn gym(&self, id: &str) -> Result<Gym, ApiError> {
        self.get(&format!("/api/gyms/{}", id)).await
    }

    pub async fn approve_gym(&self, id: &str, tier: Option<GymTier>) -> Result<Gym, ApiError> {
        let request = self
            .request(Method::POST, &format!("/api/gyms/{}/approve", id))?
            .json(&ApproveRequest { tier });
        self.send(request).await
    }

    pub async fn reject_gym(&self, id: &str) -> Result<Gym, ApiError> {
        self.send(self.request(Method::POST, &format!("/api/gyms/{}/reject", id))?)
            .await
    }

    pub async fn transactions(&self, gym_id: &str) -> Result<GymTransactions, ApiError> {
        self.get(&format!("/api/gyms/{}/transactions", gym_id)).await
    }

    pub async fn pay_transaction(&self, gym_id: &str, index: usize) -> Result<Transaction, ApiError> {
        let path = format!("/api/gyms/{}/transactions/{}/pay", gym_id, index);
        self.send(self.request(Method::POST, &path)?).await
    }

    pub async fn diet_plans(&self) -> Result<Vec<DietPlanSummary>, ApiError> {
        self.get("/api/diet-plans").await
    }

    pub async fn diet_plan(&self, id: &str) -> Result<DietPlan, ApiError> {
        self.get(&format!("/api/diet-plans/{}", id)).await
    }

    pub async fn create_diet_plan(&self, draft: &DietPlanDraft) -> Result<DietPlan, ApiError> {
        self.send(self.request(Method::POST, "/api/diet-plans")?.json(draft))
            .await
    }

    pub async fn delete_diet_plan(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/api/diet-plans/{}", id))?)
            .await
    }

    pub async fn events(&self) -> Result<EventCategories, ApiError> {
        self.get("/api/events").await
    }

    pub async fn event(&self, id: &str) -> Result<Event, ApiError> {
        self.get(&format!("/api/events/{}", id)).await
    }

    pub async fn create_event(&self, form: &EventForm) -> Result<Event, ApiError> {
        self.send(self.request(Method::POST, "/api/events")?.json(form))
            .await
    }

    pub async fn update_event(&self, id: &str, form: &EventForm) -> Result<Event, ApiError> {
        self.send(self.request(Method::PUT, &format!("/api/events/{}", id))?.json(form))
            .await
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/api/events/{}", id))?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let client = ApiClient::new(&Config::default(), None);
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_protected_calls_need_a_token() {
        let client = ApiClient::new(&Config::default(), None).unwrap();
        let result = client.dashboard().await;
        assert!(matches!(result, Err(ApiError::NotLoggedIn)));
    }
}

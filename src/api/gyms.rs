use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use super::extractors::ApiRejection;
use super::routes::AppState;
use crate::models::{Gym, GymTier, Transaction};
use crate::services::{AssociatedGyms, GymTransactions, ServiceError};

#[derive(Debug, Default, Deserialize)]
pub struct ApproveRequest {
    #[serde(default)]
    pub tier: Option<GymTier>,
}

pub fn gym_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_gyms))
        .route("/pending", get(list_pending))
        .route("/:gym_id", get(get_gym))
        .route("/:gym_id/approve", post(approve_gym))
        .route("/:gym_id/reject", post(reject_gym))
        .route("/:gym_id/transactions", get(get_transactions))
        .route("/:gym_id/transactions/:index/pay", post(pay_transaction))
        .with_state(state)
}

/// Approved and rejected gyms, plus the size of the approval queue
#[tracing::instrument(skip(state))]
async fn list_gyms(State(state): State<AppState>) -> Result<Json<AssociatedGyms>, ServiceError> {
    Ok(Json(state.gym_service.list_associated().await?))
}

#[tracing::instrument(skip(state))]
async fn list_pending(State(state): State<AppState>) -> Result<Json<Vec<Gym>>, ServiceError> {
    Ok(Json(state.gym_service.list_pending().await?))
}

#[tracing::instrument(skip(state))]
async fn get_gym(
    State(state): State<AppState>,
    Path(gym_id): Path<String>,
) -> Result<Json<Gym>, ServiceError> {
    Ok(Json(state.gym_service.get(&gym_id).await?))
}

#[tracing::instrument(skip(state, request))]
async fn approve_gym(
    State(state): State<AppState>,
    Path(gym_id): Path<String>,
    WithRejection(Json(request), _): WithRejection<Json<ApproveRequest>, ApiRejection>,
) -> Result<Json<Gym>, ServiceError> {
    Ok(Json(state.gym_service.approve(&gym_id, request.tier).await?))
}

#[tracing::instrument(skip(state))]
async fn reject_gym(
    State(state): State<AppState>,
    Path(gym_id): Path<String>,
) -> Result<Json<Gym>, ServiceError> {
    Ok(Json(state.gym_service.reject(&gym_id).await?))
}

#[tracing::instrument(skip(state))]
async fn get_transactions(
    State(state): State<AppState>,
    Path(gym_id): Path<String>,
) -> Result<Json<GymTransactions>, ServiceError> {
    Ok(Json(state.gym_service.transactions(&gym_id).await?))
}

#[tracing::instrument(skip(state))]
async fn pay_transaction(
    State(state): State<AppState>,
    Path((gym_id, index)): Path<(String, usize)>,
) -> Result<Json<Transaction>, ServiceError> {
    Ok(Json(
        state.gym_service.mark_transaction_paid(&gym_id, index).await?,
    ))
}

use axum::{extract::State, response::Json, routing::get, Router};

use super::routes::AppState;
use crate::models::DashboardCounts;
use crate::services::ServiceError;

pub fn dashboard_routes(state: AppState) -> Router {
    Router::new().route("/", get(get_counts)).with_state(state)
}

#[tracing::instrument(skip(state))]
async fn get_counts(State(state): State<AppState>) -> Result<Json<DashboardCounts>, ServiceError> {
    let counts = state.dashboard_service.counts().await?;
    Ok(Json(counts))
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;

use super::extractors::ApiRejection;
use super::routes::AppState;
use crate::models::{DietPlan, DietPlanDraft, DietPlanSummary};
use crate::services::ServiceError;

pub fn diet_plan_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/:plan_id", get(get_plan).delete(delete_plan))
        .with_state(state)
}

#[tracing::instrument(skip(state))]
async fn list_plans(State(state): State<AppState>) -> Result<Json<Vec<DietPlanSummary>>, ServiceError> {
    let plans = state.diet_plan_service.list().await?;
    Ok(Json(plans.iter().map(DietPlan::summary).collect()))
}

#[tracing::instrument(skip(state, draft))]
async fn create_plan(
    State(state): State<AppState>,
    WithRejection(Json(draft), _): WithRejection<Json<DietPlanDraft>, ApiRejection>,
) -> Result<(StatusCode, Json<DietPlan>), ServiceError> {
    let plan = state.diet_plan_service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

#[tracing::instrument(skip(state))]
async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<Json<DietPlan>, ServiceError> {
    Ok(Json(state.diet_plan_service.get(&plan_id).await?))
}

#[tracing::instrument(skip(state))]
async fn delete_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    state.diet_plan_service.delete(&plan_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

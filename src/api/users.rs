use axum::{extract::State, response::Json, routing::get, Router};

use super::routes::AppState;
use crate::models::AppUser;
use crate::services::ServiceError;

pub fn user_routes(state: AppState) -> Router {
    Router::new().route("/", get(list_users)).with_state(state)
}

#[tracing::instrument(skip(state))]
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<AppUser>>, ServiceError> {
    let users = state.user_service.list().await?;
    Ok(Json(users))
}

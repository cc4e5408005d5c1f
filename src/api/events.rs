use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;
use chrono::{Local, Utc};

use super::extractors::ApiRejection;
use super::routes::AppState;
use crate::models::{Event, EventCategories, EventForm};
use crate::services::ServiceError;

pub fn event_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:event_id", get(get_event).put(update_event).delete(delete_event))
        .with_state(state)
}

/// Events grouped into past, today and upcoming by the server's local date.
/// Clients in another zone regroup with `categorize_events`.
#[tracing::instrument(skip(state))]
async fn list_events(State(state): State<AppState>) -> Result<Json<EventCategories>, ServiceError> {
    let now = Local::now();
    Ok(Json(state.event_service.list_categorized(&now).await?))
}

#[tracing::instrument(skip(state, form))]
async fn create_event(
    State(state): State<AppState>,
    WithRejection(Json(form), _): WithRejection<Json<EventForm>, ApiRejection>,
) -> Result<(StatusCode, Json<Event>), ServiceError> {
    let event = state.event_service.create(form, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[tracing::instrument(skip(state))]
async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<Event>, ServiceError> {
    Ok(Json(state.event_service.get(&event_id).await?))
}

#[tracing::instrument(skip(state, form))]
async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    WithRejection(Json(form), _): WithRejection<Json<EventForm>, ApiRejection>,
) -> Result<Json<Event>, ServiceError> {
    Ok(Json(
        state.event_service.update(&event_id, form, Utc::now()).await?,
    ))
}

#[tracing::instrument(skip(state))]
async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    state.event_service.delete(&event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use super::auth::auth_routes;
use super::dashboard::dashboard_routes;
use super::diet_plans::diet_plan_routes;
use super::events::event_routes;
use super::gyms::gym_routes;
use super::health::health_check;
use super::users::user_routes;
use crate::auth::{cors_layer, jwt_auth_middleware, security_headers_layer, AuthService};
use crate::services::{
    DashboardService, DietPlanService, EventService, GymService, UserService,
};
use crate::store::SharedStore;

/// Services shared by the dashboard handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub user_service: UserService,
    pub gym_service: GymService,
    pub diet_plan_service: DietPlanService,
    pub event_service: EventService,
}

impl AppState {
    pub fn new(store: SharedStore, auth_service: AuthService) -> Self {
        Self {
            auth_service,
            dashboard_service: DashboardService::new(store.clone()),
            user_service: UserService::new(store.clone()),
            gym_service: GymService::new(store.clone()),
            diet_plan_service: DietPlanService::new(store.clone()),
            event_service: EventService::new(store),
        }
    }
}

pub fn create_routes(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/dashboard", dashboard_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .nest("/gyms", gym_routes(state.clone()))
        .nest("/diet-plans", diet_plan_routes(state.clone()))
        .nest("/events", event_routes(state.clone()))
        .route_layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes(state.auth_service.clone()))
        .nest("/api", protected)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(security_headers_layer())
        .layer(cors_layer())
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "message": format!("No route for {}", uri.path()),
        })),
    )
}

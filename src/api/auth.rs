use axum::{
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use axum::extract::State;
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use super::extractors::ValidatedJson;
use crate::auth::{
    jwt_auth_middleware, AdminSession, AuthError, AuthResponse, AuthService, LoginRequest,
    MessageResponse,
};

/// Authentication routes
pub fn auth_routes(auth_service: AuthService) -> Router {
    Router::new()
        .route("/login", post(login))
        .route(
            "/logout",
            post(logout).route_layer(middleware::from_fn_with_state(
                auth_service.clone(),
                jwt_auth_middleware,
            )),
        )
        .route(
            "/session",
            get(session).route_layer(middleware::from_fn_with_state(
                auth_service.clone(),
                jwt_auth_middleware,
            )),
        )
        .with_state(auth_service)
}

/// Login administrator
#[tracing::instrument(skip(auth_service, request))]
async fn login(
    State(auth_service): State<AuthService>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = auth_service.login(request).await?;
    Ok(Json(response))
}

/// Logout administrator
#[tracing::instrument(skip(auth_service, bearer))]
async fn logout(
    State(auth_service): State<AuthService>,
    TypedHeader(bearer): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<MessageResponse>, AuthError> {
    let response = auth_service.logout(bearer.token()).await?;
    Ok(Json(response))
}

/// Current session
#[tracing::instrument(skip(session))]
async fn session(Extension(session): Extension<AdminSession>) -> Json<AdminSession> {
    Json(session)
}

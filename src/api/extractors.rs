use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use validator::Validate;

use crate::models::FormErrors;

/// Request body rejections, rendered in the same JSON shape as other API errors.
#[derive(Error, Debug)]
pub enum ApiRejection {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    Validation(FormErrors),
}

impl IntoResponse for ApiRejection {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiRejection::InvalidJson(rejection) => (
                rejection.status(),
                json!({
                    "error": "Invalid JSON",
                    "message": rejection.body_text(),
                }),
            ),
            ApiRejection::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "Validation failed",
                    "message": "Validation failed",
                    "fields": fields,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body that has passed its `validator` rules.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;

        data.validate()
            .map_err(|errors| ApiRejection::Validation(FormErrors::from(errors)))?;

        Ok(ValidatedJson(data))
    }
}

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

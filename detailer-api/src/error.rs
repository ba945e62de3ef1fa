use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use detailer_core::PricingError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Input the engine refuses to price
    #[error(transparent)]
    Pricing(PricingError),
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error("{0}")]
    Internal(String),
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::Overflow { .. } => AppError::Internal(err.to_string()),
            PricingError::InvalidMargin { .. } | PricingError::Validation(_) => {
                AppError::Pricing(err)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Pricing(err) => {
                tracing::debug!("Rejected pricing input: {}", err);
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            AppError::Json(rejection) => {
                tracing::debug!("Malformed request body: {}", rejection.body_text());
                (rejection.status(), rejection.body_text())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

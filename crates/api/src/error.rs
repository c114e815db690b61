use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use patient_register_db::StoreError;

use crate::render::render_error_page;

/// Message shown to the user whenever a request fails for a reason they
/// cannot fix. Details go to the log only.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Shown when the store could not be opened at startup.
pub const STORAGE_UNAVAILABLE: &str = "Patient storage is unavailable. Please try again later.";

/// Application-level error type for HTTP handlers.
///
/// Validation failures and missing records never get here; handlers turn
/// those into flash messages. What remains are failures of the store, which
/// this type logs and renders as a generic error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Store(StoreError::Unavailable(reason)) => {
                tracing::error!(%reason, "Storage unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, STORAGE_UNAVAILABLE)
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE)
            }
        };

        (status, Html(render_error_page(message))).into_response()
    }
}

//! Route definitions for the patient register pages.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::patients;
use crate::state::AppState;

/// Patient routes mounted at the root.
///
/// ```text
/// GET    /               -> list_patients
/// POST   /               -> create_patient
/// POST   /delete/{id}    -> delete_patient
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route("/delete/{id}", post(patients::delete_patient))
}

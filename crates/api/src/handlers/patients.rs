//! Handlers for the patient listing, submission and deletion pages.
//!
//! The decision logic lives in [`submit_patient`] and [`remove_patient`],
//! which take a store and return the one-shot message to show next. The
//! Axum handlers only wire those to the request, the session's flash queue
//! and a redirect.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect};
use axum::Form;
use patient_register_core::flash::Flash;
use patient_register_core::patient::{validate_submission, PatientForm};
use patient_register_core::types::DbId;
use patient_register_db::{PatientStore, StoreError};

use crate::error::AppResult;
use crate::flash::Session;
use crate::render::render_index;
use crate::state::AppState;

/// Path every mutating request redirects back to.
pub const LISTING_PATH: &str = "/";

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Validate a submission and persist it if accepted.
///
/// A rejected submission leaves the store untouched and yields an error
/// message naming the reason. Only store failures are returned as `Err`.
pub async fn submit_patient(
    store: &dyn PatientStore,
    form: &PatientForm,
) -> Result<Flash, StoreError> {
    let draft = match validate_submission(form) {
        Ok(draft) => draft,
        Err(rejection) => {
            tracing::debug!(%rejection, "Patient submission rejected");
            return Ok(Flash::error(rejection.to_string()));
        }
    };

    let patient = store.create(&draft).await?;
    tracing::info!(patient_id = patient.id, "Patient created");

    Ok(Flash::patient_added(&patient.name))
}

/// Delete a patient by id.
///
/// An unknown id, including one deleted by a concurrent request between the
/// lookup and the delete, yields "Patient not found." rather than an error.
pub async fn remove_patient(store: &dyn PatientStore, id: DbId) -> Result<Flash, StoreError> {
    let Some(patient) = store.get_by_id(id).await? else {
        tracing::debug!(patient_id = id, "Delete requested for unknown patient");
        return Ok(Flash::patient_not_found());
    };

    if !store.delete_by_id(id).await? {
        tracing::debug!(patient_id = id, "Patient already deleted");
        return Ok(Flash::patient_not_found());
    }
    tracing::info!(patient_id = id, "Patient deleted");

    Ok(Flash::patient_removed(&patient.name))
}

// ---------------------------------------------------------------------------
// HTTP handlers
// ---------------------------------------------------------------------------

/// GET /
///
/// Render every patient, newest first, with any pending messages. Messages
/// are taken only after the listing succeeds so a failed render does not
/// swallow them.
pub async fn list_patients(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let patients = state.store.list_all_descending().await?;
    let flashes = state.flashes.take(session.id).await;

    Ok((session, Html(render_index(&patients, &flashes))))
}

/// POST /
///
/// Form fields: `name`, `age`, `gender`, `problem`. Always redirects back to
/// the listing; the outcome travels as a flash message.
pub async fn create_patient(
    session: Session,
    State(state): State<AppState>,
    Form(form): Form<PatientForm>,
) -> AppResult<impl IntoResponse> {
    let flash = submit_patient(state.store.as_ref(), &form).await?;
    state.flashes.push(session.id, flash).await;

    Ok((session, Redirect::to(LISTING_PATH)))
}

/// POST /delete/{id}
pub async fn delete_patient(
    session: Session,
    State(state): State<AppState>,
    Path(patient_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let flash = remove_patient(state.store.as_ref(), patient_id).await?;
    state.flashes.push(session.id, flash).await;

    Ok((session, Redirect::to(LISTING_PATH)))
}

//! Tests for store-failure handling at the HTTP boundary.
//!
//! A failing store must produce a generic error page, never a crash, and the
//! same router must keep serving afterwards.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{body_string, build_test_app, get, post_form};
use patient_register_api::error::{AppError, GENERIC_FAILURE, STORAGE_UNAVAILABLE};
use patient_register_core::patient::PatientDraft;
use patient_register_core::types::DbId;
use patient_register_db::models::patient::Patient;
use patient_register_db::{PatientStore, SqlitePatientStore, StoreError, UnavailableStore};

/// Wraps a real store and fails every call while `broken` is set.
struct FlakyStore {
    inner: SqlitePatientStore,
    broken: AtomicBool,
}

impl FlakyStore {
    fn check(&self) -> Result<(), StoreError> {
        if self.broken.load(Ordering::SeqCst) {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PatientStore for FlakyStore {
    async fn create(&self, draft: &PatientDraft) -> Result<Patient, StoreError> {
        self.check()?;
        self.inner.create(draft).await
    }

    async fn list_all_descending(&self) -> Result<Vec<Patient>, StoreError> {
        self.check()?;
        self.inner.list_all_descending().await
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Patient>, StoreError> {
        self.check()?;
        self.inner.get_by_id(id).await
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        self.check()?;
        self.inner.delete_by_id(id).await
    }

    async fn count(&self) -> Result<i64, StoreError> {
        self.check()?;
        self.inner.count().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()?;
        self.inner.ping().await
    }
}

async fn flaky_store() -> Arc<FlakyStore> {
    Arc::new(FlakyStore {
        inner: SqlitePatientStore::in_memory().await.unwrap(),
        broken: AtomicBool::new(true),
    })
}

// ---------------------------------------------------------------------------
// Test: AppError renders a generic page with the right status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn database_error_renders_generic_500() {
    let response = AppError::Store(StoreError::Database(sqlx::Error::PoolTimedOut)).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let page = body_string(response).await;
    assert!(page.contains(GENERIC_FAILURE));
    assert!(!page.contains("PoolTimedOut"));
}

#[tokio::test]
async fn unavailable_store_renders_503() {
    let response =
        AppError::Store(StoreError::Unavailable("connection refused".into())).into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let page = body_string(response).await;
    assert!(page.contains(STORAGE_UNAVAILABLE));
    assert!(!page.contains("connection refused"));
}

// ---------------------------------------------------------------------------
// Test: failing requests do not take the router down
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_on_listing_is_contained() {
    let store = flaky_store().await;
    let app = build_test_app(store.clone());

    let failed = get(&app, "/", None).await;
    assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(failed).await.contains(GENERIC_FAILURE));

    store.broken.store(false, Ordering::SeqCst);
    let recovered = get(&app, "/", None).await;
    assert_eq!(recovered.status(), StatusCode::OK);
}

#[tokio::test]
async fn store_failure_on_submit_and_delete_is_contained() {
    let store = flaky_store().await;
    let app = build_test_app(store.clone());

    let submit = post_form(&app, "/", "name=Jane&age=34&gender=F&problem=fever", None).await;
    assert_eq!(submit.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let delete = post_form(&app, "/delete/1", "", None).await;
    assert_eq!(delete.status(), StatusCode::INTERNAL_SERVER_ERROR);

    store.broken.store(false, Ordering::SeqCst);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn validation_still_answers_while_store_is_down() {
    let app = build_test_app(Arc::new(UnavailableStore::new("down")));

    let response = post_form(&app, "/", "name=&age=&gender=&problem=", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn unavailable_store_fails_fast_with_clear_message() {
    let app = build_test_app(Arc::new(UnavailableStore::new("down")));

    let listing = get(&app, "/", None).await;
    assert_eq!(listing.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_string(listing).await.contains(STORAGE_UNAVAILABLE));

    let submit = post_form(&app, "/", "name=Jane&age=34&gender=F&problem=fever", None).await;
    assert_eq!(submit.status(), StatusCode::SERVICE_UNAVAILABLE);
}

//! Persistence for the patient register.
//!
//! The [`PatientStore`] trait is the only way the HTTP layer touches the
//! `patients` table. [`connect`] picks a backend from the connection URL,
//! builds a pool, checks it, and applies the embedded schema migrations.

use std::sync::Arc;

pub mod models;
pub mod repositories;
pub mod store;

pub use repositories::{PgPatientStore, SqlitePatientStore};
pub use store::{PatientStore, StoreError, UnavailableStore};

/// Backing database, selected by URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    /// Detect the backend from a connection URL.
    ///
    /// `postgres://` and `postgresql://` select Postgres, `sqlite:` selects
    /// SQLite. Anything else is rejected.
    pub fn from_url(database_url: &str) -> Result<Self, StoreError> {
        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            Ok(Backend::Postgres)
        } else if database_url.starts_with("sqlite:") {
            Ok(Backend::Sqlite)
        } else {
            Err(StoreError::Unavailable(format!(
                "unsupported database URL scheme: {}",
                redact(database_url)
            )))
        }
    }
}

/// Connect to the store named by `database_url` and make sure its schema exists.
///
/// The URL must already be resolved (defaults applied, provider parameters
/// appended); no rewriting happens here.
pub async fn connect(database_url: &str) -> Result<Arc<dyn PatientStore>, StoreError> {
    let backend = Backend::from_url(database_url)?;
    tracing::info!(?backend, url = %redact(database_url), "Connecting to patient store");

    let store: Arc<dyn PatientStore> = match backend {
        Backend::Postgres => {
            let store = PgPatientStore::connect(database_url).await?;
            store.run_migrations().await?;
            Arc::new(store)
        }
        Backend::Sqlite => {
            let store = SqlitePatientStore::connect(database_url).await?;
            store.run_migrations().await?;
            Arc::new(store)
        }
    };
    tracing::info!("Database migrations applied");

    store.ping().await?;
    tracing::info!("Database health check passed");

    Ok(store)
}

/// Strip credentials from a connection URL for logging.
pub fn redact(database_url: &str) -> String {
    match (database_url.find("://"), database_url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &database_url[..scheme_end], &database_url[at..])
        }
        _ => database_url.to_string(),
    }
}

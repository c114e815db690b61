//! Session-scoped one-shot message queue.
//!
//! A browser is identified by a random `session` cookie. Handlers that
//! redirect push a [`Flash`] onto that session's queue; the next page render
//! takes (and thereby clears) everything pending.

use std::collections::HashMap;
use std::convert::Infallible;
use std::time::{Duration, Instant};

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::{IntoResponseParts, ResponseParts};
use patient_register_core::flash::Flash;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session";

/// Messages kept per session; older ones are dropped first.
const MAX_PENDING_PER_SESSION: usize = 16;

/// Above this many sessions, stale queues are pruned on push.
const PRUNE_THRESHOLD: usize = 1024;

/// Pending messages nobody came back for are dropped after this long.
const STALE_AFTER: Duration = Duration::from_secs(300);

struct Pending {
    queued_at: Instant,
    messages: Vec<Flash>,
}

/// Pending flash messages keyed by session id.
///
/// Thread-safe via interior `RwLock`; shared through `Arc` in `AppState`.
#[derive(Default)]
pub struct FlashQueue {
    sessions: RwLock<HashMap<Uuid, Pending>>,
}

impl FlashQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message for the session's next page render.
    pub async fn push(&self, session: Uuid, flash: Flash) {
        let mut sessions = self.sessions.write().await;

        if sessions.len() >= PRUNE_THRESHOLD {
            let now = Instant::now();
            sessions.retain(|_, p| now.duration_since(p.queued_at) < STALE_AFTER);
        }

        let pending = sessions.entry(session).or_insert_with(|| Pending {
            queued_at: Instant::now(),
            messages: Vec::new(),
        });
        pending.queued_at = Instant::now();
        if pending.messages.len() >= MAX_PENDING_PER_SESSION {
            pending.messages.remove(0);
        }
        pending.messages.push(flash);
    }

    /// Remove and return every message pending for the session, oldest first.
    pub async fn take(&self, session: Uuid) -> Vec<Flash> {
        self.sessions
            .write()
            .await
            .remove(&session)
            .map(|p| p.messages)
            .unwrap_or_default()
    }

    /// Number of sessions with undelivered messages.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// The browser session of the current request.
///
/// Extracting never fails: a request without a valid `session` cookie gets a
/// fresh id, and returning the `Session` as a response part sets the cookie.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub id: Uuid,
    is_new: bool,
}

impl Session {
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    fn from_headers(parts: &Parts) -> Option<Uuid> {
        parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(match Self::from_headers(parts) {
            Some(id) => Session { id, is_new: false },
            None => Session {
                id: Uuid::new_v4(),
                is_new: true,
            },
        })
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if self.is_new {
            let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                res.headers_mut().append(SET_COOKIE, value);
            }
        }
        Ok(res)
    }
}

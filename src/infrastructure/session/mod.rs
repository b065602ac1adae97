use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::session::{RenderOutcome, SessionCache, SpeechForm};

pub const SESSION_COOKIE: &str = "tts_session";

/// Per-session data: the audio cache, the last submitted form and what its
/// render cycle showed
#[derive(Debug, Default)]
pub struct SessionState {
    pub cache: SessionCache,
    pub form: SpeechForm,
    pub outcome: RenderOutcome,
}

/// One browser session. The mutex is held for a whole render cycle, so cycles
/// within a session never overlap.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub state: Arc<Mutex<SessionState>>,
}

/// In-memory session registry with idle expiry
pub struct SessionStore {
    sessions: Cache<Uuid, Arc<Mutex<SessionState>>>,
}

impl SessionStore {
    pub fn new(max_sessions: u64, idle: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle) // refreshes on access
            .build();

        Self { sessions }
    }

    /// Look up `id`, or start a new empty session when it is unknown.
    ///
    /// The flag is true when a new session was created.
    pub async fn open(&self, id: Option<Uuid>) -> (Session, bool) {
        if let Some(id) = id {
            if let Some(state) = self.sessions.get(&id).await {
                return (Session { id, state }, false);
            }
        }

        let id = Uuid::new_v4();
        let state = Arc::new(Mutex::new(SessionState::default()));
        self.sessions.insert(id, state.clone()).await;
        tracing::debug!(session_id = %id, "Session created");

        (Session { id, state }, true)
    }
}

/// Read the session id from the `Cookie` header
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

pub fn session_cookie(id: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

/// Middleware attaching the caller's `Session` to request extensions
pub async fn session_middleware(
    State(store): State<Arc<SessionStore>>,
    mut request: Request,
    next: Next,
) -> Response {
    let (session, created) = store.open(session_id_from_headers(request.headers())).await;
    let session_id = session.id;

    request.extensions_mut().insert(session);

    let mut response = next.run(request).await;

    if created {
        if let Ok(value) = HeaderValue::from_str(&session_cookie(session_id)) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

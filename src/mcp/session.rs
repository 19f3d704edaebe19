// ABOUTME: Session lifecycle state machine and the process-wide session registry
// ABOUTME: Registry mutations are synchronous map operations; removal is the only close path
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session lifecycle and registry
//!
//! A session binds one client to one protocol-server instance, identified by
//! a cryptographically random UUID. Its state machine is
//! `Pending → Active → Closed` with `Closed` terminal; an ID is never reused
//! or resurrected. [`SessionRegistry::remove`] is the single authoritative
//! close path: explicit DELETE, transport disconnect, the idle reaper, and
//! process shutdown all funnel through it, and it is idempotent because
//! shutdown races (double-close) are expected.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::{mpsc, Notify};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, initialize not yet completed
    Pending,
    /// Initialize succeeded; session is serving requests
    Active,
    /// Terminal; no transitions out
    Closed,
}

/// A live client session bound to one protocol-server instance
pub struct Session {
    session_id: String,
    user_id: String,
    created_at: DateTime<Utc>,
    last_seen: Mutex<DateTime<Utc>>,
    state: Mutex<SessionState>,
    outbound_tx: mpsc::UnboundedSender<Value>,
    outbound_rx: Mutex<Option<mpsc::UnboundedReceiver<Value>>>,
    close_notify: Notify,
    dispatch_lock: tokio::sync::Mutex<()>,
}

impl Session {
    /// Create a pending session with a fresh cryptographically random ID
    #[must_use]
    pub fn new(user_id: &str) -> Arc<Self> {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let now = Utc::now();
        Arc::new(Self {
            session_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_owned(),
            created_at: now,
            last_seen: Mutex::new(now),
            state: Mutex::new(SessionState::Pending),
            outbound_tx,
            outbound_rx: Mutex::new(Some(outbound_rx)),
            close_notify: Notify::new(),
            dispatch_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Opaque session ID
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Owning user ID from the credential context at creation
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Creation timestamp
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Transition `Pending → Active` after a successful initialize.
    ///
    /// # Errors
    /// Returns `AppError::InvalidSession` if the session is already closed.
    pub fn activate(&self) -> AppResult<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match *state {
            SessionState::Closed => Err(AppError::invalid_session(format!(
                "Session {} is closed",
                self.session_id
            ))),
            SessionState::Pending | SessionState::Active => {
                *state = SessionState::Active;
                Ok(())
            }
        }
    }

    /// Transition to `Closed` and wake the SSE stream. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != SessionState::Closed {
            *state = SessionState::Closed;
            drop(state);
            self.close_notify.notify_waiters();
        }
    }

    /// Record request activity for the idle reaper
    pub fn touch(&self) {
        *self
            .last_seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Utc::now();
    }

    /// Seconds since the last request on this session
    #[must_use]
    pub fn idle_secs(&self) -> i64 {
        let last_seen = *self
            .last_seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        (Utc::now() - last_seen).num_seconds()
    }

    /// Take the outbound message receiver; only one SSE stream at a time
    #[must_use]
    pub fn take_outbound(&self) -> Option<mpsc::UnboundedReceiver<Value>> {
        self.outbound_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Queue a server-initiated message for the SSE stream
    pub fn notify(&self, message: Value) -> bool {
        self.outbound_tx.send(message).is_ok()
    }

    /// Resolve once the session transitions to `Closed`
    pub async fn wait_closed(&self) {
        let notified = self.close_notify.notified();
        if self.state() == SessionState::Closed {
            return;
        }
        notified.await;
    }

    /// Serialize dispatch so requests on one session run in arrival order
    pub async fn lock_dispatch(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }
}

/// Process-wide mapping from session ID to live session
///
/// Constructed at process start, injected into the transport layer, and torn
/// down at shutdown; never referenced as ambient global state.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Arc<Session>>,
}

impl SessionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly created session.
    ///
    /// # Errors
    /// Returns `AppError::DuplicateSession` if the ID is already registered
    /// (should not occur given random ID generation).
    pub fn create(&self, session: Arc<Session>) -> AppResult<()> {
        match self.sessions.entry(session.session_id().to_owned()) {
            Entry::Occupied(_) => Err(AppError::DuplicateSession(
                session.session_id().to_owned(),
            )),
            Entry::Vacant(slot) => {
                info!(
                    session_id = session.session_id(),
                    user_id = session.user_id(),
                    "Session created"
                );
                slot.insert(session);
                Ok(())
            }
        }
    }

    /// O(1) lookup; absence is an expected, handled case
    #[must_use]
    pub fn lookup(&self, session_id: &str) -> Option<Arc<Session>> {
        self.sessions
            .get(session_id)
            .map(|entry| entry.value().clone())
    }

    /// Remove and close a session; silent no-op on unknown IDs.
    ///
    /// Returns whether a session was actually removed.
    pub fn remove(&self, session_id: &str) -> bool {
        if let Some((_, session)) = self.sessions.remove(session_id) {
            session.close();
            info!(session_id = session_id, "Session removed");
            true
        } else {
            debug!(session_id = session_id, "Remove on unknown session ignored");
            false
        }
    }

    /// Number of live sessions
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Close every session; used at process shutdown so clients observe a
    /// clean stream termination rather than a dropped connection.
    pub fn close_all(&self) {
        let ids: Vec<String> = self.sessions.iter().map(|e| e.key().clone()).collect();
        for id in ids {
            self.remove(&id);
        }
    }

    /// Remove sessions idle for longer than `ttl_secs`; returns the count
    pub fn reap_idle(&self, ttl_secs: u64) -> usize {
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        let expired: Vec<String> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().idle_secs() > ttl)
            .map(|entry| entry.key().clone())
            .collect();
        let count = expired.len();
        for id in &expired {
            info!(session_id = %id, "Reaping idle session");
            self.remove(id);
        }
        count
    }
}

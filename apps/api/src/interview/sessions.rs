//! Server-managed mock interview sessions.
//!
//! Each session sits behind its own async mutex, held across the completion
//! call, so concurrent answers for one session run one at a time and
//! `turn_count` can neither skip nor repeat. Different sessions never contend.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::AppError;
use crate::interview::models::{MockSession, MockStart, MockTurnResult};
use crate::interview::orchestrator::InterviewOrchestrator;

#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, Arc<Mutex<MockSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Opens a session through the orchestrator and starts tracking it.
    pub fn start(&self, orchestrator: &InterviewOrchestrator, role: &str) -> MockStart {
        let start = orchestrator.start_mock_interview(role);
        self.insert(MockSession::new(start.session_id.clone(), role.to_string()));
        start
    }

    pub fn insert(&self, session: MockSession) {
        self.sessions
            .insert(session.session_id.clone(), Arc::new(Mutex::new(session)));
    }

    fn handle(&self, session_id: &str) -> Result<Arc<Mutex<MockSession>>, AppError> {
        self.sessions
            .get(session_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
    }

    /// Snapshot of the session's current state.
    pub async fn get(&self, session_id: &str) -> Result<MockSession, AppError> {
        let handle = self.handle(session_id)?;
        let session = handle.lock().await;
        Ok(session.clone())
    }

    /// Submits one answer using the stored `turn_count`.
    ///
    /// The count advances only when the orchestrator succeeds; a failed
    /// completion call leaves the session exactly as it was.
    pub async fn answer(
        &self,
        orchestrator: &InterviewOrchestrator,
        session_id: &str,
        answer: &str,
    ) -> Result<(MockTurnResult, MockSession), AppError> {
        let handle = self.handle(session_id)?;
        let mut session = handle.lock().await;

        let result = orchestrator
            .continue_mock_interview(&session.session_id, answer, &session.role, session.turn_count)
            .await?;

        if !session.complete {
            session.turn_count += 1;
            session.complete = result.is_complete();
        }
        session.last_activity = Utc::now();

        Ok((result, session.clone()))
    }

    pub fn remove(&self, session_id: &str) -> Result<(), AppError> {
        self.sessions
            .remove(session_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
    }

    /// Drops sessions idle for longer than `max_idle`. Sessions with an
    /// answer in flight are skipped. Returns the number removed.
    pub fn prune_idle(&self, max_idle: Duration) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();

        self.sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => !(now - session.last_activity)
                .to_std()
                .is_ok_and(|idle| idle > max_idle),
            Err(_) => true,
        });

        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            info!("Pruned {removed} idle mock interview sessions");
        }
        removed
    }
}

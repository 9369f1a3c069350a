//! Explicit session context. The logged-in user is carried by this object
//! with a defined lifecycle (populated at login, cleared at logout) instead
//! of being read from ambient storage.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
}

#[derive(Default)]
pub struct SessionContext {
    current: Mutex<Option<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&self, session: Session) {
        *self.lock() = Some(session);
    }

    pub fn logout(&self) {
        *self.lock() = None;
    }

    pub fn current(&self) -> Option<Session> {
        self.lock().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

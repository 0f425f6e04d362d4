//! Application state for the Attendance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::ConfigLoader;
use crate::session::Session;

/// Shared application state.
///
/// Holds the loaded policy and the single data-entry session. Handlers lock
/// the session for the duration of one operation.
#[derive(Clone)]
pub struct AppState {
    /// The loaded attendance policy.
    config: Arc<ConfigLoader>,
    /// The data-entry session.
    session: Arc<Mutex<Session>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, session: Session) -> Self {
        Self {
            config: Arc::new(config),
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Locks the session.
    ///
    /// A panic while the lock was held leaves the session as it was at the
    /// panic; the lock is recovered rather than failing every later request.
    pub fn session(&self) -> MutexGuard<'_, Session> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

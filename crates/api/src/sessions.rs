//! Server-side UI sessions.
//!
//! A session is one open survey page: the view switcher, the form draft, the
//! admin list and the keyboard shortcut listener that toggles the admin
//! view. The listener is registered when the session opens and removed when
//! the session is torn down (its guard is dropped with the session).
//!
//! Sessions nobody has touched for a while are swept by a background task,
//! since a closed browser tab never sends the DELETE.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use needs_core::acknowledgement::AcknowledgementView;
use needs_core::admin::{AdminList, AdminRow, UnitFilter};
use needs_core::error::CoreError;
use needs_core::form::FormState;
use needs_core::shell::{KeyEvent, ShortcutGuard, ShortcutRegistry, View, ViewSwitcher, ADMIN_CHORD};
use needs_core::types::Timestamp;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use uuid::Uuid;

/// What a registered shortcut asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    ToggleAdmin,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session {
    pub id: Uuid,
    pub views: ViewSwitcher,
    pub form: FormState,
    pub admin: AdminList,
    pub created_at: Timestamp,
    shortcuts: ShortcutRegistry<ShellAction>,
    _admin_shortcut: ShortcutGuard<ShellAction>,
}

impl Session {
    pub fn new(id: Uuid) -> Self {
        let shortcuts = ShortcutRegistry::new();
        let guard = shortcuts.register(ADMIN_CHORD, ShellAction::ToggleAdmin);
        Self {
            id,
            views: ViewSwitcher::new(),
            form: FormState::new(),
            admin: AdminList::new(),
            created_at: chrono::Utc::now(),
            shortcuts,
            _admin_shortcut: guard,
        }
    }

    /// Route a key press.
    ///
    /// Shortcuts are ignored while a submission is in flight, so its result
    /// always lands on the form view. Returns whether any shortcut fired.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if self.form.submitting {
            tracing::debug!(session_id = %self.id, key = %event.key, "Ignored key during submit");
            return false;
        }
        let actions = self.shortcuts.dispatch(event);
        for action in &actions {
            match action {
                ShellAction::ToggleAdmin => {
                    self.views.toggle_admin();
                    tracing::debug!(session_id = %self.id, view = ?self.views.current(), "Toggled admin view");
                }
            }
        }
        !actions.is_empty()
    }

    /// Whether the admin view is showing without rows fetched yet.
    pub fn needs_admin_rows(&self) -> bool {
        self.views.is_admin() && !self.admin.is_loaded()
    }

    pub fn require_form(&self) -> Result<(), CoreError> {
        match self.views.current() {
            View::Form => Ok(()),
            _ => Err(CoreError::Conflict("The survey form is not showing".to_string())),
        }
    }

    pub fn require_admin(&self) -> Result<(), CoreError> {
        if self.views.is_admin() {
            Ok(())
        } else {
            Err(CoreError::Conflict("The admin view is not showing".to_string()))
        }
    }

    pub fn shortcut_count(&self) -> usize {
        self.shortcuts.listener_count()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let view = self.views.current().clone();
        let acknowledgement = match &view {
            View::ThankYou(ack) => Some(ack.render()),
            _ => None,
        };
        let admin = self.views.is_admin().then(|| AdminSnapshot {
            filter: self.admin.filter(),
            selected: self.admin.selected(),
            total: self.admin.rows().len(),
            rows: self.admin.visible(),
        });
        SessionSnapshot {
            id: self.id,
            view,
            acknowledgement,
            form: self.form.clone(),
            admin,
        }
    }
}

/// Serializable view of a session.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub view: View,
    pub acknowledgement: Option<AcknowledgementView>,
    pub form: FormState,
    pub admin: Option<AdminSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct AdminSnapshot {
    pub filter: UnitFilter,
    pub selected: Option<usize>,
    pub total: usize,
    pub rows: Vec<AdminRow>,
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

pub type SessionHandle = Arc<Mutex<Session>>;

struct SessionEntry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// Tracks all open sessions.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct SessionManager {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a new session.
    pub async fn create(&self) -> SessionHandle {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(Session::new(id)));
        let entry = SessionEntry {
            handle: Arc::clone(&handle),
            last_seen: Instant::now(),
        };
        self.sessions.write().await.insert(id, entry);
        tracing::info!(session_id = %id, "Session opened");
        handle
    }

    /// Look up a session and mark it as seen.
    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(Arc::clone(&entry.handle))
    }

    /// Tear down a session. Returns `false` if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session closed");
        }
        removed
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions not seen for at least `max_idle`. Returns how many
    /// were dropped.
    pub async fn remove_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let keep = now.duration_since(entry.last_seen) < max_idle;
            if !keep {
                tracing::info!(session_id = %id, "Session expired");
            }
            keep
        });
        before - sessions.len()
    }

    /// Drop every session.
    pub async fn shutdown_all(&self) {
        let mut sessions = self.sessions.write().await;
        let count = sessions.len();
        sessions.clear();
        tracing::info!(count, "Closed all sessions");
    }
}

/// Spawn a background task that drops idle sessions every `every`.
///
/// The task runs until aborted through the returned `JoinHandle`.
pub fn start_idle_sweep(
    manager: Arc<SessionManager>,
    every: Duration,
    max_idle: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);

        loop {
            interval.tick().await;
            let expired = manager.remove_idle(max_idle).await;
            if expired > 0 {
                tracing::debug!(expired, "Swept idle sessions");
            }
        }
    })
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::Arc;

use needs_core::store::ResponseStore;

use crate::sessions::SessionManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Hosted record store holding the `responses` table.
    pub store: Arc<dyn ResponseStore>,
    /// Open UI sessions (one per browser tab).
    pub sessions: Arc<SessionManager>,
}

//! Root view switcher and keyboard shortcut dispatch.
//!
//! A [`ShortcutRegistry`] hands out a [`ShortcutGuard`] per registration;
//! dropping the guard removes the listener, so a listener lives exactly as
//! long as whoever holds the guard.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};

use serde::{Deserialize, Serialize};

use crate::acknowledgement::Acknowledgement;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Which top-level screen is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    #[default]
    Form,
    ThankYou(Acknowledgement),
    Admin,
}

/// Three-state view machine: form, thank-you, admin.
#[derive(Debug, Clone, Default)]
pub struct ViewSwitcher {
    current: View,
}

impl ViewSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &View {
        &self.current
    }

    pub fn is_admin(&self) -> bool {
        self.current == View::Admin
    }

    /// A submission succeeded. Only moves from the form.
    pub fn submitted(&mut self, ack: Acknowledgement) {
        if self.current == View::Form {
            self.current = View::ThankYou(ack);
        }
    }

    /// Flip between admin and form. Never lands on thank-you.
    pub fn toggle_admin(&mut self) {
        self.current = if self.is_admin() {
            View::Form
        } else {
            View::Admin
        };
    }
}

// ---------------------------------------------------------------------------
// Key chords
// ---------------------------------------------------------------------------

/// A key press with its modifier state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

/// A modifier+letter combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyChord {
    pub key: char,
    /// Satisfied by either Ctrl or Meta (Cmd on macOS).
    pub primary: bool,
    pub shift: bool,
    pub alt: bool,
}

/// Ctrl+Shift+A (or Cmd+Shift+A) toggles the admin view.
pub const ADMIN_CHORD: KeyChord = KeyChord {
    key: 'a',
    primary: true,
    shift: true,
    alt: false,
};

impl KeyChord {
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let mut chars = event.key.chars();
        let key_matches = match (chars.next(), chars.next()) {
            (Some(c), None) => c.eq_ignore_ascii_case(&self.key),
            _ => false,
        };
        key_matches
            && (event.ctrl || event.meta) == self.primary
            && event.shift == self.shift
            && event.alt == self.alt
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

type Listeners<A> = Mutex<BTreeMap<u64, (KeyChord, A)>>;

struct RegistryInner<A> {
    next_id: Mutex<u64>,
    listeners: Listeners<A>,
}

/// Routes key events to whichever listeners are currently registered.
pub struct ShortcutRegistry<A> {
    inner: Arc<RegistryInner<A>>,
}

impl<A: Clone> Default for ShortcutRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Clone> ShortcutRegistry<A> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                next_id: Mutex::new(0),
                listeners: Mutex::new(BTreeMap::new()),
            }),
        }
    }

    /// Listen for `chord`, producing `action` when it fires. The listener is
    /// removed when the returned guard is dropped.
    #[must_use = "dropping the guard deregisters the shortcut immediately"]
    pub fn register(&self, chord: KeyChord, action: A) -> ShortcutGuard<A> {
        let id = {
            let mut next = lock(&self.inner.next_id);
            let id = *next;
            *next += 1;
            id
        };
        lock(&self.inner.listeners).insert(id, (chord, action));
        ShortcutGuard {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Actions of every listener whose chord matches, in registration order.
    pub fn dispatch(&self, event: &KeyEvent) -> Vec<A> {
        lock(&self.inner.listeners)
            .values()
            .filter(|(chord, _)| chord.matches(event))
            .map(|(_, action)| action.clone())
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner.listeners).len()
    }
}

/// Keeps one shortcut listener registered while alive.
pub struct ShortcutGuard<A> {
    id: u64,
    registry: Weak<RegistryInner<A>>,
}

impl<A> Drop for ShortcutGuard<A> {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            lock(&inner.listeners).remove(&self.id);
        }
    }
}

/// Lock a std mutex, recovering the data if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

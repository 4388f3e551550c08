// SPDX-License-Identifier: MPL-2.0
//! User activity signals.
//!
//! The notification center only needs to know that *someone is there*. It
//! subscribes to four kinds of input on the host through [`ActivitySource`]
//! and unsubscribes as soon as one of them fires.
//!
//! [`ActivityHub`] is an in-process source: the host forwards its input
//! events to [`ActivityHub::dispatch`] (or [`ActivityHub::dispatch_event`]
//! for raw iced events) and the hub fans them out to whoever is subscribed.

use iced::{event, keyboard, mouse, touch};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Input that counts as the user being present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    PointerMove,
    Click,
    KeyPress,
    TouchStart,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 4] = [
        ActivityKind::PointerMove,
        ActivityKind::Click,
        ActivityKind::KeyPress,
        ActivityKind::TouchStart,
    ];

    /// DOM event name of this kind.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            ActivityKind::PointerMove => "mousemove",
            ActivityKind::Click => "click",
            ActivityKind::KeyPress => "keypress",
            ActivityKind::TouchStart => "touchstart",
        }
    }

    /// Maps an iced runtime event to an activity kind.
    ///
    /// Only the primary button counts as a click.
    #[must_use]
    pub fn from_event(event: &event::Event) -> Option<Self> {
        match event {
            event::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                Some(ActivityKind::PointerMove)
            }
            event::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                Some(ActivityKind::Click)
            }
            event::Event::Keyboard(keyboard::Event::KeyPressed { .. }) => {
                Some(ActivityKind::KeyPress)
            }
            event::Event::Touch(touch::Event::FingerPressed { .. }) => {
                Some(ActivityKind::TouchStart)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// Callback invoked with the kind of activity observed.
pub type Listener = Arc<dyn Fn(ActivityKind) + Send + Sync>;

/// Handle returned by [`ActivitySource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Subscribe/unsubscribe contract for activity signals.
///
/// Implementations must not call a listener while holding a lock that
/// `subscribe` or `unsubscribe` also takes: listeners unsubscribe themselves.
/// `subscribe` must not call any listener synchronously either, since
/// callers may subscribe while holding their own state lock.
pub trait ActivitySource: Send + Sync {
    fn subscribe(&self, kind: ActivityKind, listener: Listener) -> ListenerId;

    /// Removes a listener. Unknown ids are ignored.
    fn unsubscribe(&self, kind: ActivityKind, id: ListenerId);
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<ActivityKind, Vec<(ListenerId, Listener)>>,
}

/// In-process [`ActivitySource`] fed by the host's event loop.
#[derive(Clone, Default)]
pub struct ActivityHub {
    registry: Arc<Mutex<Registry>>,
}

impl ActivityHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifies every listener subscribed to `kind`.
    ///
    /// Returns how many listeners were called.
    pub fn dispatch(&self, kind: ActivityKind) -> usize {
        let listeners: Vec<Listener> = self
            .lock()
            .listeners
            .get(&kind)
            .map(|entries| entries.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default();

        for listener in &listeners {
            listener(kind);
        }
        listeners.len()
    }

    /// Forwards an iced event if it counts as activity.
    ///
    /// Returns whether the event was an activity signal.
    pub fn dispatch_event(&self, event: &event::Event) -> bool {
        match ActivityKind::from_event(event) {
            Some(kind) => {
                self.dispatch(kind);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn listener_count(&self, kind: ActivityKind) -> usize {
        self.lock().listeners.get(&kind).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.lock().listeners.values().map(Vec::len).sum()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ActivitySource for ActivityHub {
    fn subscribe(&self, kind: ActivityKind, listener: Listener) -> ListenerId {
        let mut registry = self.lock();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.entry(kind).or_default().push((id, listener));
        id
    }

    fn unsubscribe(&self, kind: ActivityKind, id: ListenerId) {
        let mut registry = self.lock();
        if let Some(entries) = registry.listeners.get_mut(&kind) {
            entries.retain(|(existing, _)| *existing != id);
            if entries.is_empty() {
                registry.listeners.remove(&kind);
            }
        }
    }
}

impl fmt::Debug for ActivityHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityHub")
            .field("listeners", &self.total_listeners())
            .finish()
    }
}

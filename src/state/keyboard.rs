//! Keyboard Module - Shared key-event source and listener registry
//!
//! Every key press on the terminal (human typing or a scanner emulating a
//! keyboard) flows through this registry. Listeners cannot tell the two
//! apart; only the timing recorded in `KeyboardEvent::timestamp` differs.
//!
//! # API
//!
//! - `on(handler)` - Subscribe to all key presses, returns cleanup function
//! - `dispatch(event)` - Deliver an event to every listener
//! - `last_event` / `last_key` - Reactive view of the last press
//! - `listener_count` - Number of live listeners (leak detection)
//!
//! # Example
//!
//! ```ignore
//! use barcode_desk::state::keyboard;
//!
//! let cleanup = keyboard::on(|event| {
//!     println!("Key: {}", event.key);
//!     false // Don't suppress default
//! });
//!
//! // Later, when the consuming surface goes away:
//! cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use spark_signals::{signal, Signal};

// =============================================================================
// TYPES
// =============================================================================

bitflags::bitflags! {
    /// Keyboard modifiers held during a key press.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        const META  = 1 << 3;
    }
}

impl Modifiers {
    /// True if Alt, Ctrl or Meta is held. Shift alone is not a chord.
    pub fn is_chord(self) -> bool {
        self.intersects(Modifiers::ALT | Modifiers::CTRL | Modifiers::META)
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
    /// When the key was pressed
    pub timestamp: Instant,
}

impl KeyboardEvent {
    /// Create a key press stamped with the current time
    pub fn new(key: impl Into<String>) -> Self {
        Self::at(key, Instant::now())
    }

    /// Create a key press at a given instant
    pub fn at(key: impl Into<String>, timestamp: Instant) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::empty(),
            state: KeyState::Press,
            timestamp,
        }
    }

    /// Replace the modifier set
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a press event
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }

    /// The single character this key yields, if it yields exactly one.
    pub fn printable_char(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}

/// Listener for key presses. Return true to suppress the default behavior.
pub type KeyHandler = Box<dyn Fn(&KeyboardEvent) -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<KeyboardEvent>> = signal(None);
}

/// Get the last keyboard event
pub fn last_event() -> Option<KeyboardEvent> {
    LAST_EVENT.with(|s| s.get())
}

/// Get the last key pressed
pub fn last_key() -> String {
    last_event().map(|e| e.key).unwrap_or_default()
}

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

struct ListenerRegistry {
    listeners: Vec<(usize, Rc<KeyHandler>)>,
    next_id: usize,
}

impl ListenerRegistry {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<ListenerRegistry> = RefCell::new(ListenerRegistry::new());
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Dispatch a keyboard event to all registered listeners.
///
/// Every listener sees the event, in registration order. Returns true if
/// any listener suppressed the default behavior.
pub fn dispatch(event: KeyboardEvent) -> bool {
    LAST_EVENT.with(|s| s.set(Some(event.clone())));

    if !event.is_press() {
        return false;
    }

    // Snapshot so a listener may detach (or attach) while being called.
    let listeners: Vec<_> = REGISTRY.with(|reg| {
        reg.borrow()
            .listeners
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect()
    });

    let mut suppressed = false;
    for handler in listeners {
        suppressed |= handler(&event);
    }
    suppressed
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to all key presses.
/// Return true from handler to suppress the default behavior.
/// Returns cleanup function.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        let handler: KeyHandler = Box::new(handler);
        reg.listeners.push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.listeners.retain(|(listener_id, _)| *listener_id != id);
        });
    }
}

/// Number of live listeners.
pub fn listener_count() -> usize {
    REGISTRY.with(|reg| reg.borrow().listeners.len())
}

/// Clear all state and listeners.
pub fn cleanup() {
    REGISTRY.with(|reg| reg.borrow_mut().listeners.clear());
    LAST_EVENT.with(|s| s.set(None));
}

/// Reset keyboard state (for testing)
pub fn reset_keyboard_state() {
    cleanup();
    REGISTRY.with(|reg| {
        reg.borrow_mut().next_id = 0;
    });
}

// =============================================================================
// TESTS
// =============================================================================

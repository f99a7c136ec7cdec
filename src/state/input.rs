//! Input Module - Terminal key events into the shared key-event source
//!
//! Bridges crossterm's event system with the keyboard registry. A USB
//! scanner in keyboard-wedge mode shows up here exactly like typing.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read
//! - `route_event` - Dispatch event to the keyboard registry
//!
//! # Example
//!
//! ```ignore
//! use barcode_desk::state::input::{poll_event, route_event};
//! use std::time::Duration;
//!
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         route_event(event);
//!     }
//! }
//! ```

use crossterm::event::{
    Event as CrosstermEvent,
    KeyCode, KeyEventKind, KeyModifiers,
    KeyEvent as CrosstermKeyEvent,
    poll, read,
};
use std::time::{Duration, Instant};

use super::keyboard::{KeyboardEvent, KeyState, Modifiers};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Terminal events this crate cares about
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Keyboard event (key press, release, etc.)
    Key(KeyboardEvent),
    /// Any other terminal event (mouse, resize, focus, paste)
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent, stamped now
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    convert_key_event_at(event, Instant::now())
}

/// Convert crossterm KeyEvent to our KeyboardEvent with an explicit timestamp
pub fn convert_key_event_at(event: CrosstermKeyEvent, timestamp: Instant) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
        timestamp,
    }
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::SHIFT, mods.contains(KeyModifiers::SHIFT));
    out.set(Modifiers::ALT, mods.contains(KeyModifiers::ALT));
    out.set(Modifiers::CTRL, mods.contains(KeyModifiers::CONTROL));
    out.set(
        Modifiers::META,
        mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    );
    out
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    match read()? {
        CrosstermEvent::Key(key) => Ok(InputEvent::Key(convert_key_event(key))),
        _ => Ok(InputEvent::None),
    }
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Route an event to the keyboard registry.
/// Returns true if a listener suppressed the default behavior.
pub fn route_event(event: InputEvent) -> bool {
    match event {
        InputEvent::Key(key) => super::keyboard::dispatch(key),
        InputEvent::None => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::keyboard::{last_key, reset_keyboard_state};
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_key_char() {
        let event = convert_key_event(key(
            KeyCode::Char('a'),
            KeyModifiers::empty(),
            KeyEventKind::Press,
        ));

        assert_eq!(event.key, "a");
        assert_eq!(event.state, KeyState::Press);
        assert!(event.modifiers.is_empty());
        assert_eq!(event.printable_char(), Some('a'));
    }

    #[test]
    fn test_convert_enter_keeps_timestamp() {
        let t0 = Instant::now();
        let event = convert_key_event_at(
            key(KeyCode::Enter, KeyModifiers::empty(), KeyEventKind::Press),
            t0,
        );
        assert_eq!(event.key, "Enter");
        assert_eq!(event.timestamp, t0);
        assert_eq!(event.printable_char(), None);
    }

    #[test]
    fn test_convert_named_keys() {
        let named = [
            (KeyCode::Tab, "Tab"),
            (KeyCode::Esc, "Escape"),
            (KeyCode::Backspace, "Backspace"),
            (KeyCode::Up, "ArrowUp"),
            (KeyCode::F(5), "F5"),
        ];

        for (code, expected) in named {
            let event = convert_key_event(key(code, KeyModifiers::empty(), KeyEventKind::Press));
            assert_eq!(event.key, expected);
        }
    }

    #[test]
    fn test_convert_modifiers() {
        let event = convert_key_event(key(
            KeyCode::Char('x'),
            KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT,
            KeyEventKind::Press,
        ));
        assert!(event.modifiers.contains(Modifiers::CTRL | Modifiers::ALT | Modifiers::SHIFT));
        assert!(!event.modifiers.contains(Modifiers::META));

        let event = convert_key_event(key(
            KeyCode::Char('v'),
            KeyModifiers::SUPER,
            KeyEventKind::Press,
        ));
        assert!(event.modifiers.contains(Modifiers::META));
        assert!(event.modifiers.is_chord());
    }

    #[test]
    fn test_convert_key_states() {
        let states = [
            (KeyEventKind::Press, KeyState::Press),
            (KeyEventKind::Repeat, KeyState::Repeat),
            (KeyEventKind::Release, KeyState::Release),
        ];

        for (kind, expected) in states {
            let event = convert_key_event(key(KeyCode::Char('a'), KeyModifiers::empty(), kind));
            assert_eq!(event.state, expected);
        }
    }

    #[test]
    fn test_route_event_reaches_registry() {
        reset_keyboard_state();

        let event = convert_key_event(key(
            KeyCode::Char('q'),
            KeyModifiers::empty(),
            KeyEventKind::Press,
        ));
        assert!(!route_event(InputEvent::Key(event)));
        assert_eq!(last_key(), "q");

        assert!(!route_event(InputEvent::None));
    }
}

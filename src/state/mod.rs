//! State Module - Runtime input state
//!
//! - **Keyboard** - Event types, dispatch, listener registry
//! - **Input** - crossterm bridge feeding the keyboard registry

pub mod input;
pub mod keyboard;

pub use input::{convert_key_event, poll_event, read_event, route_event, InputEvent};
pub use keyboard::*;

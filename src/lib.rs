//! # barcode-desk
//!
//! Barcode input recognition and product-code allocation for point-of-sale
//! terminals.
//!
//! Scanners in keyboard-wedge mode type each code as a burst of key presses
//! ending in Enter. This crate tells those bursts apart from stale partial
//! input, hands completed codes to the caller, and looks them up in a
//! caller-owned catalog snapshot.
//!
//! ## Flow
//! ```text
//! terminal keys → state::input → state::keyboard → StreamClassifier
//!                                                        │ code
//!                  manual entry → codes::validate ───────┤
//!                                                        ▼
//!                                         codes::resolve / codes::allocate
//! ```
//!
//! ## Modules
//!
//! - [`state`] - Shared key-event source (listener registry, crossterm bridge)
//! - [`scanner`] - `StreamClassifier` and its detach handle
//! - [`codes`] - Validation, allocation and tiered lookup of product codes
//! - [`types`] - Catalog entry and lookup result types
//! - [`config`] - Scanner configuration

pub mod codes;
pub mod config;
pub mod error;
pub mod scanner;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::ScannerConfig;
pub use error::CodeParseError;

pub use scanner::{KeyOutcome, ScanHandle, ScanState, StreamClassifier};

pub use codes::{
    accept, allocate, display_code, draft_from_code, is_valid, legacy_code, normalize,
    resolve, resolve_with_tier, submit_manual, suggest, AllocatedCode, Sequence,
};

pub use state::{
    KeyboardEvent, KeyState, Modifiers, KeyHandler,
    dispatch as dispatch_keyboard, on as on_keyboard,
    last_event, last_key, listener_count, reset_keyboard_state,
};

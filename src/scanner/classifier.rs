//! Stream Classifier - Split the shared key stream into scanned codes
//!
//! A keyboard-wedge scanner types a whole code in a few milliseconds and
//! finishes with Enter. The classifier keeps a pending buffer of printable
//! characters; a gap longer than `gap_threshold` silently abandons what was
//! buffered, and the terminator flushes the buffer to the consumer.
//!
//! No minimum speed is enforced. A fast typist who hits Enter within the
//! threshold produces a code exactly like a scanner does.
//!
//! # States
//!
//! ```text
//!            printable                printable / other key
//!   Idle ───────────────▶ Accumulating ◀──────┐
//!    ▲                        │  │            │
//!    │      terminator        │  └────────────┘
//!    └────────────────────────┤
//!    │      gap > threshold   │
//!    └────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use barcode_desk::{ScannerConfig, StreamClassifier};
//!
//! let scanner = StreamClassifier::new(ScannerConfig::default());
//! let handle = scanner.attach(|code| println!("scanned {code}"));
//!
//! // When the consuming form goes away:
//! handle.detach();
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use spark_signals::{signal, Signal};
use tracing::debug;

use super::handle::ScanHandle;
use crate::config::ScannerConfig;
use crate::state::keyboard::{self, KeyboardEvent};

// =============================================================================
// TYPES
// =============================================================================

/// Classifier state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// Buffer empty
    Idle,
    /// At least one character buffered
    Accumulating,
}

/// What one key event did to the buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// A printable character was buffered
    Appended(char),
    /// The terminator completed a code; the buffer is now empty
    Completed(String),
    /// Nothing buffered (chord, named key, non-press, terminator on empty buffer)
    Ignored,
}

/// Characters typed since the last reset.
#[derive(Debug, Default)]
struct PendingBuffer {
    characters: String,
    last_event_time: Option<Instant>,
}

// =============================================================================
// STREAM CLASSIFIER
// =============================================================================

/// Segments key events into completed codes.
///
/// Cloning yields another handle onto the same buffer. Separate instances
/// each buffer the whole key stream independently.
#[derive(Clone)]
pub struct StreamClassifier {
    config: Rc<ScannerConfig>,
    buffer: Rc<RefCell<PendingBuffer>>,
    reading: Signal<bool>,
    last_code: Signal<Option<String>>,
}

impl StreamClassifier {
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            config: Rc::new(config),
            buffer: Rc::new(RefCell::new(PendingBuffer::default())),
            reading: signal(false),
            last_code: signal(None),
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Feed one key event through the state machine.
    pub fn feed(&self, event: &KeyboardEvent) -> KeyOutcome {
        if !event.is_press() {
            return KeyOutcome::Ignored;
        }

        let outcome = {
            let mut buf = self.buffer.borrow_mut();

            if let Some(last) = buf.last_event_time {
                let gap = event.timestamp.saturating_duration_since(last);
                if gap > self.config.gap_threshold && !buf.characters.is_empty() {
                    debug!(
                        abandoned = buf.characters.len(),
                        gap_ms = gap.as_millis() as u64,
                        "partial scan abandoned"
                    );
                    buf.characters.clear();
                }
            }
            buf.last_event_time = Some(event.timestamp);

            if event.modifiers.is_chord() {
                KeyOutcome::Ignored
            } else if event.key == self.config.terminator {
                // The terminator is never buffered, even on an empty buffer.
                if buf.characters.is_empty() {
                    KeyOutcome::Ignored
                } else {
                    KeyOutcome::Completed(std::mem::take(&mut buf.characters))
                }
            } else if let Some(c) = event.printable_char() {
                buf.characters.push(c);
                KeyOutcome::Appended(c)
            } else {
                KeyOutcome::Ignored
            }
        };

        // Signals are written after the borrow ends so effects may read back.
        self.reading.set(self.state() == ScanState::Accumulating);
        if let KeyOutcome::Completed(code) = &outcome {
            debug!(code = %code, "scan completed");
            self.last_code.set(Some(code.clone()));
        }

        outcome
    }

    /// Listen on the shared key-event source, calling `on_code` once per
    /// completed code. The terminator's default behavior is suppressed
    /// whenever it completes a code.
    pub fn attach<F>(&self, on_code: F) -> ScanHandle
    where
        F: Fn(&str) + 'static,
    {
        let classifier = self.clone();
        let cleanup = keyboard::on(move |event| match classifier.feed(event) {
            KeyOutcome::Completed(code) => {
                on_code(&code);
                true
            }
            _ => false,
        });

        debug!(terminator = %self.config.terminator, "scanner attached");
        ScanHandle::new(cleanup)
    }

    /// Current state
    pub fn state(&self) -> ScanState {
        if self.buffer.borrow().characters.is_empty() {
            ScanState::Idle
        } else {
            ScanState::Accumulating
        }
    }

    /// Characters buffered so far
    pub fn pending(&self) -> String {
        self.buffer.borrow().characters.clone()
    }

    /// Drop any buffered characters and forget the last event time.
    pub fn reset(&self) {
        *self.buffer.borrow_mut() = PendingBuffer::default();
        self.reading.set(false);
    }

    /// True while a scan is being accumulated
    pub fn is_reading(&self) -> bool {
        self.reading.get()
    }

    /// Reactive "reading" flag for indicators
    pub fn reading_signal(&self) -> Signal<bool> {
        self.reading.clone()
    }

    /// Most recently completed code
    pub fn last_code(&self) -> Option<String> {
        self.last_code.get()
    }

    /// Reactive last completed code
    pub fn last_code_signal(&self) -> Signal<Option<String>> {
        self.last_code.clone()
    }
}

impl Default for StreamClassifier {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

impl std::fmt::Debug for StreamClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamClassifier")
            .field("config", &self.config)
            .field("buffer", &self.buffer.borrow())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

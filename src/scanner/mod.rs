//! Scanner Module - Scanned-code recognition on the shared key stream
//!
//! - **classifier** - `StreamClassifier`, timing-based segmentation into codes
//! - **handle** - `ScanHandle`, releases the key listener on `detach`

mod classifier;
mod handle;

pub use classifier::{KeyOutcome, ScanState, StreamClassifier};
pub use handle::ScanHandle;

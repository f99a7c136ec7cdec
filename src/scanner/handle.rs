//! Detach handle returned by `StreamClassifier::attach`.

use tracing::debug;

/// Owns one registration on the shared key-event source.
///
/// `detach` consumes the handle, so the listener is released at most once.
/// Dropping the handle without calling `detach` leaves the listener live.
#[must_use = "dropping a ScanHandle without detach() leaves the key listener registered"]
pub struct ScanHandle {
    cleanup: Option<Box<dyn FnOnce()>>,
}

impl ScanHandle {
    pub(crate) fn new<F>(cleanup: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            cleanup: Some(Box::new(cleanup)),
        }
    }

    /// Unregister the key listener.
    pub fn detach(mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
            debug!("scanner detached");
        }
    }
}

impl std::fmt::Debug for ScanHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanHandle")
            .field("attached", &self.cleanup.is_some())
            .finish()
    }
}

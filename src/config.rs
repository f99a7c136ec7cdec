//! Scanner configuration.

use std::time::Duration;

/// Default maximum gap between two characters of one scan.
pub const DEFAULT_GAP_THRESHOLD: Duration = Duration::from_millis(50);

/// Default key that ends a scan.
pub const DEFAULT_TERMINATOR: &str = "Enter";

/// Configuration for a [`StreamClassifier`](crate::scanner::StreamClassifier).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Maximum inter-character gap before a partial scan is abandoned.
    pub gap_threshold: Duration,
    /// Key name that completes a scan.
    pub terminator: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            terminator: DEFAULT_TERMINATOR.to_string(),
        }
    }
}

impl ScannerConfig {
    pub fn with_gap_threshold(mut self, gap_threshold: Duration) -> Self {
        self.gap_threshold = gap_threshold;
        self
    }

    pub fn with_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScannerConfig::default();
        assert_eq!(config.gap_threshold, Duration::from_millis(50));
        assert_eq!(config.terminator, "Enter");
    }

    #[test]
    fn test_builders() {
        let config = ScannerConfig::default()
            .with_gap_threshold(Duration::from_millis(30))
            .with_terminator("Tab");
        assert_eq!(config.gap_threshold, Duration::from_millis(30));
        assert_eq!(config.terminator, "Tab");
    }
}

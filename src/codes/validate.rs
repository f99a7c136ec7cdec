//! Code validation and the manual-entry path.
//!
//! Any non-blank token is a usable internal code. No symbology, checksum or
//! length rules apply here.

use tracing::trace;

/// Trim leading and trailing whitespace. Idempotent.
pub fn normalize(code: &str) -> &str {
    code.trim()
}

/// True iff the code is non-empty after normalization.
pub fn is_valid(code: &str) -> bool {
    !normalize(code).is_empty()
}

/// Normalize and gate a candidate code in one step.
pub fn accept(code: &str) -> Option<String> {
    let normalized = normalize(code);
    if normalized.is_empty() {
        trace!("rejected blank code");
        return None;
    }
    Some(normalized.to_string())
}

/// Manual entry: hand a typed code to the same consumer scanned codes go to.
///
/// Returns whether `on_code` was called.
pub fn submit_manual<F>(input: &str, on_code: F) -> bool
where
    F: FnOnce(&str),
{
    match accept(input) {
        Some(code) => {
            on_code(&code);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_normalize_trims_only_ends() {
        assert_eq!(normalize("  BEV-001\n"), "BEV-001");
        assert_eq!(normalize("BEV 001"), "BEV 001");
        assert_eq!(normalize("\t"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["", " ", " a ", "a b", "\u{3000}x\u{3000}", "BEV-001"] {
            let once = normalize(input);
            assert_eq!(normalize(once), once);
        }
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid("x"));
        assert!(is_valid(" 0 "));
        assert!(!is_valid(""));
        assert!(!is_valid("   "));
    }

    #[test]
    fn test_accept() {
        assert_eq!(accept(" BEV-001 ").as_deref(), Some("BEV-001"));
        assert_eq!(accept("  "), None);
    }

    #[test]
    fn test_submit_manual() {
        let seen = RefCell::new(Vec::new());

        assert!(submit_manual("  4006381333931 ", |code| seen.borrow_mut().push(code.to_string())));
        assert!(!submit_manual("   ", |code| seen.borrow_mut().push(code.to_string())));

        assert_eq!(*seen.borrow(), vec!["4006381333931".to_string()]);
    }
}

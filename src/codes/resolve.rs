//! Code lookup - map an incoming code to a catalog entry.
//!
//! Three tiers, first match wins, exact comparison only:
//!
//! 1. entry id
//! 2. assigned code
//! 3. legacy code derived from category and the digits of the id
//!
//! The legacy tier covers entries that predate explicit code assignment.
//! Two entries can derive the same legacy code; the first in catalog order
//! wins.

use tracing::{debug, trace};

use super::allocate::{category_prefix, SEQ_WIDTH};
use super::validate::normalize;
use crate::types::{CatalogEntry, MatchTier, ProductDraft, Resolution};

/// Default number of suggestions a lookup field shows.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Sequence used when an id carries no digits.
const FALLBACK_SEQ: &str = "001";

// =============================================================================
// DERIVED CODES
// =============================================================================

/// Legacy code for an entry: category prefix plus the first three digits
/// of its id, left zero-padded.
pub fn legacy_code(entry: &CatalogEntry) -> String {
    let digits: String = entry
        .id
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(SEQ_WIDTH)
        .collect();

    let seq = if digits.is_empty() {
        FALLBACK_SEQ.to_string()
    } else {
        format!("{:0>width$}", digits, width = SEQ_WIDTH)
    };

    format!("{}-{}", category_prefix(&entry.category), seq)
}

/// The code shown on labels: assigned code if any, else the legacy code.
pub fn display_code(entry: &CatalogEntry) -> String {
    match entry.code() {
        Some(code) => code.to_string(),
        None => legacy_code(entry),
    }
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Resolve a code and report which tier matched.
pub fn resolve_with_tier<'a>(code: &str, catalog: &'a [CatalogEntry]) -> Option<Resolution<'a>> {
    let found = catalog
        .iter()
        .find(|entry| entry.id == code)
        .map(|entry| (entry, MatchTier::Id))
        .or_else(|| {
            catalog
                .iter()
                .find(|entry| entry.code() == Some(code))
                .map(|entry| (entry, MatchTier::Assigned))
        })
        .or_else(|| {
            catalog
                .iter()
                .find(|entry| legacy_code(entry) == code)
                .map(|entry| (entry, MatchTier::Legacy))
        });

    match found {
        Some((entry, tier)) => {
            debug!(code, id = %entry.id, ?tier, "resolved code");
            Some(Resolution { entry, tier })
        }
        None => {
            debug!(code, "code not in catalog");
            None
        }
    }
}

/// Resolve a code to a catalog entry. `None` is a normal outcome.
pub fn resolve<'a>(code: &str, catalog: &'a [CatalogEntry]) -> Option<&'a CatalogEntry> {
    resolve_with_tier(code, catalog).map(|r| r.entry)
}

/// Prefill for a new-product form from a scanned code.
///
/// The matched entry's id is never carried over.
pub fn draft_from_code(code: &str, catalog: &[CatalogEntry]) -> ProductDraft {
    ProductDraft {
        code: code.to_string(),
        category: resolve(code, catalog).map(|entry| entry.category.clone()),
    }
}

/// Display codes containing `input` (case-insensitive), in catalog order.
pub fn suggest(input: &str, catalog: &[CatalogEntry], limit: usize) -> Vec<String> {
    let needle = normalize(input).to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let suggestions: Vec<String> = catalog
        .iter()
        .map(display_code)
        .filter(|code| code.to_lowercase().contains(&needle))
        .take(limit)
        .collect();

    trace!(input, count = suggestions.len(), "suggestions");
    suggestions
}

// =============================================================================
// TESTS
// =============================================================================

//! Core types shared by the allocator and resolver.

/// One product-like entry of the externally owned catalog.
///
/// The catalog is read, never written: every operation takes a borrowed
/// snapshot that stays fixed for the duration of the call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Canonical identity
    pub id: String,
    /// Category name the code prefix is derived from
    pub category: String,
    /// Explicit code, if one was ever assigned
    pub assigned_code: Option<String>,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            assigned_code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.assigned_code = Some(code.into());
        self
    }

    /// The assigned code, treating an empty string as absent.
    pub fn code(&self) -> Option<&str> {
        self.assigned_code.as_deref().filter(|c| !c.is_empty())
    }
}

/// Which tier of the lookup hierarchy produced a match, highest trust first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Exact match on the entry id
    Id,
    /// Exact match on the assigned code
    Assigned,
    /// Match on the code derived from category and id digits
    Legacy,
}

/// A successful lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub entry: &'a CatalogEntry,
    pub tier: MatchTier,
}

/// Prefill for a new-product form built from a scanned code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductDraft {
    /// The scanned code, always carried over
    pub code: String,
    /// Category of the matching entry, when the code is already known
    pub category: Option<String>,
}

//! Codes Module - Validation, allocation and lookup of product codes
//!
//! All functions here are pure over a borrowed catalog snapshot.
//!
//! - **validate** - normalize/gate a candidate code, manual-entry path
//! - **allocate** - next unused `PREFIX-SEQ` code for a category
//! - **resolve** - tiered lookup of a code in the catalog

pub mod allocate;
pub mod resolve;
pub mod validate;

pub use allocate::{allocate, category_prefix, max_sequence, AllocatedCode, Sequence};
pub use resolve::{
    display_code, draft_from_code, legacy_code, resolve, resolve_with_tier, suggest,
    DEFAULT_SUGGESTION_LIMIT,
};
pub use validate::{accept, is_valid, normalize, submit_manual};

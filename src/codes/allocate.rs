//! Code allocation - next unused `PREFIX-SEQ` code for a category.
//!
//! Allocation is a pure function of (category, catalog snapshot). Nothing is
//! reserved: two terminals holding the same stale snapshot will hand out the
//! same code.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::CodeParseError;
use crate::types::CatalogEntry;

/// Maximum number of category characters used as a prefix.
pub const PREFIX_LEN: usize = 3;

/// Minimum number of digits in a sequence number.
pub const SEQ_WIDTH: usize = 3;

// =============================================================================
// SEQUENCE
// =============================================================================

/// Decimal sequence number of any length, kept without leading zeros.
///
/// Ordered numerically: a longer digit string is larger, equal lengths
/// compare digit by digit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sequence(String);

impl Sequence {
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// Parse a run of ASCII digits and nothing else.
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Some(Self::zero())
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Parse the way a lenient integer read does: leading whitespace, an
    /// optional sign, then the leading digit run. Trailing text is ignored.
    /// Negative values yield `None`; they never raise a maximum.
    pub fn parse_leading(s: &str) -> Option<Self> {
        let s = s.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'+') => (false, &s[1..]),
            Some(b'-') => (true, &s[1..]),
            _ => (false, s),
        };
        let end = rest
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        let seq = Self::from_digits(&rest[..end])?;
        if negative && seq != Self::zero() {
            return None;
        }
        Some(seq)
    }

    /// Digits without leading zeros
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// The next sequence number. Never overflows; the digit string grows.
    pub fn successor(&self) -> Self {
        let mut digits: Vec<u8> = self.0.bytes().collect();
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if !carry {
                break;
            }
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
        Self(digits.into_iter().map(char::from).collect())
    }
}

impl From<u64> for Sequence {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl Ord for Sequence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Sequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0>width$}", self.0, width = SEQ_WIDTH)
    }
}

// =============================================================================
// ALLOCATED CODE
// =============================================================================

/// A parsed `PREFIX-SEQ` code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AllocatedCode {
    pub prefix: String,
    pub seq: Sequence,
}

impl AllocatedCode {
    pub fn new(prefix: impl Into<String>, seq: impl Into<Sequence>) -> Self {
        Self {
            prefix: prefix.into(),
            seq: seq.into(),
        }
    }
}

impl fmt::Display for AllocatedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.seq)
    }
}

impl FromStr for AllocatedCode {
    type Err = CodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, rest) = s
            .split_once('-')
            .ok_or_else(|| CodeParseError::MissingSeparator(s.to_string()))?;

        let prefix_len = prefix.chars().count();
        if prefix_len == 0
            || prefix_len > PREFIX_LEN
            || prefix.chars().any(|c| c.is_lowercase())
        {
            return Err(CodeParseError::InvalidPrefix(prefix.to_string()));
        }

        let seq = Sequence::from_digits(rest)
            .ok_or_else(|| CodeParseError::InvalidSequence(rest.to_string()))?;
        Ok(Self::new(prefix, seq))
    }
}

// =============================================================================
// ALLOCATION
// =============================================================================

/// Uppercased first three characters of the category.
///
/// Shorter categories are not padded. Uppercasing can expand a character
/// (`ß` → `SS`), so the result is cut back to three characters.
pub fn category_prefix(category: &str) -> String {
    category
        .chars()
        .take(PREFIX_LEN)
        .collect::<String>()
        .to_uppercase()
        .chars()
        .take(PREFIX_LEN)
        .collect()
}

/// Highest sequence number already used under `prefix` in the snapshot.
///
/// A code counts when it is `prefix-REST` with no further `-` in `REST`
/// and `REST` starts with an integer.
pub fn max_sequence(prefix: &str, catalog: &[CatalogEntry]) -> Sequence {
    let lead = format!("{}-", prefix);
    catalog
        .iter()
        .filter_map(|entry| entry.code())
        .filter_map(|code| code.strip_prefix(lead.as_str()))
        .filter(|rest| !rest.contains('-'))
        .filter_map(Sequence::parse_leading)
        .max()
        .unwrap_or_else(Sequence::zero)
}

/// Allocate the next code for `category` against a catalog snapshot.
///
/// Returns an empty string for an empty category. The sequence is one past
/// the highest parseable sequence sharing the prefix, zero-padded to three
/// digits; it widens past 999 rather than wrapping.
pub fn allocate(category: &str, catalog: &[CatalogEntry]) -> String {
    if category.is_empty() {
        return String::new();
    }

    let prefix = category_prefix(category);
    let next = max_sequence(&prefix, catalog).successor();
    let code = AllocatedCode::new(prefix, next).to_string();

    debug!(category, code = %code, "allocated code");
    code
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn coded(id: &str, category: &str, code: &str) -> CatalogEntry {
        CatalogEntry::new(id, category).with_code(code)
    }

    #[test]
    fn test_allocate_empty_catalog() {
        assert_eq!(allocate("Beverages", &[]), "BEV-001");
    }

    #[test]
    fn test_allocate_after_existing() {
        let catalog = vec![coded("1", "Beverages", "BEV-007")];
        assert_eq!(allocate("Beverages", &catalog), "BEV-008");
    }

    #[test]
    fn test_allocate_empty_category() {
        let catalog = vec![coded("1", "Beverages", "BEV-007")];
        assert_eq!(allocate("", &catalog), "");
    }

    #[test]
    fn test_short_category_is_not_padded() {
        assert_eq!(category_prefix("Tv"), "TV");
        assert_eq!(allocate("Tv", &[]), "TV-001");
        assert_eq!(category_prefix("épicerie"), "ÉPI");
    }

    #[test]
    fn test_only_matching_prefix_counts() {
        let catalog = vec![
            coded("1", "Beverages", "BEV-004"),
            coded("2", "Bakery", "BAK-050"),
            coded("3", "Beverages", "BEVX-900"),
            coded("4", "Beverages", "BE-800"),
            CatalogEntry::new("5", "Beverages"),
        ];
        assert_eq!(allocate("Beverages", &catalog), "BEV-005");
    }

    #[test]
    fn test_unparseable_sequences_ignored() {
        let catalog = vec![
            coded("1", "Beverages", "BEV-002"),
            coded("2", "Beverages", "BEV-abc"),
            coded("3", "Beverages", "BEV-"),
            coded("4", "Beverages", "BEV-+"),
            coded("5", "Beverages", "BEV-12-30"),
            coded("6", "Beverages", "BEV--40"),
            coded("7", "Beverages", "4006381333931"),
        ];
        assert_eq!(allocate("Beverages", &catalog), "BEV-003");
    }

    #[test]
    fn test_leading_integer_is_read_like_parse_int() {
        let trailing = vec![coded("1", "Beverages", "BEV-12abc")];
        assert_eq!(allocate("Beverages", &trailing), "BEV-013");

        let signed = vec![coded("1", "Beverages", "BEV-+99")];
        assert_eq!(allocate("Beverages", &signed), "BEV-100");

        let spaced = vec![coded("1", "Beverages", "BEV- 41 ")];
        assert_eq!(allocate("Beverages", &spaced), "BEV-042");
    }

    #[test]
    fn test_sequence_past_u64_range() {
        let at_max = vec![coded("1", "Beverages", "BEV-18446744073709551615")];
        assert_eq!(allocate("Beverages", &at_max), "BEV-18446744073709551616");

        let beyond = vec![
            coded("1", "Beverages", "BEV-004"),
            coded("2", "Beverages", "BEV-99999999999999999999"),
        ];
        assert_eq!(allocate("Beverages", &beyond), "BEV-100000000000000000000");
    }

    #[test]
    fn test_sequence_order_and_next() {
        let seq = |s: &str| Sequence::from_digits(s).unwrap();

        assert_eq!(seq("007"), Sequence::from(7u64));
        assert_eq!(seq("000"), Sequence::zero());
        assert!(seq("10") > seq("9"));
        assert!(seq("0100") > seq("099"));
        assert!(seq("123456789012345678901") > Sequence::from(u64::MAX));

        assert_eq!(Sequence::zero().successor().digits(), "1");
        assert_eq!(seq("199").successor().digits(), "200");
        assert_eq!(seq("999").successor().digits(), "1000");

        assert_eq!(Sequence::parse_leading("-5"), None);
        assert_eq!(Sequence::parse_leading("x1"), None);
        assert_eq!(Sequence::parse_leading("  8kg"), Some(Sequence::from(8u64)));
    }

    #[test]
    fn test_prefix_stays_three_chars_after_uppercasing() {
        assert_eq!(category_prefix("ßab"), "SSA");
        let code = allocate("ßab", &[]);
        assert_eq!(code, "SSA-001");
        assert!(code.parse::<AllocatedCode>().is_ok());
    }

    #[test]
    fn test_monotonic_and_deterministic() {
        let catalog = vec![
            coded("1", "Snacks", "SNA-010"),
            coded("2", "Snacks", "SNA-003"),
            coded("3", "Snacks", "SNA-099"),
        ];
        let first = allocate("Snacks", &catalog);
        let second = allocate("Snacks", &catalog);
        assert_eq!(first, second);

        let parsed: AllocatedCode = first.parse().unwrap();
        assert_eq!(parsed.prefix, "SNA");
        assert!(parsed.seq > Sequence::from(99u64));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_sequence_widens_past_999() {
        let catalog = vec![coded("1", "Beverages", "BEV-999")];
        assert_eq!(allocate("Beverages", &catalog), "BEV-1000");
    }

    #[test]
    fn test_parse_code() {
        assert_eq!("BEV-001".parse::<AllocatedCode>(), Ok(AllocatedCode::new("BEV", 1u64)));
        assert_eq!("TV-1234".parse::<AllocatedCode>(), Ok(AllocatedCode::new("TV", 1234u64)));

        assert!(matches!(
            "BEV001".parse::<AllocatedCode>(),
            Err(CodeParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            "bev-001".parse::<AllocatedCode>(),
            Err(CodeParseError::InvalidPrefix(_))
        ));
        assert!(matches!(
            "BEVE-001".parse::<AllocatedCode>(),
            Err(CodeParseError::InvalidPrefix(_))
        ));
        assert!(matches!(
            "BEV-0x1".parse::<AllocatedCode>(),
            Err(CodeParseError::InvalidSequence(_))
        ));
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(AllocatedCode::new("BEV", 7u64).to_string(), "BEV-007");
        assert_eq!(AllocatedCode::new("BEV", 1000u64).to_string(), "BEV-1000");
    }
}

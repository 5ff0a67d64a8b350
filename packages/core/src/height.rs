//! Block height parsing and range validation.
//!
//! Heights arrive as free-form text (`"840,000"`, `"840 000"`) so every
//! non-digit character is stripped before the remainder is parsed.

use std::fmt;

use thiserror::Error;

/// Ordinal index of a block. Used only as a lookup key for the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input validation failures. All of these abort a run before any I/O.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HeightError {
    #[error("invalid block height {input:?}: no digits found")]
    NoDigits { input: String },

    #[error("invalid block height {input:?}: value does not fit in 64 bits")]
    Overflow { input: String },

    #[error("top height {top} must be greater than or equal to bottom height {bottom}")]
    InvertedRange { top: BlockHeight, bottom: BlockHeight },
}

/// Parse a block height, discarding thousands separators and any other
/// non-digit characters first.
pub fn parse_block_height(raw: &str) -> Result<BlockHeight, HeightError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return Err(HeightError::NoDigits {
            input: raw.to_string(),
        });
    }

    digits
        .parse::<u64>()
        .map(BlockHeight)
        .map_err(|_| HeightError::Overflow {
            input: raw.to_string(),
        })
}

/// Inclusive height range walked from `top` down to `bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightRange {
    top: BlockHeight,
    bottom: BlockHeight,
}

impl HeightRange {
    pub fn new(top: BlockHeight, bottom: BlockHeight) -> Result<Self, HeightError> {
        if top < bottom {
            return Err(HeightError::InvertedRange { top, bottom });
        }
        Ok(Self { top, bottom })
    }

    /// Parse both ends from user text and validate the ordering.
    pub fn parse(top: &str, bottom: &str) -> Result<Self, HeightError> {
        Self::new(parse_block_height(top)?, parse_block_height(bottom)?)
    }

    pub fn top(&self) -> BlockHeight {
        self.top
    }

    pub fn bottom(&self) -> BlockHeight {
        self.bottom
    }

    /// Number of heights in the range, both ends included.
    pub fn len(&self) -> u64 {
        (self.top.0 - self.bottom.0).saturating_add(1)
    }

    /// A validated range always holds at least one height.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Heights in strictly descending order.
    pub fn descending(&self) -> impl Iterator<Item = BlockHeight> {
        (self.bottom.0..=self.top.0).rev().map(BlockHeight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_thousands_separators() {
        assert_eq!(parse_block_height("1,234,567"), Ok(BlockHeight(1_234_567)));
    }

    #[test]
    fn strips_spaces_and_other_formatting() {
        assert_eq!(parse_block_height(" 840 000\n"), Ok(BlockHeight(840_000)));
        assert_eq!(parse_block_height("#839_999"), Ok(BlockHeight(839_999)));
    }

    #[test]
    fn rejects_text_without_digits() {
        assert_eq!(
            parse_block_height("abc"),
            Err(HeightError::NoDigits {
                input: "abc".to_string()
            })
        );
        assert!(parse_block_height("").is_err());
    }

    #[test]
    fn rejects_values_beyond_u64() {
        let err = parse_block_height("99,999,999,999,999,999,999").unwrap_err();
        assert!(matches!(err, HeightError::Overflow { .. }));
    }

    #[test]
    fn range_rejects_top_below_bottom() {
        let err = HeightRange::parse("100", "101").unwrap_err();
        assert_eq!(
            err,
            HeightError::InvertedRange {
                top: BlockHeight(100),
                bottom: BlockHeight(101)
            }
        );
    }

    #[test]
    fn range_of_single_height_is_allowed() {
        let range = HeightRange::parse("500", "500").unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range.descending().collect::<Vec<_>>(), vec![BlockHeight(500)]);
    }

    #[test]
    fn descending_walks_top_to_bottom_inclusive() {
        let range = HeightRange::parse("1,003", "1,000").unwrap();
        let heights: Vec<u64> = range.descending().map(BlockHeight::value).collect();
        assert_eq!(heights, vec![1003, 1002, 1001, 1000]);
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn range_starting_at_genesis() {
        let range = HeightRange::parse("2", "0").unwrap();
        let heights: Vec<u64> = range.descending().map(BlockHeight::value).collect();
        assert_eq!(heights, vec![2, 1, 0]);
    }
}

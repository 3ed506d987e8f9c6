//! National ID checksum validation
//!
//! Format: `XXX-XXX-XXX CC`, nine body digits grouped in threes followed by a
//! two-digit check value. The mask is verified literally before any digit is
//! interpreted.
//!
//! Check value algorithm:
//! 1. Reverse the nine body digits and weight the i-th (1-based) by i
//! 2. While the sum exceeds 101, replace it with `sum mod 101`
//! 3. A result of 100 or 101 counts as 0
//! 4. Compare with the trailing two digits as an integer

use std::fmt;

use super::check::{CheckResult, Violation};

/// Exact length of a masked ID in characters
pub const MASKED_LEN: usize = 14;

/// Literal separators of the mask: (position, character)
const SEPARATORS: [(usize, char); 3] = [(3, '-'), (7, '-'), (11, ' ')];

/// Structural reasons a string does not match the mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskError {
    /// Wrong number of characters
    Length(usize),
    /// Expected separator missing at a position
    Separator { position: usize, found: char },
    /// Non-digit where a digit belongs
    NonDigit { position: usize, found: char },
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::Length(len) => {
                write!(f, "expected {} characters, got {}", MASKED_LEN, len)
            }
            MaskError::Separator { position, found } => {
                write!(f, "unexpected {:?} at separator position {}", found, position)
            }
            MaskError::NonDigit { position, found } => {
                write!(f, "unexpected {:?} at digit position {}", found, position)
            }
        }
    }
}

impl std::error::Error for MaskError {}

/// A national ID that matched the mask; the checksum is not yet verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NationalId {
    body: [u8; 9],
    check: [u8; 2],
}

impl NationalId {
    /// Parses the masked form, returning the eleven extracted digits.
    pub fn parse(value: &str) -> Result<Self, MaskError> {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() != MASKED_LEN {
            return Err(MaskError::Length(chars.len()));
        }

        for (position, expected) in SEPARATORS {
            if chars[position] != expected {
                return Err(MaskError::Separator {
                    position,
                    found: chars[position],
                });
            }
        }

        let mut digits = [0u8; 11];
        let positions = (0..MASKED_LEN).filter(|p| SEPARATORS.iter().all(|(s, _)| s != p));
        for (slot, position) in positions.enumerate() {
            let c = chars[position];
            let digit = c
                .to_digit(10)
                .ok_or(MaskError::NonDigit { position, found: c })?;
            digits[slot] = digit as u8;
        }

        let mut body = [0u8; 9];
        body.copy_from_slice(&digits[..9]);
        Ok(Self {
            body,
            check: [digits[9], digits[10]],
        })
    }

    /// Raw weighted sum over the reversed body digits
    pub fn weighted_sum(&self) -> u32 {
        self.body
            .iter()
            .rev()
            .zip(1u32..)
            .map(|(digit, weight)| u32::from(*digit) * weight)
            .sum()
    }

    /// Check value computed from the body digits
    pub fn computed_check(&self) -> u32 {
        reduce_checksum(self.weighted_sum())
    }

    /// Check value written in the ID
    pub fn stated_check(&self) -> u32 {
        u32::from(self.check[0]) * 10 + u32::from(self.check[1])
    }

    /// Check digits as written, e.g. `"05"`
    pub fn stated_check_digits(&self) -> String {
        format!("{}{}", self.check[0], self.check[1])
    }

    pub fn is_valid(&self) -> bool {
        self.computed_check() == self.stated_check()
    }
}

/// Reduces a weighted sum to its check value.
///
/// The loop only runs while the sum exceeds 101, so a raw sum of exactly 101
/// is not reduced and falls through to the {100, 101} → 0 mapping.
pub fn reduce_checksum(mut sum: u32) -> u32 {
    while sum > 101 {
        sum %= 101;
    }

    if sum == 100 || sum == 101 {
        0
    } else {
        sum
    }
}

/// Validates a masked national ID.
pub fn check_national_id(value: &str) -> CheckResult {
    let id = match NationalId::parse(value) {
        Ok(id) => id,
        Err(_) => return CheckResult::fail(Violation::invalid_id_format()),
    };

    if id.is_valid() {
        CheckResult::pass()
    } else {
        CheckResult::fail(Violation::checksum_mismatch(
            id.computed_check(),
            &id.stated_check_digits(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extracts_digits() {
        let id = NationalId::parse("112-233-445 95").unwrap();
        assert_eq!(id.weighted_sum(), 95);
        assert_eq!(id.stated_check(), 95);
        assert!(id.is_valid());
    }

    #[test]
    fn test_parse_rejects_length() {
        assert_eq!(NationalId::parse("112-233-445 9"), Err(MaskError::Length(13)));
        assert_eq!(NationalId::parse(""), Err(MaskError::Length(0)));
    }

    #[test]
    fn test_parse_rejects_separators() {
        assert_eq!(
            NationalId::parse("112 233-445 95"),
            Err(MaskError::Separator { position: 3, found: ' ' })
        );
        assert_eq!(
            NationalId::parse("112-233-445-95"),
            Err(MaskError::Separator { position: 11, found: '-' })
        );
    }

    #[test]
    fn test_parse_rejects_non_ascii_digits() {
        assert_eq!(
            NationalId::parse("112-233-44x 95"),
            Err(MaskError::NonDigit { position: 10, found: 'x' })
        );
        // Fullwidth digit has the right length in chars but is not ASCII
        assert!(NationalId::parse("１12-233-445 95").is_err());
    }

    #[test]
    fn test_reduction() {
        assert_eq!(reduce_checksum(0), 0);
        assert_eq!(reduce_checksum(99), 99);
        assert_eq!(reduce_checksum(100), 0);
        assert_eq!(reduce_checksum(101), 0);
        assert_eq!(reduce_checksum(102), 1);
        assert_eq!(reduce_checksum(165), 64);
        assert_eq!(reduce_checksum(202), 0);
        assert_eq!(reduce_checksum(203), 1);
        assert_eq!(reduce_checksum(405), 1);
    }

    #[test]
    fn test_check_passes_and_fails() {
        assert!(check_national_id("112-233-445 95").passed());
        assert!(check_national_id("123-456-789 64").passed());

        let result = check_national_id("112-233-445 96");
        assert_eq!(result.messages(), vec!["checksum error (95 != 96)"]);
    }

    #[test]
    fn test_check_reports_stated_digits_literally() {
        let result = check_national_id("112-233-445 05");
        assert_eq!(result.messages(), vec!["checksum error (95 != 05)"]);
    }

    #[test]
    fn test_invalid_format_message() {
        let result = check_national_id("11223344595");
        assert_eq!(result.messages(), vec!["invalid format (XXX-XXX-XXX CC)"]);
    }
}

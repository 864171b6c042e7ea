//! ISBN-10 check characters.
//!
//! ISBN-13 codes are EAN-13 codes with a `978`/`979` prefix and use
//! [`super::ean`].

use crate::digits::{DigitString, digit_char};
use crate::error::ChecksumError;

const ALGORITHM: &str = "ISBN-10";

/// Length of an ISBN-10 without its check character.
pub const PARTIAL_LEN: usize = 9;

/// Computes the check character for a 9-digit partial ISBN-10.
///
/// The result is `'0'`-`'9'`, or `'X'` when the remainder works out to ten.
///
/// # Errors
///
/// Returns [`ChecksumError::InvalidLength`] unless `partial` has nine
/// characters and [`ChecksumError::InvalidCharacter`] for non-digit input.
///
/// # Example
///
/// ```
/// use synthetic_data::calculator::isbn;
///
/// assert_eq!(isbn::checksum("030640615"), Ok('2'));
/// assert_eq!(isbn::checksum("080442957"), Ok('X'));
/// ```
pub fn checksum(partial: &str) -> Result<char, ChecksumError> {
    let digits = DigitString::parse(partial)?;
    if digits.len() != PARTIAL_LEN {
        return Err(ChecksumError::InvalidLength {
            algorithm: ALGORITHM,
            expected: "9",
            actual: digits.len(),
        });
    }
    Ok(check_character(&digits))
}

/// Returns `true` when `full` is a ten-character ISBN with a matching check
/// character. A lowercase `x` is not accepted.
#[must_use]
pub fn is_valid(full: &str) -> bool {
    let Some((partial, check)) = full.split_at_checked(PARTIAL_LEN) else {
        return false;
    };
    if check.len() != 1 {
        return false;
    }
    DigitString::parse(partial)
        .is_ok_and(|digits| check.starts_with(check_character(&digits)))
}

fn check_character(digits: &DigitString) -> char {
    let sum = digits.weighted_sum((2..=10).rev());
    match (11 - sum.rem_euclid(11)).rem_euclid(11) {
        10 => 'X',
        value => digit_char(value),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("030640615", '2')]
    #[case("080442957", 'X')]
    #[case("043942089", 'X')]
    #[case("000000000", '0')]
    fn computes_check_characters(#[case] partial: &str, #[case] expected: char) {
        assert_eq!(checksum(partial), Ok(expected));
    }

    #[rstest]
    #[case("0306406152", true)]
    #[case("080442957X", true)]
    #[case("080442957x", false)]
    #[case("0306406153", false)]
    #[case("030640615", false)]
    #[case("03064061522", false)]
    #[case("03064O6152", false)]
    fn validates_complete_codes(#[case] full: &str, #[case] expected: bool) {
        assert_eq!(is_valid(full), expected);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            checksum("12345"),
            Err(ChecksumError::InvalidLength { actual: 5, .. })
        ));
    }

    #[test]
    fn multibyte_characters_are_reported_before_length() {
        assert_eq!(
            checksum("03064061é"),
            Err(ChecksumError::InvalidCharacter {
                position: 8,
                character: 'é'
            })
        );
    }
}

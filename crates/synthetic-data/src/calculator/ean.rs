//! EAN-8 and EAN-13 check digits.

use crate::digits::{DigitString, digit_char};
use crate::error::ChecksumError;

const ALGORITHM: &str = "EAN";

/// The EAN symbologies, selected by input length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EanVariant {
    /// Eight digits including the check digit.
    Ean8,
    /// Thirteen digits including the check digit.
    Ean13,
}

impl EanVariant {
    /// Picks the variant for a partial code lacking its check digit.
    #[must_use]
    pub const fn from_partial_len(len: usize) -> Option<Self> {
        match len {
            7 => Some(Self::Ean8),
            12 => Some(Self::Ean13),
            _ => None,
        }
    }

    /// Picks the variant for a complete code.
    #[must_use]
    pub const fn from_full_len(len: usize) -> Option<Self> {
        match len {
            8 => Some(Self::Ean8),
            13 => Some(Self::Ean13),
            _ => None,
        }
    }

    /// Returns the full code length, check digit included.
    #[must_use]
    pub const fn full_len(self) -> usize {
        match self {
            Self::Ean8 => 8,
            Self::Ean13 => 13,
        }
    }

    /// Returns the partial code length, check digit excluded.
    #[must_use]
    pub const fn partial_len(self) -> usize {
        match self {
            Self::Ean8 => 7,
            Self::Ean13 => 12,
        }
    }

    /// Weights for odd and even (1-indexed) positions of the partial code.
    ///
    /// The digit adjacent to the check digit always carries weight 3.
    const fn weight_pair(self) -> (u32, u32) {
        match self {
            Self::Ean8 => (3, 1),
            Self::Ean13 => (1, 3),
        }
    }

    fn check_digit(self, partial: &DigitString) -> char {
        let (odd, even) = self.weight_pair();
        let sum = partial.weighted_sum([odd, even].into_iter().cycle());
        digit_char((10 - sum.rem_euclid(10)).rem_euclid(10))
    }
}

/// Computes the check digit for a 7-digit (EAN-8) or 12-digit (EAN-13)
/// partial code.
///
/// # Errors
///
/// Returns [`ChecksumError::InvalidLength`] for any other length and
/// [`ChecksumError::InvalidCharacter`] for non-digit input.
///
/// # Example
///
/// ```
/// use synthetic_data::calculator::ean;
///
/// assert_eq!(ean::checksum("1234567"), Ok('0'));
/// assert_eq!(ean::checksum("978020137962"), Ok('4'));
/// ```
pub fn checksum(partial: &str) -> Result<char, ChecksumError> {
    let digits = DigitString::parse(partial)?;
    let variant =
        EanVariant::from_partial_len(digits.len()).ok_or(ChecksumError::InvalidLength {
            algorithm: ALGORITHM,
            expected: "7 or 12",
            actual: digits.len(),
        })?;
    Ok(variant.check_digit(&digits))
}

/// Returns `true` when `full` is an 8- or 13-digit code whose last digit
/// matches the checksum of the rest.
///
/// Any other length, or any non-digit character, yields `false`.
///
/// # Example
///
/// ```
/// use synthetic_data::calculator::ean;
///
/// assert!(ean::is_valid("1234567891231"));
/// assert!(!ean::is_valid("3001092650834"));
/// assert!(!ean::is_valid("123"));
/// ```
#[must_use]
pub fn is_valid(full: &str) -> bool {
    let Some(variant) = EanVariant::from_full_len(full.len()) else {
        return false;
    };
    if DigitString::parse(full).is_err() {
        return false;
    }
    let Some((partial, check)) = full.split_at_checked(variant.partial_len()) else {
        return false;
    };
    DigitString::parse(partial)
        .is_ok_and(|digits| check.starts_with(variant.check_digit(&digits)))
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1234567", '0')]
    #[case("2345678", '5')]
    #[case("3456789", '0')]
    fn computes_ean8_checksums(#[case] partial: &str, #[case] expected: char) {
        assert_eq!(checksum(partial), Ok(expected));
    }

    #[rstest]
    #[case("123456789123", '1')]
    #[case("978020137962", '4')]
    #[case("235469852146", '9')]
    #[case("300109265083", '5')]
    #[case("392109219083", '7')]
    fn computes_ean13_checksums(#[case] partial: &str, #[case] expected: char) {
        assert_eq!(checksum(partial), Ok(expected));
    }

    #[rstest]
    #[case("1234567891231", true)]
    #[case("2354698521469", true)]
    #[case("3001092650834", false)]
    #[case("3921092190838", false)]
    #[case("12345670", true)]
    #[case("23456785", true)]
    #[case("23456780", false)]
    fn validates_complete_codes(#[case] full: &str, #[case] expected: bool) {
        assert_eq!(is_valid(full), expected);
    }

    #[rstest]
    #[case("")]
    #[case("123456")]
    #[case("12345678")]
    #[case("1234567890123")]
    fn rejects_partial_codes_of_wrong_length(#[case] partial: &str) {
        assert!(matches!(
            checksum(partial),
            Err(ChecksumError::InvalidLength { actual, .. }) if actual == partial.len()
        ));
    }

    #[rstest]
    #[case("")]
    #[case("1234567")]
    #[case("123456789")]
    #[case("12345678901234")]
    fn invalid_lengths_are_not_valid(#[case] full: &str) {
        assert!(!is_valid(full));
    }

    #[test]
    fn checksum_rejects_non_digits() {
        assert_eq!(
            checksum("12345a7"),
            Err(ChecksumError::InvalidCharacter {
                position: 5,
                character: 'a'
            })
        );
    }

    #[test]
    fn multibyte_characters_are_reported_before_length() {
        assert_eq!(
            checksum("12345é7"),
            Err(ChecksumError::InvalidCharacter {
                position: 5,
                character: 'é'
            })
        );
    }

    #[test]
    fn non_digit_codes_are_not_valid() {
        assert!(!is_valid("1234567A"));
        assert!(!is_valid("-234567891231"));
    }

    #[rstest]
    #[case(7)]
    #[case(12)]
    fn appended_checksum_always_validates(#[case] len: usize) {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let partial: String = (0..len)
                .map(|_| digit_char(rng.random_range(0..10)))
                .collect();
            let check = checksum(&partial).expect("checksum");
            assert!(is_valid(&format!("{partial}{check}")), "{partial}{check}");
        }
    }

    #[test]
    fn variant_lengths_are_consistent() {
        for variant in [EanVariant::Ean8, EanVariant::Ean13] {
            assert_eq!(variant.partial_len() + 1, variant.full_len());
            assert_eq!(EanVariant::from_full_len(variant.full_len()), Some(variant));
            assert_eq!(
                EanVariant::from_partial_len(variant.partial_len()),
                Some(variant)
            );
        }
    }
}

//! Validated decimal digit strings and the weighted sums computed over them.

use std::fmt;
use std::str::FromStr;

use crate::error::ChecksumError;

/// An ordered sequence of ASCII decimal digits.
///
/// Construction rejects any character outside `0`-`9`, so signs, spaces and
/// separators are never silently coerced into numbers.
///
/// # Example
///
/// ```
/// use synthetic_data::DigitString;
///
/// let digits = DigitString::parse("0071").expect("digits");
/// assert_eq!(digits.len(), 4);
/// assert_eq!(digits.values().collect::<Vec<_>>(), vec![0, 0, 7, 1]);
/// assert!(DigitString::parse("-12").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigitString(String);

impl DigitString {
    /// Parses `input`, failing on the first non-digit character.
    ///
    /// # Errors
    ///
    /// Returns [`ChecksumError::InvalidCharacter`] naming the offending
    /// character and its position.
    pub fn parse(input: &str) -> Result<Self, ChecksumError> {
        if let Some((position, character)) = input
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii_digit())
        {
            return Err(ChecksumError::InvalidCharacter {
                position,
                character,
            });
        }
        Ok(Self(input.to_owned()))
    }

    /// Returns the number of digits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the string holds no digits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the numeric value of each digit.
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.chars().filter_map(|c| c.to_digit(10))
    }

    /// Sums each digit multiplied by the weight at the same position.
    ///
    /// Stops at whichever of the digits or the weights runs out first.
    pub fn weighted_sum<I>(&self, weights: I) -> u32
    where
        I: IntoIterator<Item = u32>,
    {
        self.values()
            .zip(weights)
            .map(|(digit, weight)| digit * weight)
            .sum()
    }
}

impl FromStr for DigitString {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DigitString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Converts a value in `0..=9` to its ASCII digit.
///
/// Values above nine are reduced modulo ten.
pub(crate) fn digit_char(value: u32) -> char {
    char::from_digit(value.rem_euclid(10), 10).unwrap_or('0')
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("0")]
    #[case("0123456789")]
    fn accepts_digit_only_input(#[case] input: &str) {
        let digits = DigitString::parse(input).expect("valid digits");
        assert_eq!(digits.as_str(), input);
    }

    #[rstest]
    #[case("12a4", 2, 'a')]
    #[case("-123", 0, '-')]
    #[case("+1", 0, '+')]
    #[case("12 3", 2, ' ')]
    #[case("١٢", 0, '١')]
    fn rejects_non_digit_input(#[case] input: &str, #[case] position: usize, #[case] character: char) {
        assert_eq!(
            DigitString::parse(input),
            Err(ChecksumError::InvalidCharacter {
                position,
                character
            })
        );
    }

    #[test]
    fn weighted_sum_uses_positional_weights() {
        let digits = DigitString::parse("1234").expect("valid digits");
        assert_eq!(digits.weighted_sum([1, 3, 1, 3]), 1 + 6 + 3 + 12);
    }

    #[test]
    fn weighted_sum_stops_at_shorter_side() {
        let digits = DigitString::parse("99").expect("valid digits");
        assert_eq!(digits.weighted_sum([1, 1, 1, 1]), 18);
    }

    #[test]
    fn digit_char_wraps_values() {
        assert_eq!(digit_char(7), '7');
        assert_eq!(digit_char(10), '0');
    }
}

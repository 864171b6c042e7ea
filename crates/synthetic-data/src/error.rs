//! Error types for the synthetic-data crate.
//!
//! Calculator and national-identifier errors are surfaced on their own so
//! the pure functions can be used without a [`crate::Generator`]; the
//! generator wraps them in [`GeneratorError`].

use thiserror::Error;

/// Errors raised by the checksum calculators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecksumError {
    /// The digit string does not have a length the algorithm accepts.
    #[error("invalid length for {algorithm}: expected {expected}, found {actual}")]
    InvalidLength {
        /// Name of the checksum algorithm.
        algorithm: &'static str,
        /// Human-readable list of accepted lengths.
        expected: &'static str,
        /// Length of the rejected input.
        actual: usize,
    },

    /// The input contains a character outside `0`-`9`.
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter {
        /// Zero-based character position.
        position: usize,
        /// The rejected character.
        character: char,
    },
}

/// Invalid arguments supplied to the CNP generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NationalIdError {
    /// The gender is neither `male` nor `female`.
    #[error("gender must be 'male' or 'female', '{value}' received")]
    InvalidGender {
        /// The rejected gender value.
        value: String,
    },

    /// The date of birth is not in `Y`, `Y-m` or `Y-m-d` form, or names an
    /// impossible calendar date.
    #[error("invalid date of birth '{value}'")]
    InvalidDateOfBirth {
        /// The rejected date of birth.
        value: String,
    },

    /// The year of birth falls outside the encodable range.
    #[error("year of birth must be between {min} and {max}, {year} received")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
        /// Smallest accepted year.
        min: i32,
        /// Largest accepted year.
        max: i32,
    },

    /// The county code is not one of the administrative codes.
    #[error("invalid county code '{value}'")]
    InvalidCountyCode {
        /// The rejected county code.
        value: String,
    },
}

/// Errors surfaced by [`crate::Generator`] calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// No registered provider exposes the requested formatter.
    #[error("unknown formatter '{name}'")]
    UnknownFormatter {
        /// The formatter name that failed to resolve.
        name: String,
    },

    /// The unique modifier ran out of attempts.
    #[error("no unique value for '{formatter}' after {attempts} attempts")]
    NoUniqueValue {
        /// Formatter being made unique.
        formatter: String,
        /// Number of attempts made before giving up.
        attempts: usize,
    },

    /// A formatter received an argument it cannot use.
    #[error("invalid argument for '{formatter}': {message}")]
    InvalidArgument {
        /// Formatter that rejected the argument.
        formatter: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// The requested timezone is not an IANA zone name.
    #[error("unknown timezone '{name}'")]
    InvalidTimezone {
        /// The rejected timezone name.
        name: String,
    },

    /// A checksum calculation failed.
    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    /// CNP generation rejected its input.
    #[error(transparent)]
    NationalId(#[from] NationalIdError),
}

impl GeneratorError {
    /// Returns `true` for errors caused by caller-supplied arguments.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. }
                | Self::InvalidTimezone { .. }
                | Self::Checksum(_)
                | Self::NationalId(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_length_formats_correctly() {
        let err = ChecksumError::InvalidLength {
            algorithm: "EAN",
            expected: "7 or 12",
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "invalid length for EAN: expected 7 or 12, found 5"
        );
    }

    #[test]
    fn invalid_character_formats_correctly() {
        let err = ChecksumError::InvalidCharacter {
            position: 3,
            character: 'x',
        };
        assert_eq!(err.to_string(), "invalid character 'x' at position 3");
    }

    #[test]
    fn year_out_of_range_formats_correctly() {
        let err = NationalIdError::YearOutOfRange {
            year: 1799,
            min: 1800,
            max: 2099,
        };
        assert_eq!(
            err.to_string(),
            "year of birth must be between 1800 and 2099, 1799 received"
        );
    }

    #[test]
    fn unknown_formatter_formats_correctly() {
        let err = GeneratorError::UnknownFormatter {
            name: "unicorn".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown formatter 'unicorn'");
    }

    #[test]
    fn national_id_errors_are_transparent() {
        let err = GeneratorError::from(NationalIdError::InvalidCountyCode {
            value: "JK".to_owned(),
        });
        assert_eq!(err.to_string(), "invalid county code 'JK'");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn lookup_failures_are_not_argument_errors() {
        let err = GeneratorError::NoUniqueValue {
            formatter: "boolean".to_owned(),
            attempts: 10,
        };
        assert!(!err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "no unique value for 'boolean' after 10 attempts"
        );
    }
}

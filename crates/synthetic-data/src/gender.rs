//! Gender selector shared by person-related formatters.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::NationalIdError;

/// The genders person formatters know how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// `male`
    Male,
    /// `female`
    Female,
}

impl Gender {
    /// Picks a gender uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_ratio(1, 2) {
            Self::Male
        } else {
            Self::Female
        }
    }

    /// Returns the lowercase name used in formatter arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = NationalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(NationalIdError::InvalidGender {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("male", Gender::Male)]
    #[case("female", Gender::Female)]
    fn parses_known_genders(#[case] input: &str, #[case] expected: Gender) {
        assert_eq!(input.parse::<Gender>(), Ok(expected));
        assert_eq!(expected.to_string(), input);
    }

    #[rstest]
    #[case("elf")]
    #[case("ent")]
    #[case("fmle")]
    #[case("mal")]
    #[case("Male")]
    fn rejects_unknown_genders(#[case] input: &str) {
        assert_eq!(
            input.parse::<Gender>(),
            Err(NationalIdError::InvalidGender {
                value: input.to_owned()
            })
        );
    }

    #[test]
    fn random_produces_both_genders() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let picks: Vec<Gender> = (0..64).map(|_| Gender::random(&mut rng)).collect();
        assert!(picks.contains(&Gender::Male));
        assert!(picks.contains(&Gender::Female));
    }
}

//! Checksum-valid barcode numbers.

use rand::Rng;

use crate::calculator::ean::{self, EanVariant};
use crate::calculator::isbn;
use crate::error::ChecksumError;
use crate::provider::{Formatter, FormatterTable, Provider};
use crate::providers::base::numerify;
use crate::value::Value;

/// Generates an EAN-8 or EAN-13 code with a correct check digit.
///
/// # Errors
///
/// Only fails if the checksum calculator rejects its own input, which the
/// digit-only template rules out.
pub fn ean<R: Rng + ?Sized>(rng: &mut R, variant: EanVariant) -> Result<String, ChecksumError> {
    let partial = numerify(rng, &"#".repeat(variant.partial_len()));
    let check = ean::checksum(&partial)?;
    Ok(format!("{partial}{check}"))
}

/// Generates an ISBN-10 with a correct check character.
///
/// # Errors
///
/// As for [`ean`].
pub fn isbn10<R: Rng + ?Sized>(rng: &mut R) -> Result<String, ChecksumError> {
    let partial = numerify(rng, &"#".repeat(isbn::PARTIAL_LEN));
    let check = isbn::checksum(&partial)?;
    Ok(format!("{partial}{check}"))
}

/// Generates a `978`/`979`-prefixed ISBN-13.
///
/// # Errors
///
/// As for [`ean`].
pub fn isbn13<R: Rng + ?Sized>(rng: &mut R) -> Result<String, ChecksumError> {
    let prefix = if rng.random_ratio(1, 2) { "978" } else { "979" };
    let partial = numerify(rng, &format!("{prefix}#########"));
    let check = ean::checksum(&partial)?;
    Ok(format!("{partial}{check}"))
}

/// Provider exposing `ean8`, `ean13`, `isbn10` and `isbn13`.
#[derive(Debug, Clone)]
pub struct Barcode {
    table: FormatterTable,
}

impl Barcode {
    /// Builds the provider.
    #[must_use]
    pub fn new() -> Self {
        let table = FormatterTable::new()
            .with("ean8", |generator, _| {
                Ok(Value::from(ean(generator.rng(), EanVariant::Ean8)?))
            })
            .with("ean13", |generator, _| {
                Ok(Value::from(ean(generator.rng(), EanVariant::Ean13)?))
            })
            .with("isbn10", |generator, _| Ok(Value::from(isbn10(generator.rng())?)))
            .with("isbn13", |generator, _| Ok(Value::from(isbn13(generator.rng())?)));
        Self { table }
    }
}

impl Default for Barcode {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for Barcode {
    fn name(&self) -> &str {
        "barcode"
    }

    fn try_resolve(&self, formatter: &str) -> Option<Formatter> {
        self.table.get(formatter)
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::Generator;

    #[fixture]
    fn generator() -> Generator {
        let mut generator = Generator::with_seed(13);
        generator.add_provider(Barcode::new());
        generator
    }

    #[rstest]
    #[case("ean8", 8)]
    #[case("ean13", 13)]
    fn ean_codes_validate(mut generator: Generator, #[case] name: &str, #[case] len: usize) {
        for _ in 0..100 {
            let code = generator.format_string(name, &[]).expect("code");
            assert_eq!(code.len(), len);
            assert!(ean::is_valid(&code), "{code}");
        }
    }

    #[rstest]
    fn isbn10_codes_validate(mut generator: Generator) {
        for _ in 0..100 {
            let code = generator.format_string("isbn10", &[]).expect("code");
            assert!(isbn::is_valid(&code), "{code}");
        }
    }

    #[rstest]
    fn isbn13_codes_are_bookland_eans(mut generator: Generator) {
        for _ in 0..100 {
            let code = generator.format_string("isbn13", &[]).expect("code");
            assert!(code.starts_with("978") || code.starts_with("979"), "{code}");
            assert!(ean::is_valid(&code), "{code}");
        }
    }
}

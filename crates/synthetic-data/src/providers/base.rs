//! Template helpers and the `base` provider.
//!
//! Template placeholders:
//!
//! - `#` any digit
//! - `%` a digit from 1 to 9
//! - `?` a lowercase ASCII letter
//! - `*` either a digit or a letter (`bothify` only)

use rand::Rng;

use crate::digits::digit_char;
use crate::provider::{Formatter, FormatterTable, Provider};
use crate::value::Value;

const LETTERS: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Returns a random digit from 0 to 9.
pub fn random_digit<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(0..10)
}

/// Returns a random digit from 1 to 9.
pub fn random_digit_not_null<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(1..10)
}

/// Returns a random lowercase ASCII letter.
pub fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    let index = rng.random_range(0..LETTERS.len());
    LETTERS.get(index).map_or('a', |&letter| char::from(letter))
}

/// Largest digit count [`random_number`] accepts; wider numbers overflow
/// `i64`.
pub const MAX_NUMBER_DIGITS: u32 = 18;

/// Returns a random number with up to `digits` digits, or exactly `digits`
/// digits when `strict` is set. Returns `None` for widths above
/// [`MAX_NUMBER_DIGITS`].
pub fn random_number<R: Rng + ?Sized>(rng: &mut R, digits: u32, strict: bool) -> Option<i64> {
    if digits > MAX_NUMBER_DIGITS {
        return None;
    }
    let ceiling = 10_i64.checked_pow(digits)?;
    let floor = if strict && digits > 0 {
        10_i64.checked_pow(digits - 1)?
    } else {
        0
    };
    Some(rng.random_range(floor..ceiling))
}

/// Replaces `#` with digits and `%` with non-zero digits.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use synthetic_data::providers::base::numerify;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(5);
/// let code = numerify(&mut rng, "AB-##%");
/// assert!(code.starts_with("AB-"));
/// assert!(!code.ends_with('0'));
/// ```
pub fn numerify<R: Rng + ?Sized>(rng: &mut R, template: &str) -> String {
    template
        .chars()
        .map(|c| match c {
            '#' => digit_char(random_digit(rng)),
            '%' => digit_char(random_digit_not_null(rng)),
            other => other,
        })
        .collect()
}

/// Replaces `?` with lowercase letters.
pub fn lexify<R: Rng + ?Sized>(rng: &mut R, template: &str) -> String {
    template
        .chars()
        .map(|c| if c == '?' { random_letter(rng) } else { c })
        .collect()
}

/// Replaces `*` with a digit or letter, then applies [`lexify`] and
/// [`numerify`].
pub fn bothify<R: Rng + ?Sized>(rng: &mut R, template: &str) -> String {
    let expanded: String = template
        .chars()
        .map(|c| match c {
            '*' if rng.random_ratio(1, 2) => '#',
            '*' => '?',
            other => other,
        })
        .collect();
    let lettered = lexify(rng, &expanded);
    numerify(rng, &lettered)
}

/// Formatters available to every generator: `numerify`, `lexify`,
/// `bothify`, `random_digit`, `random_digit_not_null`, `random_number`,
/// `random_letter` and `number_between`.
#[derive(Debug, Clone)]
pub struct Base {
    table: FormatterTable,
}

impl Base {
    /// Builds the provider.
    #[must_use]
    pub fn new() -> Self {
        let table = FormatterTable::new()
            .with("numerify", |generator, args| {
                let template = args.text(0)?.unwrap_or("###");
                Ok(Value::from(numerify(generator.rng(), template)))
            })
            .with("lexify", |generator, args| {
                let template = args.text(0)?.unwrap_or("????");
                Ok(Value::from(lexify(generator.rng(), template)))
            })
            .with("bothify", |generator, args| {
                let template = args.text(0)?.unwrap_or("## ??");
                Ok(Value::from(bothify(generator.rng(), template)))
            })
            .with("random_digit", |generator, _| {
                Ok(Value::Int(i64::from(random_digit(generator.rng()))))
            })
            .with("random_digit_not_null", |generator, _| {
                Ok(Value::Int(i64::from(random_digit_not_null(generator.rng()))))
            })
            .with("random_number", |generator, args| {
                let digits = match args.int(0)? {
                    Some(count) => u32::try_from(count).map_err(|_| {
                        args.invalid(format!(
                            "digit count must be between 0 and {MAX_NUMBER_DIGITS}, {count} received"
                        ))
                    })?,
                    None => generator.rng().random_range(1..=9),
                };
                let strict = args.bool(1)?.unwrap_or(false);
                random_number(generator.rng(), digits, strict)
                    .map(Value::Int)
                    .ok_or_else(|| {
                        args.invalid(format!(
                            "at most {MAX_NUMBER_DIGITS} digits are supported, {digits} requested"
                        ))
                    })
            })
            .with("random_letter", |generator, _| {
                Ok(Value::from(random_letter(generator.rng())))
            })
            .with("number_between", |generator, args| {
                let first = args.int(0)?.unwrap_or(0);
                let second = args.int(1)?.unwrap_or(i64::from(i32::MAX));
                let (low, high) = if first <= second {
                    (first, second)
                } else {
                    (second, first)
                };
                Ok(Value::Int(generator.rng().random_range(low..=high)))
            });
        Self { table }
    }
}

impl Default for Base {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for Base {
    fn name(&self) -> &str {
        "base"
    }

    fn try_resolve(&self, formatter: &str) -> Option<Formatter> {
        self.table.get(formatter)
    }
}

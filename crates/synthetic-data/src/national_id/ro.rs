//! Romanian personal numeric code (CNP).
//!
//! A CNP has thirteen digits:
//!
//! ```text
//! S YY MM DD JJ NNN C
//! ```
//!
//! - `S` encodes sex and century (`9` for non-residents)
//! - `YYMMDD` is the date of birth
//! - `JJ` is the numeric county code
//! - `NNN` is a sequence number whose last digit is never zero
//! - `C` is the check digit
//!
//! The check digit is the sum of the first twelve digits weighted by
//! `279146358279`, reduced modulo 11, with a remainder of 10 written as 1.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, TimeDelta};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::digits::{DigitString, digit_char};
use crate::error::{ChecksumError, NationalIdError};
use crate::gender::Gender;

/// Earliest year of birth a CNP can encode.
pub const MIN_BIRTH_YEAR: i32 = 1800;

/// Latest year of birth a CNP can encode.
pub const MAX_BIRTH_YEAR: i32 = 2099;

/// Total length of a CNP.
pub const CNP_LEN: usize = 13;

const CHECK_WEIGHTS: [u32; 12] = [2, 7, 9, 1, 4, 6, 3, 5, 8, 2, 7, 9];

const NON_RESIDENT_DIGIT: u32 = 9;

const COUNTY_CODES: [(&str, &str); 48] = [
    ("AB", "01"),
    ("AR", "02"),
    ("AG", "03"),
    ("B", "40"),
    ("BC", "04"),
    ("BH", "05"),
    ("BN", "06"),
    ("BT", "07"),
    ("BV", "08"),
    ("BR", "09"),
    ("BZ", "10"),
    ("CS", "11"),
    ("CL", "51"),
    ("CJ", "12"),
    ("CT", "13"),
    ("CV", "14"),
    ("DB", "15"),
    ("DJ", "16"),
    ("GL", "17"),
    ("GR", "52"),
    ("GJ", "18"),
    ("HR", "19"),
    ("HD", "20"),
    ("IL", "21"),
    ("IS", "22"),
    ("IF", "23"),
    ("MM", "24"),
    ("MH", "25"),
    ("MS", "26"),
    ("NT", "27"),
    ("OT", "28"),
    ("PH", "29"),
    ("SM", "30"),
    ("SJ", "31"),
    ("SB", "32"),
    ("SV", "33"),
    ("TR", "34"),
    ("TM", "35"),
    ("TL", "36"),
    ("VS", "37"),
    ("VL", "38"),
    ("VN", "39"),
    ("B1", "41"),
    ("B2", "42"),
    ("B3", "43"),
    ("B4", "44"),
    ("B5", "45"),
    ("B6", "46"),
];

/// A Romanian administrative county, as encoded in a CNP.
///
/// # Example
///
/// ```
/// use synthetic_data::national_id::ro::CountyCode;
///
/// let county: CountyCode = "B2".parse().expect("known county");
/// assert_eq!(county.numeric(), "42");
/// assert!("JK".parse::<CountyCode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountyCode {
    abbreviation: &'static str,
    numeric: &'static str,
}

impl CountyCode {
    /// Iterates over every valid county code.
    pub fn all() -> impl Iterator<Item = Self> {
        COUNTY_CODES
            .iter()
            .map(|&(abbreviation, numeric)| Self {
                abbreviation,
                numeric,
            })
    }

    /// Picks a county uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let &(abbreviation, numeric) = COUNTY_CODES.choose(rng).unwrap_or(&("B", "40"));
        Self {
            abbreviation,
            numeric,
        }
    }

    /// Returns the one- or two-letter county abbreviation.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        self.abbreviation
    }

    /// Returns the two-digit code written into the CNP.
    #[must_use]
    pub const fn numeric(self) -> &'static str {
        self.numeric
    }
}

impl FromStr for CountyCode {
    type Err = NationalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|county| county.abbreviation == s)
            .ok_or_else(|| NationalIdError::InvalidCountyCode {
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for CountyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation)
    }
}

/// A full or partial date of birth.
///
/// Partial dates have their missing month and day chosen at random when a
/// CNP is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BirthDate {
    /// Only the year is fixed.
    Year(i32),
    /// Year and month are fixed.
    YearMonth(i32, u32),
    /// The exact day is fixed.
    Exact(NaiveDate),
}

impl BirthDate {
    /// Returns the year of birth.
    #[must_use]
    pub fn year(self) -> i32 {
        match self {
            Self::Year(year) | Self::YearMonth(year, _) => year,
            Self::Exact(date) => date.year(),
        }
    }

    /// Resolves the birth date to a concrete day.
    ///
    /// # Errors
    ///
    /// Returns [`NationalIdError::YearOutOfRange`] when the year cannot be
    /// encoded and [`NationalIdError::InvalidDateOfBirth`] for impossible
    /// months.
    fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Result<NaiveDate, NationalIdError> {
        let year = encodable_year(self.year())?;
        let invalid = || NationalIdError::InvalidDateOfBirth {
            value: self.to_string(),
        };
        match self {
            Self::Exact(date) => Ok(date),
            Self::Year(_) => {
                let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
                let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(invalid)?;
                random_day_between(rng, first, last).ok_or_else(invalid)
            }
            Self::YearMonth(_, month) => {
                let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .ok_or_else(invalid)?;
                random_day_between(rng, first, last).ok_or_else(invalid)
            }
        }
    }
}

/// Passes `year` through when a CNP can encode it.
const fn encodable_year(year: i32) -> Result<i32, NationalIdError> {
    if year < MIN_BIRTH_YEAR || year > MAX_BIRTH_YEAR {
        return Err(NationalIdError::YearOutOfRange {
            year,
            min: MIN_BIRTH_YEAR,
            max: MAX_BIRTH_YEAR,
        });
    }
    Ok(year)
}

impl From<NaiveDate> for BirthDate {
    fn from(date: NaiveDate) -> Self {
        Self::Exact(date)
    }
}

impl FromStr for BirthDate {
    type Err = NationalIdError;

    /// Parses `Y`, `Y-m` or `Y-m-d`. Years a CNP cannot encode are
    /// rejected whichever form is used.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NationalIdError::InvalidDateOfBirth {
            value: s.to_owned(),
        };
        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [year_text] => {
                let year: i32 = year_text.parse().map_err(|_| invalid())?;
                Ok(Self::Year(encodable_year(year)?))
            }
            [year_text, month_text] => {
                let year: i32 = year_text.parse().map_err(|_| invalid())?;
                let month: u32 = month_text.parse().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(invalid());
                }
                Ok(Self::YearMonth(encodable_year(year)?, month))
            }
            [year_text, month_text, day_text] => {
                let year: i32 = year_text.parse().map_err(|_| invalid())?;
                let month: u32 = month_text.parse().map_err(|_| invalid())?;
                let day: u32 = day_text.parse().map_err(|_| invalid())?;
                NaiveDate::from_ymd_opt(encodable_year(year)?, month, day)
                    .map(Self::Exact)
                    .ok_or_else(invalid)
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::YearMonth(year, month) => write!(f, "{year}-{month:02}"),
            Self::Exact(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Parameters for [`generate`]. Every field left empty is chosen at random.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CnpRequest {
    /// Gender encoded in the first digit.
    pub gender: Option<Gender>,
    /// Date of birth; a random year between [`MIN_BIRTH_YEAR`] and
    /// [`MAX_BIRTH_YEAR`] when absent.
    pub date_of_birth: Option<BirthDate>,
    /// County of registration.
    pub county: Option<CountyCode>,
    /// Non-residents always get first digit `9`.
    pub is_resident: bool,
}

impl Default for CnpRequest {
    fn default() -> Self {
        Self {
            gender: None,
            date_of_birth: None,
            county: None,
            is_resident: true,
        }
    }
}

impl CnpRequest {
    /// Builds a request from loosely typed text arguments.
    ///
    /// Empty gender and date strings count as absent; an empty county does
    /// not.
    ///
    /// # Errors
    ///
    /// Returns the [`NationalIdError`] for the first argument that fails to
    /// parse, checking gender, then date of birth, then county.
    ///
    /// # Example
    ///
    /// ```
    /// use synthetic_data::national_id::ro::CnpRequest;
    ///
    /// let request = CnpRequest::parse(Some("female"), Some("1981-06-16"), Some("B2"), true)
    ///     .expect("valid request");
    /// assert_eq!(request.county.map(|c| c.numeric()), Some("42"));
    /// assert!(CnpRequest::parse(Some("elf"), None, None, true).is_err());
    /// ```
    pub fn parse(
        gender: Option<&str>,
        date_of_birth: Option<&str>,
        county: Option<&str>,
        is_resident: bool,
    ) -> Result<Self, NationalIdError> {
        Ok(Self {
            gender: gender
                .filter(|value| !value.is_empty())
                .map(str::parse::<Gender>)
                .transpose()?,
            date_of_birth: date_of_birth
                .filter(|value| !value.is_empty())
                .map(str::parse::<BirthDate>)
                .transpose()?,
            county: county.map(str::parse::<CountyCode>).transpose()?,
            is_resident,
        })
    }
}

/// Generates a CNP satisfying `request`.
///
/// # Errors
///
/// Returns [`NationalIdError`] when the requested date of birth cannot be
/// encoded. Nothing is generated in that case.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use synthetic_data::Gender;
/// use synthetic_data::national_id::ro::{self, CnpRequest};
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let request = CnpRequest {
///     gender: Some(Gender::Male),
///     date_of_birth: Some("1981-06-16".parse().expect("date")),
///     county: Some("B2".parse().expect("county")),
///     is_resident: true,
/// };
/// let cnp = ro::generate(&mut rng, &request).expect("generated");
/// assert!(cnp.starts_with("181061642"));
/// assert!(ro::is_valid_cnp(&cnp));
/// ```
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    request: &CnpRequest,
) -> Result<String, NationalIdError> {
    let birth = request
        .date_of_birth
        .unwrap_or_else(|| BirthDate::Year(rng.random_range(MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR)));
    let date = birth.resolve(rng)?;
    let gender = request.gender.unwrap_or_else(|| Gender::random(rng));
    let county = request.county.unwrap_or_else(|| CountyCode::random(rng));

    let mut cnp = String::with_capacity(CNP_LEN);
    cnp.push(digit_char(gender_digit(gender, date, request.is_resident)));
    cnp.push_str(&date.format("%y%m%d").to_string());
    cnp.push_str(county.numeric());
    cnp.push(digit_char(rng.random_range(0..10)));
    cnp.push(digit_char(rng.random_range(0..10)));
    cnp.push(digit_char(rng.random_range(1..10)));

    let partial = DigitString::parse(&cnp).map_err(|_| NationalIdError::InvalidDateOfBirth {
        value: birth.to_string(),
    })?;
    cnp.push(check_digit(&partial));
    Ok(cnp)
}

/// Computes the check digit for the first twelve digits of a CNP.
///
/// # Errors
///
/// Returns [`ChecksumError::InvalidLength`] unless `partial` has twelve
/// characters and [`ChecksumError::InvalidCharacter`] for non-digit input.
pub fn checksum(partial: &str) -> Result<char, ChecksumError> {
    let digits = DigitString::parse(partial)?;
    if digits.len() != CHECK_WEIGHTS.len() {
        return Err(ChecksumError::InvalidLength {
            algorithm: "CNP",
            expected: "12",
            actual: digits.len(),
        });
    }
    Ok(check_digit(&digits))
}

/// Returns `true` when `value` is structurally a CNP and its check digit
/// matches.
///
/// The first digit must be non-zero, the month `01`-`12`, the day `01`-`31`
/// and the county one of the known numeric codes.
#[must_use]
pub fn is_valid_cnp(value: &str) -> bool {
    if value.len() != CNP_LEN || DigitString::parse(value).is_err() {
        return false;
    }
    let field = |range: std::ops::Range<usize>| {
        value.get(range).and_then(|digits| digits.parse::<u32>().ok())
    };
    let (Some(sex), Some(month), Some(day), Some(county)) =
        (field(0..1), field(3..5), field(5..7), value.get(7..9))
    else {
        return false;
    };
    if sex == 0 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return false;
    }
    if !COUNTY_CODES.iter().any(|&(_, numeric)| numeric == county) {
        return false;
    }
    let Some((partial, check)) = value.split_at_checked(CHECK_WEIGHTS.len()) else {
        return false;
    };
    checksum(partial).is_ok_and(|expected| check.starts_with(expected))
}

fn gender_digit(gender: Gender, date: NaiveDate, is_resident: bool) -> u32 {
    if !is_resident {
        return NON_RESIDENT_DIGIT;
    }
    match (date.year(), gender) {
        (..1900, Gender::Male) => 3,
        (..1900, Gender::Female) => 4,
        (..2000, Gender::Male) => 1,
        (..2000, Gender::Female) => 2,
        (_, Gender::Male) => 5,
        (_, Gender::Female) => 6,
    }
}

fn check_digit(partial: &DigitString) -> char {
    match partial.weighted_sum(CHECK_WEIGHTS).rem_euclid(11) {
        10 => '1',
        remainder => digit_char(remainder),
    }
}

fn random_day_between<R: Rng + ?Sized>(
    rng: &mut R,
    first: NaiveDate,
    last: NaiveDate,
) -> Option<NaiveDate> {
    let span = (last - first).num_days();
    first.checked_add_signed(TimeDelta::days(rng.random_range(0..=span)))
}

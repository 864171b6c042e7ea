//! Romanian personal identifiers.

use crate::error::GeneratorError;
use crate::national_id::ro::{self, CnpRequest};
use crate::provider::{Formatter, FormatterTable, Provider};
use crate::value::{Args, Value};

/// Reads the `cnp` arguments: gender, date of birth, county code and
/// residency, all optional.
fn cnp_request(args: Args<'_>) -> Result<CnpRequest, GeneratorError> {
    let date_of_birth = args.date_text(1)?;
    let request = CnpRequest::parse(
        args.text(0)?,
        date_of_birth.as_deref(),
        args.text(2)?,
        args.bool(3)?.unwrap_or(true),
    )?;
    Ok(request)
}

/// Provider exposing `cnp`, the Romanian personal numeric code.
///
/// # Example
///
/// ```
/// use synthetic_data::{Generator, Value};
/// use synthetic_data::national_id::ro::is_valid_cnp;
/// use synthetic_data::providers::ro_ro;
///
/// let mut generator = Generator::with_seed(3);
/// generator.add_provider(ro_ro::Person::new());
///
/// let cnp = generator
///     .format_string("cnp", &[Value::from("female"), Value::from("1990-02"), Value::from("CJ")])
///     .expect("cnp");
/// assert!(cnp.starts_with("29002"));
/// assert!(is_valid_cnp(&cnp));
/// ```
#[derive(Debug, Clone)]
pub struct Person {
    table: FormatterTable,
}

impl Person {
    /// Builds the provider.
    #[must_use]
    pub fn new() -> Self {
        let table = FormatterTable::new().with("cnp", |generator, args| {
            let request = cnp_request(args)?;
            Ok(Value::from(ro::generate(generator.rng(), &request)?))
        });
        Self { table }
    }
}

impl Default for Person {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for Person {
    fn name(&self) -> &str {
        "ro_RO person"
    }

    fn try_resolve(&self, formatter: &str) -> Option<Formatter> {
        self.table.get(formatter)
    }
}

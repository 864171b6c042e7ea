//! Builds generators with the provider stack for a locale.
//!
//! Every generator receives the default providers; locale providers are
//! added afterwards so their formatters shadow the defaults.

use tracing::debug;

use crate::config::GeneratorSettings;
use crate::error::GeneratorError;
use crate::generator::Generator;
use crate::providers::{Barcode, Base, DateTimeProvider, Internet, Person, ro_ro};

/// Builds a generator from loaded settings.
///
/// # Errors
///
/// Returns [`GeneratorError::InvalidTimezone`] when the configured timezone
/// is not an IANA zone.
///
/// # Example
///
/// ```
/// use synthetic_data::GeneratorSettings;
/// use synthetic_data::factory;
///
/// let settings = GeneratorSettings {
///     locale: Some("ro_RO".to_owned()),
///     timezone: Some("Europe/Bucharest".to_owned()),
///     seed: Some(7),
///     max_unique_attempts: 10_000,
/// };
/// let mut generator = factory::create(&settings).expect("generator");
/// assert_eq!(generator.locale(), "ro_RO");
/// assert!(generator.get("cnp").is_ok());
/// ```
pub fn create(settings: &GeneratorSettings) -> Result<Generator, GeneratorError> {
    let timezone = settings.timezone()?;
    let base = settings
        .seed
        .map_or_else(Generator::new, Generator::with_seed);
    let mut generator = base
        .with_timezone(timezone)
        .with_locale(settings.locale())
        .with_max_unique_attempts(settings.max_unique_attempts);
    register_providers(&mut generator);
    debug!(
        locale = settings.locale(),
        timezone = %timezone,
        seeded = settings.seed.is_some(),
        providers = generator.registry().len(),
        "generator created"
    );
    Ok(generator)
}

/// Builds an entropy-seeded generator for `locale` with default settings.
#[must_use]
pub fn create_for_locale(locale: &str) -> Generator {
    let mut generator = Generator::new().with_locale(locale);
    register_providers(&mut generator);
    generator
}

/// Registers the default stack, then the providers of the generator's
/// locale. Locales without providers of their own keep the default stack.
fn register_providers(generator: &mut Generator) {
    generator.add_provider(Base::new());
    generator.add_provider(Person::new());
    generator.add_provider(Internet::new());
    generator.add_provider(DateTimeProvider::new());
    generator.add_provider(Barcode::new());
    if generator.locale() == "ro_RO" {
        generator.add_provider(ro_ro::Person::new());
    }
}

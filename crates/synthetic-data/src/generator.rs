//! The generator facade.
//!
//! A [`Generator`] owns a [`ProviderRegistry`], a seedable RNG and the
//! per-instance configuration that time- and locale-sensitive formatters
//! read. Every call resolves its formatter afresh; nothing is cached except
//! the values remembered by the [`Unique`] modifier.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use chrono_tz::Tz;
use mockable::{Clock, DefaultClock};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::GeneratorError;
use crate::provider::{Provider, ProviderRegistry};
use crate::value::Value;

/// Default number of attempts the unique modifier makes before giving up.
pub const DEFAULT_MAX_UNIQUE_ATTEMPTS: usize = 10_000;

/// Locale assumed when none is configured.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Entry point for fake data generation.
///
/// # Example
///
/// ```
/// use synthetic_data::{Generator, Value};
/// use synthetic_data::providers::Barcode;
///
/// let mut generator = Generator::with_seed(42);
/// generator.add_provider(Barcode::new());
///
/// let ean = generator.format_string("ean13", &[]).expect("ean13");
/// assert_eq!(ean.len(), 13);
/// assert!(generator.get("unicorn").is_err());
/// ```
pub struct Generator {
    registry: ProviderRegistry,
    rng: ChaCha8Rng,
    clock: Arc<dyn Clock + Send + Sync>,
    timezone: Tz,
    initial_timezone: Tz,
    locale: String,
    unique_values: HashMap<String, HashSet<String>>,
    max_unique_attempts: usize,
}

impl Generator {
    /// Creates a generator with no providers and an entropy-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Creates a generator whose output is fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        Self {
            registry: ProviderRegistry::new(),
            rng,
            clock: Arc::new(DefaultClock),
            timezone: Tz::UTC,
            initial_timezone: Tz::UTC,
            locale: DEFAULT_LOCALE.to_owned(),
            unique_values: HashMap::new(),
            max_unique_attempts: DEFAULT_MAX_UNIQUE_ATTEMPTS,
        }
    }

    /// Replaces the clock used for "now".
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the timezone and makes it the one [`Self::reset_default_timezone`]
    /// restores.
    #[must_use]
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self.initial_timezone = timezone;
        self
    }

    /// Sets the locale tag.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Sets how many attempts the unique modifier makes.
    #[must_use]
    pub fn with_max_unique_attempts(mut self, attempts: usize) -> Self {
        self.max_unique_attempts = attempts.max(1);
        self
    }

    /// Registers a provider; its formatters shadow same-named formatters of
    /// providers added earlier.
    pub fn add_provider<P: Provider + 'static>(&mut self, provider: P) {
        debug!(
            provider = provider.name(),
            ordinal = self.registry.len(),
            "provider registered"
        );
        self.registry.add_provider(provider);
    }

    /// Returns the provider registry.
    #[must_use]
    pub const fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Runs the formatter `name` without arguments.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::UnknownFormatter`] when no provider exposes
    /// `name`, or whatever the formatter itself returns.
    pub fn get(&mut self, name: &str) -> Result<Value, GeneratorError> {
        self.format(name, &[])
    }

    /// Runs the formatter `name` with positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::UnknownFormatter`] when no provider exposes
    /// `name`, or whatever the formatter itself returns.
    pub fn format(&mut self, name: &str, args: &[Value]) -> Result<Value, GeneratorError> {
        let formatter =
            self.registry
                .resolve(name)
                .ok_or_else(|| GeneratorError::UnknownFormatter {
                    name: name.to_owned(),
                })?;
        formatter.invoke(self, args)
    }

    /// Runs a formatter and coerces its result to a string.
    ///
    /// # Errors
    ///
    /// As for [`Self::format`].
    pub fn format_string(&mut self, name: &str, args: &[Value]) -> Result<String, GeneratorError> {
        self.format(name, args).map(|value| value.to_string())
    }

    /// Replaces every `{{formatter}}` token in `template` with the output of
    /// that formatter.
    ///
    /// An unterminated `{{` is copied through unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a referenced formatter.
    ///
    /// # Example
    ///
    /// ```
    /// use synthetic_data::Generator;
    /// use synthetic_data::providers::Barcode;
    ///
    /// let mut generator = Generator::with_seed(7);
    /// generator.add_provider(Barcode::new());
    /// let text = generator.parse("EAN: {{ ean8 }}").expect("parsed");
    /// assert_eq!(text.len(), "EAN: ".len() + 8);
    /// ```
    pub fn parse(&mut self, template: &str) -> Result<String, GeneratorError> {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            let (literal, token) = rest.split_at(start);
            output.push_str(literal);
            let body = token.get(2..).unwrap_or_default();
            let Some(end) = body.find("}}") else {
                output.push_str(token);
                return Ok(output);
            };
            let name = body.get(..end).unwrap_or_default().trim();
            output.push_str(&self.format_string(name, &[])?);
            rest = body.get(end + 2..).unwrap_or_default();
        }
        output.push_str(rest);
        Ok(output)
    }

    /// Returns a modifier that only yields values not returned before for
    /// the same formatter.
    pub fn unique(&mut self) -> Unique<'_> {
        Unique { generator: self }
    }

    /// Forgets every value remembered by the unique modifier.
    pub fn reset_unique(&mut self) {
        self.unique_values.clear();
    }

    /// Returns a modifier that yields a value `chance_percent`% of the time
    /// and [`Value::Null`] otherwise. Percentages above 100 count as 100.
    pub fn optional(&mut self, chance_percent: u8) -> Optional<'_> {
        Optional {
            generator: self,
            chance_percent: u32::from(chance_percent.min(100)),
            default: Value::Null,
        }
    }

    /// Reseeds the RNG so subsequent output is reproducible.
    pub fn seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Returns the RNG for formatter bodies.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Returns the current instant in the generator's timezone.
    #[must_use]
    pub fn now(&self) -> DateTime<Tz> {
        self.clock.utc().with_timezone(&self.timezone)
    }

    /// Returns the timezone used by date formatters.
    #[must_use]
    pub const fn default_timezone(&self) -> Tz {
        self.timezone
    }

    /// Changes the timezone used by date formatters.
    pub fn set_default_timezone(&mut self, timezone: Tz) {
        self.timezone = timezone;
    }

    /// Changes the timezone using an IANA name such as `Europe/Bucharest`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidTimezone`] for unknown names; the
    /// current timezone is left unchanged.
    pub fn set_default_timezone_named(&mut self, name: &str) -> Result<(), GeneratorError> {
        let timezone = name
            .parse::<Tz>()
            .map_err(|_| GeneratorError::InvalidTimezone {
                name: name.to_owned(),
            })?;
        self.timezone = timezone;
        Ok(())
    }

    /// Restores the timezone the generator was built with (UTC unless
    /// configured otherwise).
    pub fn reset_default_timezone(&mut self) {
        self.timezone = self.initial_timezone;
    }

    /// Returns the locale tag, for example `en_US`.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Changes the locale tag.
    ///
    /// Providers already registered are kept; use [`crate::factory`] to build
    /// a generator with a locale's provider stack.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("registry", &self.registry)
            .field("timezone", &self.timezone)
            .field("locale", &self.locale)
            .field("max_unique_attempts", &self.max_unique_attempts)
            .finish_non_exhaustive()
    }
}

/// Modifier returned by [`Generator::unique`].
///
/// Values are compared by their string form and remembered per formatter
/// name for the lifetime of the generator.
#[derive(Debug)]
pub struct Unique<'g> {
    generator: &'g mut Generator,
}

impl Unique<'_> {
    /// Runs the formatter `name` without arguments until it yields an unseen
    /// value.
    ///
    /// # Errors
    ///
    /// As for [`Self::format`].
    pub fn get(&mut self, name: &str) -> Result<Value, GeneratorError> {
        self.format(name, &[])
    }

    /// Runs the formatter `name` until it yields an unseen value.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::NoUniqueValue`] once the attempt limit is
    /// reached, or the first error raised by the formatter.
    pub fn format(&mut self, name: &str, args: &[Value]) -> Result<Value, GeneratorError> {
        let attempts = self.generator.max_unique_attempts;
        for _ in 0..attempts {
            let value = self.generator.format(name, args)?;
            let seen = self
                .generator
                .unique_values
                .entry(name.to_owned())
                .or_default();
            if seen.insert(value.to_string()) {
                return Ok(value);
            }
        }
        debug!(formatter = name, attempts, "unique values exhausted");
        Err(GeneratorError::NoUniqueValue {
            formatter: name.to_owned(),
            attempts,
        })
    }
}

/// Modifier returned by [`Generator::optional`].
#[derive(Debug)]
pub struct Optional<'g> {
    generator: &'g mut Generator,
    chance_percent: u32,
    default: Value,
}

impl Optional<'_> {
    /// Returns `default` instead of [`Value::Null`] when the value is skipped.
    #[must_use]
    pub fn or(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    /// Runs the formatter `name` without arguments, or skips it.
    ///
    /// # Errors
    ///
    /// As for [`Generator::format`].
    pub fn get(&mut self, name: &str) -> Result<Value, GeneratorError> {
        self.format(name, &[])
    }

    /// Runs the formatter `name`, or skips it. A skipped formatter is never
    /// resolved, so unknown names only fail when the formatter would run.
    ///
    /// # Errors
    ///
    /// As for [`Generator::format`].
    pub fn format(&mut self, name: &str, args: &[Value]) -> Result<Value, GeneratorError> {
        if self.generator.rng.random_ratio(self.chance_percent, 100) {
            self.generator.format(name, args)
        } else {
            Ok(self.default.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use chrono::{Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::provider::{Formatter, FormatterTable};

    struct Counter {
        table: FormatterTable,
    }

    impl Counter {
        fn new() -> Self {
            let next = Arc::new(AtomicI64::new(0));
            Self {
                table: FormatterTable::new()
                    .with("counter", move |_, _| {
                        Ok(Value::Int(next.fetch_add(1, Ordering::Relaxed)))
                    })
                    .with("coin", |generator, _| {
                        Ok(Value::Bool(generator.rng().random_ratio(1, 2)))
                    })
                    .with("greeting", |generator, _| {
                        generator.parse("hello {{ counter }}").map(Value::from)
                    }),
            }
        }
    }

    impl Provider for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn try_resolve(&self, formatter: &str) -> Option<Formatter> {
            self.table.get(formatter)
        }
    }

    struct FixedClock;

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
                .single()
                .expect("valid fixture timestamp")
        }
    }

    #[fixture]
    fn generator() -> Generator {
        let mut generator = Generator::with_seed(99);
        generator.add_provider(Counter::new());
        generator
    }

    #[rstest]
    fn unknown_formatter_is_reported(mut generator: Generator) {
        assert_eq!(
            generator.get("unicorn"),
            Err(GeneratorError::UnknownFormatter {
                name: "unicorn".to_owned()
            })
        );
    }

    #[rstest]
    fn calls_are_not_cached(mut generator: Generator) {
        assert_eq!(generator.get("counter"), Ok(Value::Int(0)));
        assert_eq!(generator.get("counter"), Ok(Value::Int(1)));
    }

    #[rstest]
    fn formatters_can_call_other_formatters(mut generator: Generator) {
        assert_eq!(generator.get("greeting"), Ok(Value::from("hello 0")));
    }

    #[rstest]
    fn parse_copies_unterminated_tokens(mut generator: Generator) {
        assert_eq!(
            generator.parse("{{counter}}-{{counter").expect("parsed"),
            "0-{{counter"
        );
    }

    #[rstest]
    fn parse_fails_on_unknown_tokens(mut generator: Generator) {
        assert!(matches!(
            generator.parse("{{nope}}"),
            Err(GeneratorError::UnknownFormatter { .. })
        ));
    }

    #[rstest]
    fn unique_exhausts_small_domains(generator: Generator) {
        let mut generator = generator.with_max_unique_attempts(50);
        let first = generator.unique().get("coin").expect("first");
        let second = generator.unique().get("coin").expect("second");
        assert_ne!(first, second);

        let third = generator.unique().get("coin");
        assert_eq!(
            third,
            Err(GeneratorError::NoUniqueValue {
                formatter: "coin".to_owned(),
                attempts: 50
            })
        );
    }

    #[rstest]
    fn reset_unique_forgets_values(generator: Generator) {
        let mut generator = generator.with_max_unique_attempts(50);
        generator.unique().get("coin").expect("first");
        generator.unique().get("coin").expect("second");
        generator.reset_unique();
        assert!(generator.unique().get("coin").is_ok());
    }

    #[rstest]
    fn optional_with_zero_chance_never_runs(mut generator: Generator) {
        for _ in 0..20 {
            assert_eq!(generator.optional(0).get("counter"), Ok(Value::Null));
        }
        assert_eq!(generator.get("counter"), Ok(Value::Int(0)));
    }

    #[rstest]
    fn optional_with_full_chance_always_runs(mut generator: Generator) {
        assert_eq!(generator.optional(100).get("counter"), Ok(Value::Int(0)));
    }

    #[rstest]
    fn optional_uses_supplied_default(mut generator: Generator) {
        assert_eq!(
            generator.optional(0).or("n/a").get("counter"),
            Ok(Value::from("n/a"))
        );
    }

    #[test]
    fn seeding_makes_output_reproducible() {
        let mut first = Generator::with_seed(1);
        first.add_provider(Counter::new());
        let mut second = Generator::new();
        second.add_provider(Counter::new());
        second.seed(1);

        let left: Vec<Value> = (0..16).map(|_| first.get("coin").expect("coin")).collect();
        let right: Vec<Value> = (0..16).map(|_| second.get("coin").expect("coin")).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn timezone_can_be_set_and_reset() {
        let mut generator = Generator::with_seed(0).with_timezone(chrono_tz::Europe::London);
        generator
            .set_default_timezone_named("Europe/Bucharest")
            .expect("known zone");
        assert_eq!(generator.default_timezone(), chrono_tz::Europe::Bucharest);

        generator.reset_default_timezone();
        assert_eq!(generator.default_timezone(), chrono_tz::Europe::London);
    }

    #[test]
    fn unknown_timezone_leaves_setting_untouched() {
        let mut generator = Generator::with_seed(0);
        let err = generator
            .set_default_timezone_named("Mars/Olympus_Mons")
            .expect_err("unknown zone");
        assert!(matches!(err, GeneratorError::InvalidTimezone { .. }));
        assert_eq!(generator.default_timezone(), Tz::UTC);
    }

    #[test]
    fn now_uses_clock_and_timezone() {
        let generator = Generator::with_seed(0)
            .with_clock(Arc::new(FixedClock))
            .with_timezone(chrono_tz::Europe::Bucharest);
        assert_eq!(
            generator.now().format("%Y-%m-%d %H:%M").to_string(),
            "2024-01-15 14:00"
        );
    }

    #[test]
    fn locale_defaults_to_en_us() {
        let mut generator = Generator::with_seed(0);
        assert_eq!(generator.locale(), DEFAULT_LOCALE);
        generator.set_locale("ro_RO");
        assert_eq!(generator.locale(), "ro_RO");
    }
}

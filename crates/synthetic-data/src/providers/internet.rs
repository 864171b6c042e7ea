//! User names, domains and e-mail addresses.
//!
//! Every address is assembled from other formatters through the generator:
//! `email` asks for `user_name` and `free_email_domain`, and `user_name` asks
//! for `first_name` and `last_name`. A locale provider overriding any of
//! those changes the addresses as well.

use fake::Fake;
use fake::faker::internet::raw::{DomainSuffix, FreeEmailProvider};
use fake::locales::EN;
use rand::seq::IndexedRandom;

use crate::error::GeneratorError;
use crate::generator::Generator;
use crate::provider::{Formatter, FormatterTable, Provider};
use crate::providers::base::{bothify, numerify};
use crate::value::Value;

const USER_NAME_FORMATS: [&str; 4] = [
    "{{last_name}}.{{first_name}}",
    "{{first_name}}.{{last_name}}",
    "{{first_name}}##",
    "?{{last_name}}",
];

const SAFE_EMAIL_DOMAINS: [&str; 3] = ["example.com", "example.org", "example.net"];

/// Reduces `raw` to lowercase ASCII letters, digits, dots and underscores,
/// without leading, trailing or repeated dots.
fn to_local_part(raw: &str) -> String {
    let filtered: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '_')
        .collect();
    filtered
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

fn to_domain_word(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

fn user_name(generator: &mut Generator) -> Result<String, GeneratorError> {
    let format = USER_NAME_FORMATS
        .choose(generator.rng())
        .copied()
        .unwrap_or("{{first_name}}##");
    let parsed = generator.parse(format)?;
    let expanded = bothify(generator.rng(), &parsed);
    let local = to_local_part(&expanded);
    if local.is_empty() {
        return Ok(numerify(generator.rng(), "user####"));
    }
    Ok(local)
}

fn domain_word(generator: &mut Generator) -> Result<String, GeneratorError> {
    let word = to_domain_word(&generator.format_string("last_name", &[])?);
    if word.is_empty() {
        return Ok("example".to_owned());
    }
    Ok(word)
}

/// Provider exposing `user_name`, `domain_word`, `domain_suffix`,
/// `domain_name`, `free_email_domain`, `email` and `safe_email`.
///
/// Requires a provider for `first_name` and `last_name`, such as
/// [`crate::providers::Person`].
#[derive(Debug, Clone)]
pub struct Internet {
    table: FormatterTable,
}

impl Internet {
    /// Builds the provider.
    #[must_use]
    pub fn new() -> Self {
        let table = FormatterTable::new()
            .with("user_name", |generator, _| user_name(generator).map(Value::from))
            .with("domain_word", |generator, _| domain_word(generator).map(Value::from))
            .with("domain_suffix", |generator, _| {
                let suffix: String = DomainSuffix(EN).fake_with_rng(generator.rng());
                Ok(Value::from(suffix))
            })
            .with("domain_name", |generator, _| {
                generator
                    .parse("{{domain_word}}.{{domain_suffix}}")
                    .map(Value::from)
            })
            .with("free_email_domain", |generator, _| {
                let domain: String = FreeEmailProvider(EN).fake_with_rng(generator.rng());
                Ok(Value::from(domain))
            })
            .with("email", |generator, _| {
                generator
                    .parse("{{user_name}}@{{free_email_domain}}")
                    .map(Value::from)
            })
            .with("safe_email", |generator, _| {
                let local = generator.format_string("user_name", &[])?;
                let domain = SAFE_EMAIL_DOMAINS
                    .choose(generator.rng())
                    .copied()
                    .unwrap_or("example.com");
                Ok(Value::from(format!("{local}@{domain}")))
            });
        Self { table }
    }
}

impl Default for Internet {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for Internet {
    fn name(&self) -> &str {
        "internet"
    }

    fn try_resolve(&self, formatter: &str) -> Option<Formatter> {
        self.table.get(formatter)
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::providers::Person;

    /// Loose structural check: one `@`, a non-empty local part without
    /// stray dots, and a dotted domain.
    fn looks_like_email(value: &str) -> bool {
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        !local.is_empty()
            && !local.starts_with('.')
            && !local.ends_with('.')
            && !local.contains("..")
            && local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
            && domain.contains('.')
            && !domain.contains('@')
    }

    #[fixture]
    fn generator() -> Generator {
        let mut generator = Generator::with_seed(23);
        generator.add_provider(Person::new());
        generator.add_provider(Internet::new());
        generator
    }

    #[rstest]
    fn emails_are_well_formed(mut generator: Generator) {
        for _ in 0..100 {
            let email = generator.format_string("email", &[]).expect("email");
            assert!(looks_like_email(&email), "{email}");
        }
    }

    #[rstest]
    fn safe_emails_use_example_domains(mut generator: Generator) {
        for _ in 0..20 {
            let email = generator.format_string("safe_email", &[]).expect("email");
            assert!(looks_like_email(&email), "{email}");
            assert!(
                SAFE_EMAIL_DOMAINS
                    .iter()
                    .any(|domain| email.ends_with(domain)),
                "{email}"
            );
        }
    }

    #[rstest]
    fn domain_names_have_a_suffix(mut generator: Generator) {
        let domain = generator.format_string("domain_name", &[]).expect("domain");
        assert!(domain.contains('.'), "{domain}");
    }

    #[test]
    fn email_requires_name_formatters() {
        let mut generator = Generator::with_seed(1);
        generator.add_provider(Internet::new());
        assert!(matches!(
            generator.get("email"),
            Err(GeneratorError::UnknownFormatter { .. })
        ));
    }

    #[rstest]
    #[case("O'Brien.Ada", "obrien.ada")]
    #[case(".Zoë..Smith.", "zo.smith")]
    #[case("anna_42", "anna_42")]
    #[case("''", "")]
    fn local_parts_are_sanitised(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(to_local_part(raw), expected);
    }
}

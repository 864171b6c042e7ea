//! Personal names backed by the `fake` crate's English data.

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;

use crate::error::GeneratorError;
use crate::gender::Gender;
use crate::provider::{Formatter, FormatterTable, Provider};
use crate::value::{Args, Value};

const MALE_TITLES: [&str; 3] = ["Mr.", "Dr.", "Prof."];
const FEMALE_TITLES: [&str; 5] = ["Mrs.", "Ms.", "Miss", "Dr.", "Prof."];

/// Provider exposing `first_name`, `last_name`, `name` and `title`.
///
/// `name` is assembled from `first_name` and `last_name` through the
/// generator, so a later provider overriding either part changes full names
/// too. `title` takes an optional `male`/`female` argument.
#[derive(Debug, Clone)]
pub struct Person {
    table: FormatterTable,
}

impl Person {
    /// Builds the provider.
    #[must_use]
    pub fn new() -> Self {
        let table = FormatterTable::new()
            .with("first_name", |generator, _| {
                let first: String = FirstName(EN).fake_with_rng(generator.rng());
                Ok(Value::from(first))
            })
            .with("last_name", |generator, _| {
                let last: String = LastName(EN).fake_with_rng(generator.rng());
                Ok(Value::from(last))
            })
            .with("name", |generator, _| {
                generator
                    .parse("{{first_name}} {{last_name}}")
                    .map(Value::from)
            })
            .with("title", |generator, args| {
                let gender =
                    gender_argument(args)?.unwrap_or_else(|| Gender::random(generator.rng()));
                let titles: &[&str] = match gender {
                    Gender::Male => &MALE_TITLES,
                    Gender::Female => &FEMALE_TITLES,
                };
                Ok(Value::from(titles.choose(generator.rng()).copied()))
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
        "person"
    }

    fn try_resolve(&self, formatter: &str) -> Option<Formatter> {
        self.table.get(formatter)
    }
}

/// Reads an optional gender from the first argument.
fn gender_argument(args: Args<'_>) -> Result<Option<Gender>, GeneratorError> {
    args.text(0)?
        .filter(|value| !value.is_empty())
        .map(|value| {
            value.parse().map_err(|_| GeneratorError::InvalidArgument {
                formatter: args.formatter(),
                message: format!("gender must be 'male' or 'female', '{value}' received"),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::Generator;

    #[fixture]
    fn generator() -> Generator {
        let mut generator = Generator::with_seed(17);
        generator.add_provider(Person::new());
        generator
    }

    #[rstest]
    #[case("first_name")]
    #[case("last_name")]
    fn name_parts_are_not_empty(mut generator: Generator, #[case] formatter: &str) {
        for _ in 0..20 {
            let value = generator.format_string(formatter, &[]).expect("name part");
            assert!(!value.trim().is_empty());
        }
    }

    #[rstest]
    fn full_name_has_two_parts(mut generator: Generator) {
        let name = generator.format_string("name", &[]).expect("name");
        assert!(name.split(' ').count() >= 2, "{name}");
    }

    #[rstest]
    #[case("male", &MALE_TITLES[..])]
    #[case("female", &FEMALE_TITLES[..])]
    fn titles_follow_gender(
        mut generator: Generator,
        #[case] gender: &str,
        #[case] allowed: &[&str],
    ) {
        for _ in 0..20 {
            let title = generator
                .format_string("title", &[Value::from(gender)])
                .expect("title");
            assert!(allowed.contains(&title.as_str()), "{title}");
        }
    }

    #[rstest]
    fn title_rejects_unknown_gender(mut generator: Generator) {
        let result = generator.format("title", &[Value::from("elf")]);
        assert!(matches!(
            result,
            Err(GeneratorError::InvalidArgument {
                formatter: "title",
                ..
            })
        ));
    }
}

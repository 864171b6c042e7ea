//! Ordered provider storage and formatter resolution.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::{Formatter, Provider};

/// A provider together with its insertion ordinal.
#[derive(Clone)]
pub struct ProviderEntry {
    ordinal: usize,
    provider: Arc<dyn Provider>,
}

impl ProviderEntry {
    /// Position at which the provider was added, starting at zero.
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Returns the provider.
    #[must_use]
    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }
}

impl fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEntry")
            .field("ordinal", &self.ordinal)
            .field("provider", &self.provider.name())
            .finish()
    }
}

/// Providers in insertion order.
///
/// Resolution walks the entries newest first and stops at the first
/// provider exposing the requested name, so a later provider shadows an
/// earlier one. Results from different providers are never merged.
///
/// # Example
///
/// ```
/// use synthetic_data::provider::{FormatterTable, Provider, ProviderRegistry, Formatter};
/// use synthetic_data::Value;
///
/// struct Fixed(&'static str, FormatterTable);
///
/// impl Provider for Fixed {
///     fn name(&self) -> &str {
///         self.0
///     }
///     fn try_resolve(&self, formatter: &str) -> Option<Formatter> {
///         self.1.get(formatter)
///     }
/// }
///
/// let mut registry = ProviderRegistry::new();
/// registry.add_provider(Fixed("base", FormatterTable::new().with("name", |_, _| Ok(Value::from("a")))));
/// registry.add_provider(Fixed("locale", FormatterTable::new().with("name", |_, _| Ok(Value::from("b")))));
///
/// let (_, origin) = registry.resolve_with_origin("name").expect("resolved");
/// assert_eq!(origin, "locale");
/// ```
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    entries: Vec<ProviderEntry>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider; it takes priority over every provider added
    /// before it.
    pub fn add_provider<P: Provider + 'static>(&mut self, provider: P) {
        self.add_shared(Arc::new(provider));
    }

    /// Appends a provider that may also be registered elsewhere.
    pub fn add_shared(&mut self, provider: Arc<dyn Provider>) {
        let ordinal = self.entries.len();
        self.entries.push(ProviderEntry { ordinal, provider });
    }

    /// Resolves `name` to the formatter of the newest provider exposing it.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Formatter> {
        self.resolve_with_origin(name).map(|(formatter, _)| formatter)
    }

    /// Resolves `name`, also returning the name of the provider that
    /// supplied the formatter.
    #[must_use]
    pub fn resolve_with_origin(&self, name: &str) -> Option<(Formatter, &str)> {
        let resolved = self.entries.iter().rev().find_map(|entry| {
            entry
                .provider
                .try_resolve(name)
                .map(|formatter| (formatter, entry.provider.name()))
        });
        let origin = resolved.as_ref().map(|(_, origin)| *origin);
        trace!(
            formatter = name,
            provider = origin,
            found = origin.is_some(),
            "formatter lookup"
        );
        resolved
    }

    /// Iterates over the entries in insertion order.
    pub fn providers(&self) -> impl DoubleEndedIterator<Item = &ProviderEntry> {
        self.entries.iter()
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no provider has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::Generator;
    use crate::provider::FormatterTable;
    use crate::value::Value;

    struct Named {
        name: &'static str,
        table: FormatterTable,
    }

    impl Named {
        fn returning(name: &'static str, formatter: &'static str, text: &'static str) -> Self {
            Self {
                name,
                table: FormatterTable::new().with(formatter, move |_, _| Ok(Value::from(text))),
            }
        }
    }

    impl Provider for Named {
        fn name(&self) -> &str {
            self.name
        }

        fn try_resolve(&self, formatter: &str) -> Option<Formatter> {
            self.table.get(formatter)
        }
    }

    #[fixture]
    fn registry() -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        registry.add_provider(Named::returning("a", "name", "from a"));
        registry.add_provider(Named::returning("b", "name", "from b"));
        registry.add_provider(Named::returning("c", "city", "from c"));
        registry
    }

    fn run(registry: &ProviderRegistry, name: &str) -> Option<Value> {
        let mut generator = Generator::with_seed(0);
        registry
            .resolve(name)
            .map(|formatter| formatter.invoke(&mut generator, &[]).expect("formatter runs"))
    }

    #[rstest]
    fn later_provider_wins(registry: ProviderRegistry) {
        assert_eq!(run(&registry, "name"), Some(Value::from("from b")));
    }

    #[rstest]
    fn falls_back_to_earlier_provider(registry: ProviderRegistry) {
        let (_, origin) = registry.resolve_with_origin("name").expect("resolved");
        assert_eq!(origin, "b");
        assert_eq!(run(&registry, "city"), Some(Value::from("from c")));
    }

    #[rstest]
    fn unknown_names_do_not_resolve(registry: ProviderRegistry) {
        assert!(registry.resolve("unicorn").is_none());
    }

    #[rstest]
    fn ordinals_follow_insertion_order(registry: ProviderRegistry) {
        let ordinals: Vec<(usize, String)> = registry
            .providers()
            .map(|entry| (entry.ordinal(), entry.provider().name().to_owned()))
            .collect();
        assert_eq!(
            ordinals,
            vec![
                (0, "a".to_owned()),
                (1, "b".to_owned()),
                (2, "c".to_owned())
            ]
        );
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = ProviderRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.resolve("name").is_none());
    }

    #[test]
    fn shared_providers_can_be_registered_twice() {
        let shared: Arc<dyn Provider> = Arc::new(Named::returning("shared", "name", "shared"));
        let mut registry = ProviderRegistry::new();
        registry.add_shared(Arc::clone(&shared));
        registry.add_provider(Named::returning("middle", "name", "middle"));
        registry.add_shared(shared);

        assert_eq!(run(&registry, "name"), Some(Value::from("shared")));
        assert_eq!(registry.len(), 3);
    }
}

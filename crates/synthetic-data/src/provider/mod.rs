//! Provider plug-in interface.
//!
//! A provider is a named collection of [`Formatter`]s. Providers are
//! registered into a [`crate::Generator`], which resolves formatter names
//! through its [`ProviderRegistry`]: the most recently added provider that
//! knows a name wins.

mod registry;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub use registry::{ProviderEntry, ProviderRegistry};

use crate::error::GeneratorError;
use crate::generator::Generator;
use crate::value::{Args, Value};

/// Signature shared by every formatter body.
///
/// Formatters receive the generator so they can draw random numbers and
/// call other formatters.
pub type FormatterFn =
    dyn Fn(&mut Generator, Args<'_>) -> Result<Value, GeneratorError> + Send + Sync;

/// A named generation routine exposed by a provider.
///
/// Cloning is cheap; the body is shared.
#[derive(Clone)]
pub struct Formatter {
    name: &'static str,
    body: Arc<FormatterFn>,
}

impl Formatter {
    /// Wraps `body` as the formatter called `name`.
    pub fn new<F>(name: &'static str, body: F) -> Self
    where
        F: Fn(&mut Generator, Args<'_>) -> Result<Value, GeneratorError> + Send + Sync + 'static,
    {
        Self {
            name,
            body: Arc::new(body),
        }
    }

    /// Returns the formatter name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the formatter with positional `args`.
    ///
    /// # Errors
    ///
    /// Propagates whatever the formatter body returns.
    pub fn invoke(&self, generator: &mut Generator, args: &[Value]) -> Result<Value, GeneratorError> {
        (self.body)(generator, Args::new(self.name, args))
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A lookup table from formatter name to [`Formatter`], filled when a
/// provider is constructed.
///
/// # Example
///
/// ```
/// use synthetic_data::provider::FormatterTable;
/// use synthetic_data::Value;
///
/// let table = FormatterTable::new().with("answer", |_, _| Ok(Value::Int(42)));
/// assert!(table.get("answer").is_some());
/// assert!(table.get("question").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormatterTable {
    formatters: BTreeMap<&'static str, Formatter>,
}

impl FormatterTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a formatter, replacing any previous one with the same name.
    #[must_use]
    pub fn with<F>(mut self, name: &'static str, body: F) -> Self
    where
        F: Fn(&mut Generator, Args<'_>) -> Result<Value, GeneratorError> + Send + Sync + 'static,
    {
        self.formatters.insert(name, Formatter::new(name, body));
        self
    }

    /// Looks up a formatter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Formatter> {
        self.formatters.get(name).cloned()
    }

    /// Iterates over the formatter names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.formatters.keys().copied()
    }
}

/// A collection of formatters that can be registered into a generator.
///
/// Implementations only need to answer whether they expose a formatter with
/// a given name. Built-in providers keep a [`FormatterTable`]; ad-hoc
/// providers may match names directly.
///
/// # Example
///
/// ```
/// use synthetic_data::provider::{Formatter, Provider};
/// use synthetic_data::{Generator, Value};
///
/// struct Constant;
///
/// impl Provider for Constant {
///     fn name(&self) -> &str {
///         "constant"
///     }
///
///     fn try_resolve(&self, formatter: &str) -> Option<Formatter> {
///         (formatter == "answer").then(|| Formatter::new("answer", |_, _| Ok(Value::Int(42))))
///     }
/// }
///
/// let mut generator = Generator::with_seed(1);
/// generator.add_provider(Constant);
/// assert_eq!(generator.get("answer"), Ok(Value::Int(42)));
/// ```
pub trait Provider: Send + Sync {
    /// Returns a short name used in diagnostics.
    fn name(&self) -> &str;

    /// Returns the formatter called `formatter`, if this provider has one.
    fn try_resolve(&self, formatter: &str) -> Option<Formatter>;
}

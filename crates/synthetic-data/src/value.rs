//! Values passed to and returned from formatters.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::GeneratorError;

/// A formatter argument or result.
///
/// [`fmt::Display`] performs the value-to-string coercion used by
/// [`crate::Generator::format_string`] and template parsing; [`Value::Null`]
/// renders as an empty string. Values serialize untagged, so `Null` becomes
/// `null` and a date-time its RFC 3339 form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// No value, produced by the optional modifier.
    Null,
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// Free text.
    Text(String),
    /// A calendar date.
    Date(NaiveDate),
    /// An instant in a named timezone.
    DateTime(DateTime<Tz>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text content, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns the integer content, if any.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean content, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::DateTime(instant) => write!(f, "{}", instant.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<char> for Value {
    fn from(character: char) -> Self {
        Self::Text(character.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<DateTime<Tz>> for Value {
    fn from(instant: DateTime<Tz>) -> Self {
        Self::DateTime(instant)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Positional formatter arguments with typed accessors.
///
/// Missing positions and [`Value::Null`] both read as absent; a value of
/// the wrong type is an [`GeneratorError::InvalidArgument`].
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    formatter: &'static str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    /// Wraps the raw arguments passed to `formatter`.
    #[must_use]
    pub const fn new(formatter: &'static str, values: &'a [Value]) -> Self {
        Self { formatter, values }
    }

    /// Returns the formatter name these arguments belong to.
    #[must_use]
    pub const fn formatter(&self) -> &'static str {
        self.formatter
    }

    /// Returns the raw argument at `index`, treating [`Value::Null`] as
    /// absent.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index).filter(|value| !value.is_null())
    }

    /// Builds an invalid-argument error attributed to this formatter.
    #[must_use]
    pub fn invalid(&self, message: impl Into<String>) -> GeneratorError {
        GeneratorError::InvalidArgument {
            formatter: self.formatter,
            message: message.into(),
        }
    }

    fn mismatch(&self, index: usize, expected: &str, found: &Value) -> GeneratorError {
        self.invalid(format!("argument {index} must be {expected}, found {found:?}"))
    }

    /// Reads an optional text argument.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidArgument`] if the argument is not text.
    pub fn text(&self, index: usize) -> Result<Option<&'a str>, GeneratorError> {
        match self.value(index) {
            None => Ok(None),
            Some(Value::Text(text)) => Ok(Some(text.as_str())),
            Some(other) => Err(self.mismatch(index, "text", other)),
        }
    }

    /// Reads an optional integer argument. Digit-only text is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidArgument`] for any other type.
    pub fn int(&self, index: usize) -> Result<Option<i64>, GeneratorError> {
        match self.value(index) {
            None => Ok(None),
            Some(Value::Int(value)) => Ok(Some(*value)),
            Some(Value::Text(text)) => text
                .parse()
                .map(Some)
                .map_err(|_| self.mismatch(index, "an integer", &Value::Text(text.clone()))),
            Some(other) => Err(self.mismatch(index, "an integer", other)),
        }
    }

    /// Reads an optional boolean argument.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidArgument`] if the argument is not a
    /// boolean.
    pub fn bool(&self, index: usize) -> Result<Option<bool>, GeneratorError> {
        match self.value(index) {
            None => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(*value)),
            Some(other) => Err(self.mismatch(index, "a boolean", other)),
        }
    }

    /// Reads an optional date argument. Text and date-times are converted.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidArgument`] for any other type. Text
    /// is returned as-is for the caller to parse.
    pub fn date_text(&self, index: usize) -> Result<Option<String>, GeneratorError> {
        match self.value(index) {
            None => Ok(None),
            Some(Value::Text(text)) => Ok(Some(text.clone())),
            Some(Value::Int(year)) => Ok(Some(year.to_string())),
            Some(value @ Value::Date(_)) => Ok(Some(value.to_string())),
            Some(Value::DateTime(instant)) => {
                Ok(Some(instant.date_naive().format("%Y-%m-%d").to_string()))
            }
            Some(other) => Err(self.mismatch(index, "a date", other)),
        }
    }
}

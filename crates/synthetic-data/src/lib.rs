//! Provider-based fake data generation with checksum-valid identifiers.
//!
//! A [`Generator`] resolves formatter names such as `email`, `ean13` or
//! `cnp` against the providers registered with it and returns a plausible
//! synthetic [`Value`]. Providers registered later shadow formatters of
//! providers registered earlier, which is how locale providers override the
//! defaults.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - EAN-8, EAN-13 and ISBN-10 check digit calculation and validation
//! - Romanian personal numeric code (CNP) generation and validation
//! - Unique and optional modifiers over any formatter
//! - Per-generator timezone, locale and seed
//! - Generators configured through `SYNTHETIC_DATA_*` settings
//!
//! # Example
//!
//! ```
//! use synthetic_data::{Value, factory};
//! use synthetic_data::calculator::ean;
//! use synthetic_data::national_id::ro;
//!
//! let mut generator = factory::create_for_locale("ro_RO");
//! generator.seed(42);
//!
//! let barcode = generator.format_string("ean13", &[]).expect("ean13");
//! assert!(ean::is_valid(&barcode));
//!
//! let cnp = generator
//!     .format_string("cnp", &[Value::from("male"), Value::from("1981-06-16")])
//!     .expect("cnp");
//! assert!(cnp.starts_with("1810616"));
//! assert!(ro::is_valid_cnp(&cnp));
//!
//! let email = generator.unique().get("email").expect("email");
//! assert!(email.to_string().contains('@'));
//! ```

pub mod calculator;
pub mod config;
mod digits;
mod error;
pub mod factory;
mod gender;
mod generator;
pub mod national_id;
pub mod provider;
pub mod providers;
mod value;

pub use config::GeneratorSettings;
pub use digits::DigitString;
pub use error::{ChecksumError, GeneratorError, NationalIdError};
pub use gender::Gender;
pub use generator::{
    DEFAULT_LOCALE, DEFAULT_MAX_UNIQUE_ATTEMPTS, Generator, Optional, Unique,
};
pub use provider::{Formatter, FormatterTable, Provider, ProviderRegistry};
pub use value::{Args, Value};

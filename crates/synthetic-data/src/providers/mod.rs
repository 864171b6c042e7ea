//! Built-in providers.
//!
//! [`crate::factory`] registers these in a fixed order: [`Base`],
//! [`Person`], [`Internet`], [`DateTimeProvider`] and [`Barcode`], followed
//! by the providers of the requested locale, such as [`ro_ro::Person`].

pub mod barcode;
pub mod base;
pub mod date_time;
pub mod internet;
pub mod person;
pub mod ro_ro;

pub use barcode::Barcode;
pub use base::Base;
pub use date_time::DateTimeProvider;
pub use internet::Internet;
pub use person::Person;

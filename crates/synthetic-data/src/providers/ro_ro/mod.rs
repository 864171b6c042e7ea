//! Providers for the `ro_RO` locale.
//!
//! These are layered on top of the default stack, so they only need to
//! supply what differs for Romania.

mod person;

pub use person::Person;

//! Checksum calculators for barcode-style identifiers.
//!
//! Every calculator exposes a `checksum` function computing the trailing
//! check character for a partial code and an `is_valid` predicate for a
//! complete one. Inputs are parsed as [`crate::DigitString`]s first, so
//! non-digit characters are rejected rather than coerced.

pub mod ean;
pub mod isbn;

//! Country-specific personal identifiers.
//!
//! Each submodule generates identifiers that satisfy the structural rules
//! and checksum of one national scheme, and validates candidate strings
//! against the same rules.

pub mod ro;

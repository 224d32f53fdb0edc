//! Test Utilities Crate
//!
//! Shared test infrastructure for the claim intake test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built drafts, assessments and photos
//! - `builders`: Draft builder and a wired-up intake harness
//! - `assertions`: Assertion helpers for claim records
//! - `generators`: Property-based and fake data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;

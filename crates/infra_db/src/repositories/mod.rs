//! Repository implementations for domain entities
//!
//! Each repository implements a domain port on top of a concrete storage
//! medium and maps storage failures to port errors.

pub mod claims;

pub use claims::JsonFileClaimStore;

//! Core Kernel - Foundational types for the claim intake system
//!
//! This crate provides the building blocks shared by every other crate:
//! - Claim numbers and session identifiers
//! - The kernel error type
//! - Port infrastructure (errors, health checks) for swappable adapters

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::{ClaimNumber, IntakeSessionId, CLAIM_NUMBER_LEN};
pub use error::CoreError;
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};

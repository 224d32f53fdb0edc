//! Infrastructure Storage Layer
//!
//! This crate provides the persistent record store for submitted claims.
//! Every claim lives in one JSON array kept in a single file under the
//! configured data directory.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: [`JsonFileClaimStore`]
//! implements the domain's `ClaimStore` port, so the intake flow never sees
//! file paths or serialisation details.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{JsonFileClaimStore, StorageConfig};
//!
//! let store = JsonFileClaimStore::new(StorageConfig::new("./data"));
//! let claims = store.list_all().await?;
//! ```

pub mod config;
pub mod error;
pub mod repositories;

pub use config::{StorageConfig, CLAIMS_FILE_NAME};
pub use error::StorageError;
pub use repositories::JsonFileClaimStore;

//! External Adapters for the Claims Domain
//!
//! - **HttpDamageAssessor**: damage detection service over HTTP
//! - **MockDamageAssessor**: canned answers for tests (in [`crate::ports::mock`])
//!
//! ```rust,ignore
//! use domain_claims::adapters::{DamageDetectionConfig, HttpDamageAssessor};
//!
//! let assessor = HttpDamageAssessor::new(DamageDetectionConfig {
//!     base_url: "https://detect.example.com".to_string(),
//!     ..Default::default()
//! })?;
//! let port: Arc<dyn DamageAssessor> = Arc::new(assessor);
//! ```

pub mod damage_detection;

pub use damage_detection::{DamageDetectionConfig, HttpDamageAssessor};

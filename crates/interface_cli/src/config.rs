//! Intake configuration

use serde::Deserialize;
use std::path::PathBuf;

use domain_claims::{DamageDetectionConfig, SubmissionOptions};
use infra_db::StorageConfig;

/// Environment variable prefix for every setting
pub const ENV_PREFIX: &str = "CLAIMS";

/// Legacy variable naming the damage detection service
pub const LEGACY_DAMAGE_API_URL_VAR: &str = "NEXT_PUBLIC_DAMAGE_DETECTION_API_URL";

/// Intake configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Directory holding the claims file
    pub data_dir: PathBuf,
    /// Base URL of the damage detection service
    pub damage_api_url: Option<String>,
    /// Damage detection request timeout in seconds
    pub damage_api_timeout_secs: u64,
    /// Re-draw claim numbers that are already taken
    pub ensure_unique_id: bool,
    /// Log level
    pub log_level: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            damage_api_url: None,
            damage_api_timeout_secs: 30,
            ensure_unique_id: false,
            log_level: "info".to_string(),
        }
    }
}

impl IntakeConfig {
    /// Loads configuration from `CLAIMS_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(None, std::env::var(LEGACY_DAMAGE_API_URL_VAR).ok())
    }

    /// Loads configuration from an explicit variable map instead of the process environment
    pub fn from_vars(
        vars: config::Map<String, String>,
        legacy_damage_api_url: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        Self::load(Some(vars), legacy_damage_api_url)
    }

    fn load(
        vars: Option<config::Map<String, String>>,
        legacy_damage_api_url: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let mut loaded: Self = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?
            .try_deserialize()?;

        if loaded.damage_api_url.as_deref().map_or(true, |url| url.trim().is_empty()) {
            loaded.damage_api_url = legacy_damage_api_url.filter(|url| !url.trim().is_empty());
        }
        Ok(loaded)
    }

    pub fn storage(&self) -> StorageConfig {
        StorageConfig::new(self.data_dir.clone())
    }

    pub fn damage_detection(&self) -> DamageDetectionConfig {
        DamageDetectionConfig {
            base_url: self.damage_api_url.clone().unwrap_or_default(),
            timeout_secs: self.damage_api_timeout_secs,
        }
    }

    pub fn submission_options(&self) -> SubmissionOptions {
        SubmissionOptions {
            ensure_unique_id: self.ensure_unique_id,
            ..SubmissionOptions::default()
        }
    }
}

//! Service configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ASSETQ_UNIVERSE_PATH` | unset | Universe snapshot file to load |
//! | `ASSETQ_SCHEMA_VERSION` | `v1.0.0` | Version stamped into envelopes |
//! | `ASSETQ_ALLOW_NEGATIVE_MIN_GROWTH` | `true` | Accept `minGrowth < 0` |
//!
//! # Example
//!
//! ```rust
//! use assetq_core::ServiceConfigBuilder;
//!
//! let config = ServiceConfigBuilder::new()
//!     .with_schema_version("v1.2.0")?
//!     .allow_negative_min_growth(false)
//!     .build();
//! assert_eq!(config.schema_version.as_str(), "v1.2.0");
//! # Ok::<(), assetq_core::ValidationError>(())
//! ```

use std::env;
use std::path::PathBuf;

use crate::{CriteriaPolicy, SchemaVersion, ValidationError};

pub const ENV_UNIVERSE_PATH: &str = "ASSETQ_UNIVERSE_PATH";
pub const ENV_SCHEMA_VERSION: &str = "ASSETQ_SCHEMA_VERSION";
pub const ENV_ALLOW_NEGATIVE_MIN_GROWTH: &str = "ASSETQ_ALLOW_NEGATIVE_MIN_GROWTH";

/// Resolved configuration for a [`QueryService`](crate::QueryService).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    pub universe_path: Option<PathBuf>,
    pub schema_version: SchemaVersion,
    pub policy: CriteriaPolicy,
}

#[derive(Debug, Default)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `ASSETQ_*` environment variables on top of the current values.
    pub fn with_env(self) -> Result<Self, ValidationError> {
        self.with_vars(|key| env::var(key).ok())
    }

    /// Apply settings from an arbitrary key lookup, as [`with_env`](Self::with_env) does
    /// for the process environment.
    pub fn with_vars<F>(mut self, lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_UNIVERSE_PATH).filter(|value| !value.trim().is_empty()) {
            self.config.universe_path = Some(PathBuf::from(path));
        }
        if let Some(version) = lookup(ENV_SCHEMA_VERSION) {
            self.config.schema_version = SchemaVersion::parse(&version)?;
        }
        if let Some(flag) = lookup(ENV_ALLOW_NEGATIVE_MIN_GROWTH) {
            self.config.policy.allow_negative_min_growth =
                parse_flag(ENV_ALLOW_NEGATIVE_MIN_GROWTH, &flag)?;
        }
        Ok(self)
    }

    pub fn with_universe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.universe_path = Some(path.into());
        self
    }

    pub fn with_schema_version(mut self, version: &str) -> Result<Self, ValidationError> {
        self.config.schema_version = SchemaVersion::parse(version)?;
        Ok(self)
    }

    pub fn allow_negative_min_growth(mut self, allow: bool) -> Self {
        self.config.policy.allow_negative_min_growth = allow;
        self
    }

    pub fn build(self) -> ServiceConfig {
        self.config
    }
}

fn parse_flag(setting: &'static str, value: &str) -> Result<bool, ValidationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ValidationError::InvalidSetting {
            setting,
            value: value.to_owned(),
        }),
    }
}

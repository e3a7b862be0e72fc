//! Application configuration.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! `REGCLEAN_`-prefixed environment variables (`__` separates nesting, e.g.
//! `REGCLEAN_REGISTRY__PORT=5001`).

use crate::auth::Credentials;
use crate::error::{CleanError, Result};
use crate::policy::{KeepLast, OlderThanDate, RetentionPolicy};
use crate::registry::{DEFAULT_TIMEOUT_SECONDS, Registry};
use config::{Config as ConfigRs, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[cfg(test)]
mod tests;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "REGCLEAN";

/// Root configuration structure.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistrySettings,
    #[serde(default)]
    pub policy: PolicySettings,
}

impl Config {
    /// Parses a `Config` from a YAML string, without environment overrides.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let builder = ConfigRs::builder()
            .add_source(ConfigRs::try_from(&Config::default())?)
            .add_source(File::from_str(s, FileFormat::Yaml));

        Self::from_builder(builder, None)
    }

    /// Loads a `Config` from an optional file path plus the environment.
    ///
    /// A missing file is an error only when a path was given explicitly.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigRs::builder().add_source(ConfigRs::try_from(&Config::default())?);

        if let Some(p) = path {
            builder = builder.add_source(File::from(p).format(FileFormat::Yaml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::from_builder(builder, path)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: Option<&Path>,
    ) -> Result<Self> {
        builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| {
                CleanError::config_with_source(
                    "Failed to deserialize configuration".to_string(),
                    path.map(|p| p.display().to_string()),
                    e,
                )
            })
    }

    /// Builds the registry descriptor described by this configuration.
    pub fn to_registry(&self) -> Registry {
        let settings = &self.registry;
        Registry::new(settings.host.clone(), settings.port, settings.dry_run)
            .with_credentials(Credentials::from_parts(
                settings.username.as_deref(),
                settings.password.as_deref(),
            ))
            .with_timeout_seconds(settings.timeout)
    }

    /// Builds the configured retention policy.
    ///
    /// When several rules are configured `older_than_given_date` wins.
    pub fn to_policy(&self) -> Result<Box<dyn RetentionPolicy>> {
        if let Some(rule) = &self.policy.older_than_given_date {
            return Ok(Box::new(OlderThanDate::new(rule.date.clone())));
        }
        if let Some(rule) = &self.policy.keep_last {
            return Ok(Box::new(KeepLast::new(rule.count)));
        }
        Err(CleanError::config(
            "No retention policy configured (set policy.older_than_given_date or policy.keep_last)",
            None::<String>,
        ))
    }
}

/// Registry connection settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct RegistrySettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub dry_run: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: None,
            password: None,
            dry_run: false,
            timeout: default_timeout(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

/// Retention rules. Only one is applied per run.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Default, Clone)]
pub struct PolicySettings {
    #[serde(default)]
    pub older_than_given_date: Option<OlderThanGivenDateRule>,

    #[serde(default)]
    pub keep_last: Option<KeepLastRule>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct OlderThanGivenDateRule {
    /// Cutoff in `DD.MM.YYYY[ HH:MM[:SS]]`
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct KeepLastRule {
    pub count: usize,
}

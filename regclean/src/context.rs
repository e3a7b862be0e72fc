//! Application context that holds resolved configuration
//!
//! The context is built following the precedence order:
//! 1. Default values
//! 2. Config file values
//! 3. Environment variables
//! 4. CLI flags
//!
//! Once built, the context is passed as read-only throughout the application.

use crate::Cli;
use crate::config;
use crate::format::{ColorChoice, OutputFormat};
use libregclean::config::{Config, KeepLastRule, OlderThanGivenDateRule};
use libregclean::{Registry, Result, RetentionPolicy};

/// Log detail selected by the number of `-v` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Warnings and errors only
    Normal,
    /// Per-image and per-deletion progress
    Verbose,
    /// Everything, including HTTP client internals
    Debug,
}

impl VerbosityLevel {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Normal,
            1 => VerbosityLevel::Verbose,
            _ => VerbosityLevel::Debug,
        }
    }

    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub fn filter_directive(self) -> &'static str {
        match self {
            VerbosityLevel::Normal => "regclean=warn",
            VerbosityLevel::Verbose => "regclean=info",
            VerbosityLevel::Debug => "debug",
        }
    }
}

/// Application context with resolved configuration and runtime state
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Resolved configuration
    pub config: Config,
    pub verbosity: VerbosityLevel,
    pub color: ColorChoice,
    pub format: OutputFormat,
}

impl AppContext {
    /// Build context with precedence: defaults > config file > env vars > CLI flags
    pub fn build(cli: &Cli) -> Result<Self> {
        // 1-3. Defaults, then the config file, then REGCLEAN_* variables
        let config_path = config::resolve_config_path(cli.config.as_deref());
        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loading configuration file");
        }
        let mut config = Config::load(config_path.as_deref())?;

        // 4. CLI flags (REGCLEAN_USER and REGCLEAN_PASSWORD arrive through clap)
        apply_overrides(&mut config, cli);

        Ok(Self {
            config,
            verbosity: VerbosityLevel::from_count(cli.verbose),
            color: ColorChoice::from(cli.color.as_str()),
            format: OutputFormat::from(cli.format.as_str()),
        })
    }

    /// Validated registry descriptor for this run
    pub fn registry(&self) -> Result<Registry> {
        let registry = self.config.to_registry();
        registry.validate()?;
        Ok(registry)
    }

    /// Retention policy for this run
    pub fn policy(&self) -> Result<Box<dyn RetentionPolicy>> {
        self.config.to_policy()
    }
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    let registry = &mut config.registry;
    if let Some(host) = &cli.host {
        registry.host = host.clone();
    }
    if let Some(port) = cli.port {
        registry.port = port;
    }
    if let Some(user) = &cli.user {
        registry.username = Some(user.clone());
    }
    if let Some(password) = &cli.password {
        registry.password = Some(password.clone());
    }
    if let Some(timeout) = cli.timeout {
        registry.timeout = timeout;
    }
    if cli.dry_run {
        registry.dry_run = true;
    }

    // A rule given on the command line replaces every configured rule
    if let Some(date) = &cli.older_than {
        config.policy.older_than_given_date = Some(OlderThanGivenDateRule { date: date.clone() });
        config.policy.keep_last = None;
    } else if let Some(count) = cli.keep_last {
        config.policy.keep_last = Some(KeepLastRule { count });
        config.policy.older_than_given_date = None;
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

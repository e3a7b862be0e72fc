//! Registry connection descriptor.
//!
//! A [`Registry`] says where the registry lives and how to talk to it. It is
//! a plain value: clone it freely, and use [`Registry::with_basic_auth`] to
//! derive a copy carrying credentials.

use crate::auth::Credentials;
use crate::error::{CleanError, Result};
use url::Url;


/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Connection settings for a single registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    host: String,
    port: u16,
    credentials: Credentials,
    dry_run: bool,
    timeout_seconds: u64,
}

impl Registry {
    /// Creates a descriptor for an anonymous registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregclean::registry::Registry;
    ///
    /// let registry = Registry::new("localhost", 5000, false);
    /// assert_eq!(registry.base_url(), "http://localhost:5000");
    /// ```
    pub fn new(host: impl Into<String>, port: u16, dry_run: bool) -> Self {
        Self {
            host: host.into(),
            port,
            credentials: Credentials::Anonymous,
            dry_run,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Returns a copy of this descriptor that authenticates with HTTP Basic.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregclean::registry::Registry;
    ///
    /// let anonymous = Registry::new("localhost", 5000, true);
    /// let authed = anonymous.with_basic_auth("admin", "secret");
    ///
    /// assert!(anonymous.credentials().is_anonymous());
    /// assert_eq!(authed.credentials().username(), Some("admin"));
    /// assert!(authed.dry_run());
    /// ```
    pub fn with_basic_auth(&self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.with_credentials(Credentials::basic(username, password))
    }

    /// Returns a copy of this descriptor using `credentials`.
    pub fn with_credentials(&self, credentials: Credentials) -> Self {
        Self {
            credentials,
            ..self.clone()
        }
    }

    /// Returns a copy of this descriptor with a different default timeout.
    pub fn with_timeout_seconds(&self, seconds: u64) -> Self {
        Self {
            timeout_seconds: seconds,
            ..self.clone()
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// True when mutating calls must be simulated.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    /// Checks that the descriptor can produce a usable URL.
    ///
    /// The host may carry an `http` or `https` scheme but no port, path,
    /// query or user info: the port always comes from [`Registry::port`].
    pub fn validate(&self) -> Result<()> {
        self.parse_host()?;
        if self.port == 0 {
            return Err(CleanError::validation("Registry port cannot be 0"));
        }
        if self.timeout_seconds == 0 {
            return Err(CleanError::validation("Registry timeout cannot be 0"));
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    ///
    /// Plain HTTP is assumed unless the host already carries a scheme.
    pub fn base_url(&self) -> String {
        match self.parse_host() {
            Ok(url) => format!(
                "{}://{}:{}",
                url.scheme(),
                url.host_str().unwrap_or_default(),
                self.port
            ),
            Err(_) => format!("http://{}:{}", self.host.trim(), self.port),
        }
    }

    fn parse_host(&self) -> Result<Url> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(CleanError::validation("Registry host cannot be empty"));
        }

        let with_scheme = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };
        let url = Url::parse(&with_scheme).map_err(|e| {
            CleanError::validation(format!("Invalid registry host '{}': {}", host, e))
        })?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(CleanError::validation(format!(
                    "Invalid registry scheme '{}'. Only 'http' and 'https' are supported.",
                    scheme
                )));
            }
        }
        if url.host_str().is_none() {
            return Err(CleanError::validation(format!(
                "Invalid registry host '{}': missing host",
                host
            )));
        }
        if url.port().is_some() || has_explicit_port(&with_scheme) {
            return Err(CleanError::validation(format!(
                "Registry host '{}' must not contain a port; set the port separately",
                host
            )));
        }
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(CleanError::validation(format!(
                "Registry host '{}' must not contain a path or query",
                host
            )));
        }
        if !url.username().is_empty() || url.password().is_some() {
            return Err(CleanError::validation(format!(
                "Registry host '{}' must not contain credentials",
                host
            )));
        }

        Ok(url)
    }
}

/// True when the authority of `url` spells out a port, including a scheme's
/// default port, which `Url::port` reports as absent.
fn has_explicit_port(url: &str) -> bool {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let after_ipv6 = host_port.rsplit_once(']').map_or(host_port, |(_, r)| r);
    after_ipv6.contains(':')
}

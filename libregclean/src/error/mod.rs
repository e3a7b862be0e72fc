//! Error types for regclean.
//!
//! Every fallible operation in the library returns [`CleanError`]. Some
//! variants are hard failures (a registry that cannot be reached), others are
//! skip signals that callers log and move past (an empty manifest history).

use thiserror::Error;


/// Main error type for registry cleanup operations
#[derive(Error, Debug)]
pub enum CleanError {
    /// Connection, DNS or timeout failures
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A response body was not the JSON we expected
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The registry did not hand out a digest for a tag
    #[error("Digest unavailable for {image}:{tag}: {reason}")]
    DigestUnavailable {
        image: String,
        tag: String,
        reason: String,
    },

    /// The cutoff date matched none of the accepted layouts
    #[error("Cannot parse date '{input}' (expected DD.MM.YYYY[ HH:MM[:SS]])")]
    UnparseableDate { input: String },

    /// The manifest carries no history entries; the tag is skipped
    #[error("Manifest history is empty for {image}:{tag}")]
    EmptyManifestHistory { image: String, tag: String },

    /// Non-success status from a read endpoint
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// Invalid input (bad registry address, malformed digest, ...)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Configuration errors (invalid config file, missing settings)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for regclean operations
pub type Result<T> = std::result::Result<T, CleanError>;

impl CleanError {
    /// Creates a new transport error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregclean::error::CleanError;
    ///
    /// let err = CleanError::transport("connection refused");
    /// assert!(matches!(err, CleanError::Transport { .. }));
    /// ```
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new transport error with a source error.
    pub fn transport_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new decode error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregclean::error::CleanError;
    ///
    /// let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
    /// let err = CleanError::decode_with_source("bad catalog", json_err);
    /// assert!(matches!(err, CleanError::Decode { .. }));
    /// ```
    pub fn decode_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new digest-unavailable error.
    pub fn digest_unavailable<I, T, R>(image: I, tag: T, reason: R) -> Self
    where
        I: Into<String>,
        T: Into<String>,
        R: Into<String>,
    {
        Self::DigestUnavailable {
            image: image.into(),
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new unparseable-date error.
    pub fn unparseable_date<S: Into<String>>(input: S) -> Self {
        Self::UnparseableDate {
            input: input.into(),
        }
    }

    /// Creates a new empty-history skip signal.
    pub fn empty_history<I: Into<String>, T: Into<String>>(image: I, tag: T) -> Self {
        Self::EmptyManifestHistory {
            image: image.into(),
            tag: tag.into(),
        }
    }

    /// Creates a new HTTP status error.
    pub fn http<S: Into<String>>(status: u16, url: S) -> Self {
        Self::Http {
            status,
            url: url.into(),
        }
    }

    /// Creates a new validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregclean::error::CleanError;
    ///
    /// let err = CleanError::validation("registry host cannot be empty");
    /// assert!(matches!(err, CleanError::Validation { .. }));
    /// ```
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S, P>(message: S, path: Option<P>) -> Self
    where
        S: Into<String>,
        P: Into<String>,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<S, P, E>(message: S, path: Option<P>, source: E) -> Self
    where
        S: Into<String>,
        P: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true for errors that mean "skip this tag and keep going"
    /// rather than "something is wrong with the run".
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Self::EmptyManifestHistory { .. }
                | Self::Decode { .. }
                | Self::DigestUnavailable { .. }
        )
    }
}

impl From<config::ConfigError> for CleanError {
    fn from(err: config::ConfigError) -> Self {
        Self::config_with_source("Failed to build configuration", None::<String>, err)
    }
}

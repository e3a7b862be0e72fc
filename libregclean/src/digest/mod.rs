//! Content digest validation.
//!
//! Registries return the manifest digest in the `Docker-Content-Digest`
//! header. Deletion is addressed by that digest, so it is validated before it
//! is ever placed into a URL.

use crate::error::{CleanError, Result};
use oci_spec::image::Digest as OciDigest;
use std::fmt;
use std::str::FromStr;


/// A validated `algorithm:encoded` content digest, wrapping
/// `oci_spec::image::Digest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest(OciDigest);

impl FromStr for Digest {
    type Err = CleanError;

    /// Surrounding whitespace, as found in header values, is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let oci_digest = OciDigest::from_str(s).map_err(|e| {
            CleanError::validation(format!("Invalid digest format: {}: {}", s, e))
        })?;
        Ok(Digest(oci_digest))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

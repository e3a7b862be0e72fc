//! Schema 1 manifest history decoding.
//!
//! The tag-by-tag creation time is not part of the v2 manifest itself. It
//! lives in the `v1Compatibility` blob of the first history entry, which is a
//! JSON document embedded as a string.

use crate::error::{CleanError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};


/// Manifest returned by `GET /v2/{image}/manifests/{tag}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    /// History entries, newest first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// One raw history item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    #[serde(rename = "v1Compatibility")]
    pub v1_compatibility: String,
}

/// Decoded compatibility blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct V1Compatibility {
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
}

impl Manifest {
    /// Parses a manifest response body.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| CleanError::decode_with_source("Failed to parse manifest JSON", e))
    }

    /// Decodes the newest history entry.
    ///
    /// `image` and `tag` only label the error.
    ///
    /// # Errors
    ///
    /// - [`CleanError::EmptyManifestHistory`] when there is no history
    /// - [`CleanError::Decode`] when the blob is not valid compatibility JSON
    pub fn v1_compatibility(&self, image: &str, tag: &str) -> Result<V1Compatibility> {
        let entry = self
            .history
            .first()
            .ok_or_else(|| CleanError::empty_history(image, tag))?;

        serde_json::from_str(&entry.v1_compatibility).map_err(|e| {
            CleanError::decode_with_source(
                format!("Failed to decode v1Compatibility for {}:{}", image, tag),
                e,
            )
        })
    }

    /// Returns the creation timestamp of the newest history entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregclean::manifest::Manifest;
    ///
    /// let body = r#"{"history":[{"v1Compatibility":"{\"created\":\"2020-01-01T00:00:00Z\"}"}]}"#;
    /// let manifest = Manifest::from_bytes(body.as_bytes()).unwrap();
    /// let created = manifest.created("team/app", "v1").unwrap();
    /// assert_eq!(created.to_rfc3339(), "2020-01-01T00:00:00+00:00");
    /// ```
    pub fn created(&self, image: &str, tag: &str) -> Result<DateTime<Utc>> {
        self.v1_compatibility(image, tag).map(|v1| v1.created)
    }
}

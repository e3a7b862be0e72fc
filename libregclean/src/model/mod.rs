//! Registry data structures shared across the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[cfg(test)]
mod tests;

/// Response from the catalog endpoint listing repositories.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    /// Repository paths in the order the registry returned them.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub repositories: Vec<String>,
}

/// A repository and a list of its tag names.
///
/// Returned by the tag-list endpoint with every tag, and by policy
/// evaluation with only the deletable ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    /// Full repository path, e.g. `team/app`
    pub name: String,
    /// Tag names
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl Image {
    pub fn new(name: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            name: name.into(),
            tags,
        }
    }
}

/// A tag resolved during evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag name, e.g. `v1`
    pub name: String,
    /// Repository the tag belongs to
    pub image_name: String,
    /// Creation timestamp from the newest manifest history entry
    pub created: DateTime<Utc>,
    /// Manifest digest, the handle used for deletion
    pub digest: String,
}

// Registries answer `"tags": null` for repositories whose tags were all deleted.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

//! Built-in retention rules.

use super::RetentionPolicy;
use super::date::parse_date;
use crate::error::{CleanError, Result};
use crate::model::Tag;

/// Deletes tags created strictly before a cutoff date.
///
/// Tags created exactly at the cutoff are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OlderThanDate {
    date: String,
}

impl OlderThanDate {
    /// `date` is parsed lazily, see [`parse_date`] for the layouts.
    pub fn new(date: impl Into<String>) -> Self {
        Self { date: date.into() }
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}

impl RetentionPolicy for OlderThanDate {
    fn describe(&self) -> String {
        format!("older than {}", self.date)
    }

    fn check(&self) -> Result<()> {
        parse_date(&self.date).map(|_| ())
    }

    fn select(&self, tags: &[Tag]) -> Result<Vec<Tag>> {
        let cutoff = parse_date(&self.date)?;
        Ok(tags
            .iter()
            .filter(|tag| cutoff > tag.created)
            .cloned()
            .collect())
    }
}

/// Keeps the `count` most recently created tags and deletes the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepLast {
    count: usize,
}

impl KeepLast {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl RetentionPolicy for KeepLast {
    fn describe(&self) -> String {
        format!("keep last {}", self.count)
    }

    fn check(&self) -> Result<()> {
        if self.count == 0 {
            return Err(CleanError::validation(
                "keep_last count must be at least 1",
            ));
        }
        Ok(())
    }

    fn select(&self, tags: &[Tag]) -> Result<Vec<Tag>> {
        self.check()?;

        // Newest first; the sort is stable so equal timestamps keep
        // encounter order.
        let mut by_age: Vec<usize> = (0..tags.len()).collect();
        by_age.sort_by(|&a, &b| tags[b].created.cmp(&tags[a].created));

        let mut deletable = vec![false; tags.len()];
        for &index in by_age.iter().skip(self.count) {
            deletable[index] = true;
        }

        Ok(tags
            .iter()
            .zip(deletable)
            .filter_map(|(tag, delete)| delete.then(|| tag.clone()))
            .collect())
    }
}

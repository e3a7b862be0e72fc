//! Retention policy evaluation.
//!
//! A [`RetentionPolicy`] decides which tags of one image are deletable,
//! given every resolved tag of that image. The [`Evaluator`] does the
//! fetching: it resolves each tag's creation time and digest through a
//! [`TagSource`], drops the tags it cannot resolve, and hands the rest to the
//! policy.
//!
//! Evaluation never fails loudly. A policy that cannot be applied (an
//! unparseable cutoff date, say) yields no deletions at all.

mod date;
mod rules;

pub use date::{DATE_LAYOUT, DATE_TIME_LAYOUTS, parse_date};
pub use rules::{KeepLast, OlderThanDate};

use crate::digest::Digest;
use crate::error::{CleanError, Result};
use crate::logging::Logger;
use crate::manifest::Manifest;
use crate::model::{Image, Tag};
use std::sync::Arc;


/// Per-tag metadata lookups needed by the evaluator.
///
/// Implemented by [`crate::client::Client`]; tests substitute fixtures.
pub trait TagSource {
    /// Fetches the manifest (with history) of `image_name:tag`.
    fn manifest(&self, image_name: &str, tag: &str) -> Result<Manifest>;

    /// Resolves the manifest digest of `image_name:tag`.
    fn digest(&self, image_name: &str, tag: &str) -> Result<Digest>;
}

/// A rule deciding which tags of an image may be deleted.
pub trait RetentionPolicy {
    /// Short human-readable description used in log lines.
    fn describe(&self) -> String;

    /// Validates the rule's parameters. Called before any tag is fetched.
    fn check(&self) -> Result<()> {
        Ok(())
    }

    /// Returns the deletable subset of `tags`, in the order given.
    ///
    /// `tags` holds every resolvable tag of a single image.
    fn select(&self, tags: &[Tag]) -> Result<Vec<Tag>>;
}

/// Applies retention policies to images.
pub struct Evaluator<'a> {
    source: &'a dyn TagSource,
    logger: Arc<dyn Logger>,
}

impl<'a> Evaluator<'a> {
    pub fn new(source: &'a dyn TagSource, logger: Arc<dyn Logger>) -> Self {
        Self { source, logger }
    }

    /// Resolves creation time and digest for every tag of `image`.
    ///
    /// Tags whose manifest cannot be fetched, whose history is empty or
    /// undecodable, or whose digest is unavailable are logged and left out.
    pub fn collect_tags(&self, image: &Image) -> Vec<Tag> {
        let mut tags = Vec::with_capacity(image.tags.len());

        for tag in &image.tags {
            let manifest = match self.source.manifest(&image.name, tag) {
                Ok(manifest) => manifest,
                Err(e) => {
                    self.skip_tag(image, tag, "Cannot fetch manifest", &e);
                    continue;
                }
            };

            let created = match manifest.created(&image.name, tag) {
                Ok(created) => created,
                Err(e) => {
                    self.skip_tag(image, tag, "Image manifest is broken", &e);
                    continue;
                }
            };

            let digest = match self.source.digest(&image.name, tag) {
                Ok(digest) => digest,
                Err(e) => {
                    self.skip_tag(image, tag, "Cannot resolve digest", &e);
                    continue;
                }
            };

            tags.push(Tag {
                name: tag.clone(),
                image_name: image.name.clone(),
                created,
                digest: digest.to_string(),
            });
        }

        tags
    }

    /// Logs a tag left out of evaluation. Expected skips (empty history,
    /// undecodable blobs, missing digests) are warnings; anything else is
    /// an error.
    fn skip_tag(&self, image: &Image, tag: &str, what: &str, err: &CleanError) {
        let line = format!("{} for {}:{}, skipping tag: {}", what, image.name, tag, err);
        if err.is_skip() {
            self.logger.warn(&line);
        } else {
            self.logger.error(&line);
        }
    }

    /// Returns the resolved tags of `image` that `policy` marks deletable.
    pub fn plan(&self, image: &Image, policy: &dyn RetentionPolicy) -> Vec<Tag> {
        if let Err(e) = policy.check() {
            self.logger.error(&format!(
                "Policy '{}' cannot be applied to {}, nothing will be deleted: {}",
                policy.describe(),
                image.name,
                e
            ));
            return Vec::new();
        }

        let tags = self.collect_tags(image);
        match policy.select(&tags) {
            Ok(deletable) => {
                let names: Vec<&str> = deletable.iter().map(|t| t.name.as_str()).collect();
                self.logger.info(&format!(
                    "{}: {} of {} tags deletable ({}): {:?}",
                    image.name,
                    deletable.len(),
                    image.tags.len(),
                    policy.describe(),
                    names
                ));
                deletable
            }
            Err(e) => {
                self.logger.error(&format!(
                    "Policy '{}' failed for {}, nothing will be deleted: {}",
                    policy.describe(),
                    image.name,
                    e
                ));
                Vec::new()
            }
        }
    }

    /// Returns a new image listing only the deletable tag names.
    ///
    /// The input is left untouched.
    pub fn evaluate(&self, image: &Image, policy: &dyn RetentionPolicy) -> Image {
        let tags = self
            .plan(image, policy)
            .into_iter()
            .map(|tag| tag.name)
            .collect();
        Image::new(image.name.clone(), tags)
    }
}

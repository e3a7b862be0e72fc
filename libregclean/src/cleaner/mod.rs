//! Whole-registry cleanup.
//!
//! [`Cleaner::run`] walks the catalog group by group, evaluates a retention
//! policy for every image, and deletes the planned tags one at a time.
//! Failures on one repository or tag are recorded in the
//! [`CleanupReport`] and the run moves on.

use crate::client::Client;
use crate::error::Result;
use crate::logging::Logger;
use crate::model::Image;
use crate::policy::{Evaluator, RetentionPolicy};
use crate::repository::{join_repository, split_repositories};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;


/// A tag that was deleted (or would have been, in dry-run mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedTag {
    pub image: String,
    pub tag: String,
    pub digest: String,
    pub created: DateTime<Utc>,
    pub status: u16,
}

/// A planned deletion that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDeletion {
    pub image: String,
    pub tag: String,
    pub digest: String,
    /// Status returned by the registry, absent when no response arrived
    pub status: Option<u16>,
    pub reason: String,
}

/// A repository whose tag list could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRepository {
    pub image: String,
    pub reason: String,
}

/// Outcome of a cleanup run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub dry_run: bool,
    pub images_evaluated: usize,
    pub deleted: Vec<DeletedTag>,
    pub failed: Vec<FailedDeletion>,
    pub skipped: Vec<SkippedRepository>,
}

impl CleanupReport {
    /// True when every planned deletion went through.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs a retention policy against every repository of a registry.
pub struct Cleaner {
    client: Client,
    logger: Arc<dyn Logger>,
}

impl Cleaner {
    pub fn new(client: Client, logger: Arc<dyn Logger>) -> Self {
        Self { client, logger }
    }

    /// Cleans the whole registry.
    ///
    /// # Errors
    ///
    /// Only a failure to fetch the catalog aborts the run. Everything after
    /// that is recorded in the report.
    pub fn run(&self, policy: &dyn RetentionPolicy) -> Result<CleanupReport> {
        let mut report = CleanupReport {
            dry_run: self.client.registry().dry_run(),
            ..CleanupReport::default()
        };

        let catalog = self.client.fetch_catalog().inspect_err(|e| {
            self.logger.error(&format!("Cannot fetch catalog: {}", e));
        })?;
        self.logger.info(&format!(
            "Catalog lists {} repositories, applying policy '{}'",
            catalog.repositories.len(),
            policy.describe()
        ));

        for (group, names) in split_repositories(&catalog.repositories) {
            for name in names {
                self.clean_repository(&group, &name, policy, &mut report);
            }
        }

        self.logger.info(&format!(
            "Cleanup finished: {} deleted, {} failed, {} repositories skipped",
            report.deleted.len(),
            report.failed.len(),
            report.skipped.len()
        ));
        Ok(report)
    }

    /// Cleans a single repository, appending the outcome to `report`.
    pub fn clean_repository(
        &self,
        group: &str,
        name: &str,
        policy: &dyn RetentionPolicy,
        report: &mut CleanupReport,
    ) {
        let full_name = join_repository(group, name);

        let image = match self.client.fetch_tag_list(group, name) {
            Ok(image) => image,
            Err(e) => {
                self.logger.error(&format!(
                    "Cannot list tags of {} (group '{}'), skipping repository: {}",
                    full_name, group, e
                ));
                report.skipped.push(SkippedRepository {
                    image: full_name,
                    reason: e.to_string(),
                });
                return;
            }
        };

        // Registries sometimes echo a different name; address by catalog path.
        let image = Image::new(full_name.clone(), image.tags);

        let evaluator = Evaluator::new(&self.client, self.logger.clone());
        let plan = evaluator.plan(&image, policy);
        report.images_evaluated += 1;

        for tag in plan {
            match self.client.delete_tag(&tag.image_name, &tag.digest) {
                Ok(status) if (200..300).contains(&status) => {
                    self.logger.info(&format!(
                        "Deleted {}:{} ({}) status {}",
                        tag.image_name, tag.name, tag.digest, status
                    ));
                    report.deleted.push(DeletedTag {
                        image: tag.image_name,
                        tag: tag.name,
                        digest: tag.digest,
                        created: tag.created,
                        status,
                    });
                }
                Ok(status) => {
                    self.logger.error(&format!(
                        "Registry refused to delete {}:{} ({}) status {}",
                        tag.image_name, tag.name, tag.digest, status
                    ));
                    report.failed.push(FailedDeletion {
                        image: tag.image_name,
                        tag: tag.name,
                        digest: tag.digest,
                        status: Some(status),
                        reason: format!("registry answered {}", status),
                    });
                }
                Err(e) => {
                    self.logger.error(&format!(
                        "Cannot delete {}:{} ({}): {}",
                        tag.image_name, tag.name, tag.digest, e
                    ));
                    report.failed.push(FailedDeletion {
                        image: tag.image_name,
                        tag: tag.name,
                        digest: tag.digest,
                        status: None,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }
}

//! Repository path splitting.
//!
//! Catalog entries are slash-delimited paths such as `team/backend/api`.
//! The last segment is the image name and everything before it is the group,
//! which is how the tag-list endpoint is addressed.

use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

/// Splits one repository path into `(group, image)`.
///
/// The group is empty when the path has no `/`.
///
/// # Examples
///
/// ```
/// use libregclean::repository::split_repository;
///
/// assert_eq!(split_repository("a/b/c"), ("a/b", "c"));
/// assert_eq!(split_repository("solo"), ("", "solo"));
/// ```
pub fn split_repository(path: &str) -> (&str, &str) {
    match path.rsplit_once('/') {
        Some((group, name)) => (group, name),
        None => ("", path),
    }
}

/// Groups repository paths by their group prefix.
///
/// Images sharing a group accumulate under the same key in first-seen order.
///
/// # Examples
///
/// ```
/// use libregclean::repository::split_repositories;
///
/// let groups = split_repositories(&["a/b/c", "a/b/d", "solo"]);
/// assert_eq!(groups["a/b"], vec!["c", "d"]);
/// assert_eq!(groups[""], vec!["solo"]);
/// ```
pub fn split_repositories<S: AsRef<str>>(paths: &[S]) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for path in paths {
        let (group, name) = split_repository(path.as_ref());
        groups
            .entry(group.to_string())
            .or_default()
            .push(name.to_string());
    }
    groups
}

/// Rebuilds the full repository path from a group and an image name.
pub fn join_repository(group: &str, name: &str) -> String {
    if group.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", group, name)
    }
}

//! # Correlate Module
//!
//! Attaches `SourceCodeInfo` comments to the declarations they document.
//!
//! Every location carrying a leading or detached comment is resolved with
//! [`crate::walker`]; the comment text is stored under the resolved key for
//! that file. [`build_schema`] then turns the descriptors and the collected
//! associations into the correlated [`crate::ast::Schema`].
//!
//! Files are processed in request order and locations in their given order.
//! When two locations resolve to the same key, the later comment wins.

mod comments;

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::ast::{self, Schema};
use crate::descriptor::{FileDescriptorProto, NodeRef};
use crate::diagnostics::{Diagnostics, Stage};
use crate::error::WalkError;
use crate::walker::{walk_with_policy, WalkPolicy};

pub use comments::clean_comment;

/// Comment text keyed by `file:key`, where `key` is [`crate::walker::Resolved::key`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Associations {
    entries: BTreeMap<String, String>,
}

impl Associations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn compose(file: &str, key: &str) -> String {
        format!("{file}:{key}")
    }

    /// Store `text` for `key` in `file`, replacing any earlier comment.
    pub fn insert(&mut self, file: &str, key: &str, text: String) -> Option<String> {
        self.entries.insert(Self::compose(file, key), text)
    }

    #[must_use]
    pub fn get(&self, file: &str, key: &str) -> Option<&str> {
        self.entries
            .get(&Self::compose(file, key))
            .map(String::as_str)
    }

    /// Comment for `key` in `file`, or an empty string.
    #[must_use]
    pub fn description(&self, file: &str, key: &str) -> String {
        self.get(file, key).unwrap_or_default().to_string()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Select the files to document: `requested` in its order, or every file when empty.
///
/// Requested names with no matching descriptor are reported and skipped.
pub fn select_files<'a>(
    files: &'a [FileDescriptorProto],
    requested: &[String],
    diagnostics: &mut Diagnostics,
) -> Vec<&'a FileDescriptorProto> {
    if requested.is_empty() {
        return files.iter().collect();
    }
    requested
        .iter()
        .filter_map(|name| {
            let found = files.iter().find(|f| f.name.as_deref() == Some(name.as_str()));
            if found.is_none() {
                diagnostics.warn(
                    Stage::Correlate,
                    Some(name),
                    &[],
                    "requested file is not in the descriptor set",
                );
            }
            found
        })
        .collect()
}

/// Resolve every commented location of the `requested` files.
///
/// # Errors
///
/// The first walk failure under [`WalkPolicy::Strict`]. Best-effort runs
/// record failures in `diagnostics` and never fail.
pub fn correlate(
    files: &[FileDescriptorProto],
    requested: &[String],
    policy: WalkPolicy,
    diagnostics: &mut Diagnostics,
) -> Result<Associations, WalkError> {
    let mut associations = Associations::new();

    for file in select_files(files, requested, diagnostics) {
        let file_name = file.name.as_deref().unwrap_or_default();
        let Some(info) = file.source_code_info.as_ref() else {
            debug!(file = file_name, "No source info; descriptions left empty");
            continue;
        };

        let mut attached = 0usize;
        for location in info.location.iter().filter(|l| l.has_leading()) {
            let Some(resolved) = walk_with_policy(
                &location.path,
                NodeRef::File(file),
                policy,
                file_name,
                diagnostics,
            )?
            else {
                continue;
            };
            let key = resolved.key();
            if associations
                .insert(file_name, &key, clean_comment(location))
                .is_some()
            {
                debug!(file = file_name, key = %key, "Comment replaced an earlier one");
            }
            attached += 1;
        }
        info!(
            file = file_name,
            locations = info.location.len(),
            attached,
            "Comments correlated"
        );
    }

    Ok(associations)
}

/// Correlate comments and build the schema tree in one pass.
///
/// # Errors
///
/// As [`correlate`].
pub fn correlate_schema(
    files: &[FileDescriptorProto],
    requested: &[String],
    policy: WalkPolicy,
    diagnostics: &mut Diagnostics,
) -> Result<Schema, WalkError> {
    let associations = correlate(files, requested, policy, diagnostics)?;
    Ok(build_schema(files, requested, &associations, diagnostics))
}

/// Build the [`Schema`] for the `requested` files using collected comments.
///
/// Type references are resolved against every file in `files`, so imported
/// request messages still produce binding fields.
pub fn build_schema(
    files: &[FileDescriptorProto],
    requested: &[String],
    associations: &Associations,
    diagnostics: &mut Diagnostics,
) -> Schema {
    let index = ast::TypeIndex::new(files);
    let selected = select_files(files, requested, &mut Diagnostics::new());
    let files = selected
        .into_iter()
        .map(|file| ast::build_file(file, &index, associations, diagnostics))
        .collect();
    Schema { files }
}

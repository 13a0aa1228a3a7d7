//! Error kinds shared across correlation, URL binding and generation.
//!
//! Library layers return these typed errors; the CLI and the protoc plugin
//! wrap them in `anyhow` with context before reporting.

use serde::Serialize;
use thiserror::Error;

/// Failure while navigating a source-location path through the descriptor tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    /// A selector names a field the current node does not declare, or the
    /// path tries to descend into a scalar.
    #[error("malformed location path {path:?}: node `{node}` has no navigable field {selector}")]
    MalformedPath {
        path: Vec<i32>,
        node: String,
        selector: i32,
    },
    /// A collection index is negative or past the end of the collection.
    #[error("location path {path:?}: index {index} out of range for `{field}` (len {len})")]
    IndexOutOfRange {
        path: Vec<i32>,
        field: &'static str,
        index: i32,
        len: usize,
    },
    /// A singular child the path points through is absent.
    #[error("location path {path:?}: `{field}` is not set on `{node}`")]
    BrokenReference {
        path: Vec<i32>,
        node: String,
        field: &'static str,
    },
}

/// Failure while binding a concrete request path to a URL template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The request path has fewer segments than the template's placeholder positions.
    #[error("path `{url}` has {segments} segments, placeholder `{field}` needs index {position}")]
    IndexOutOfRange {
        url: String,
        field: String,
        position: usize,
        segments: usize,
    },
    /// The requested field is not a placeholder of the template.
    #[error("field `{field}` is not a placeholder in template `{template}`")]
    FieldNotFound { field: String, template: String },
}

/// Cosmetic failure of the canonical formatter. Never aborts generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("failed to format `{path}`: {message}")]
pub struct FormatError {
    pub path: String,
    pub message: String,
}

/// Failure of a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A template failed to parse or render; aborts the whole run.
    #[error("template `{asset}` failed: {cause}")]
    TemplateExecution { asset: String, cause: String },
    /// Two assets resolved to the same output path.
    #[error("assets `{first}` and `{second}` both map to `{path}`")]
    OutputCollision {
        path: String,
        first: String,
        second: String,
    },
    /// No service to generate against.
    #[error("no service found{}", named(.wanted))]
    NoService { wanted: Option<String> },
}

fn named(wanted: &Option<String>) -> String {
    wanted
        .as_deref()
        .map(|w| format!(" named `{w}`"))
        .unwrap_or_default()
}

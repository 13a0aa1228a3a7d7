use std::collections::BTreeMap;

use tracing::debug;

use super::PathIndex;
use crate::error::BindError;

/// Read every placeholder of `template` out of `url`.
///
/// Both strings are split on `/` with the same rules, so a template and a URL
/// that agree on their leading slash agree on positions.
///
/// # Errors
///
/// [`BindError::IndexOutOfRange`] when `url` is too short to contain a
/// placeholder position.
pub fn extract_all(url: &str, template: &str) -> Result<BTreeMap<String, String>, BindError> {
    let index = PathIndex::parse(template);
    let parts: Vec<&str> = url.split('/').collect();
    let mut out = BTreeMap::new();
    for (name, position) in index.iter() {
        out.insert(name.to_string(), segment_at(url, &parts, name, position)?);
    }
    debug!(url = %url, template = %template, params = ?out, "Path params extracted");
    Ok(out)
}

/// Read one placeholder of `template` out of `url`.
///
/// # Errors
///
/// [`BindError::FieldNotFound`] when `field` is not a placeholder of the
/// template, [`BindError::IndexOutOfRange`] when `url` is too short.
pub fn extract(url: &str, template: &str, field: &str) -> Result<String, BindError> {
    let index = PathIndex::parse(template);
    let position = index
        .position(field)
        .ok_or_else(|| BindError::FieldNotFound {
            field: field.to_string(),
            template: template.to_string(),
        })?;
    let parts: Vec<&str> = url.split('/').collect();
    segment_at(url, &parts, field, position)
}

fn segment_at(url: &str, parts: &[&str], field: &str, position: usize) -> Result<String, BindError> {
    parts
        .get(position)
        .map(|s| (*s).to_string())
        .ok_or_else(|| BindError::IndexOutOfRange {
            url: url.to_string(),
            field: field.to_string(),
            position,
            segments: parts.len(),
        })
}

/// Longest placeholder-free leading run of `template`'s segments.
///
/// `/v1/user/{userid}/home` → `/v1/user`. A template without placeholders is
/// its own base path; a template whose first real segment is a placeholder
/// yields `/` (or the empty string when the template has no leading slash).
#[must_use]
pub fn base_path(template: &str) -> String {
    let prefix: Vec<&str> = template
        .split('/')
        .take_while(|segment| !segment.contains(['{', '}']))
        .collect();
    let joined = prefix.join("/");
    if joined.is_empty() && template.starts_with('/') {
        "/".to_string()
    } else {
        joined
    }
}

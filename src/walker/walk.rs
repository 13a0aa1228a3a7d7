use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::descriptor::{NodeKind, NodeRef, Slot};
use crate::diagnostics::{Diagnostics, Stage};
use crate::error::WalkError;

/// How a walk failure is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkPolicy {
    /// Any failure is returned to the caller.
    Strict,
    /// Failures are recorded as diagnostics and the location is skipped.
    #[default]
    #[serde(alias = "best-effort")]
    BestEffort,
}

impl std::str::FromStr for WalkPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "strict" => Ok(WalkPolicy::Strict),
            "best_effort" | "besteffort" => Ok(WalkPolicy::BestEffort),
            other => Err(format!("unknown walk policy `{other}`")),
        }
    }
}

/// The declaration a location path points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub kind: NodeKind,
    pub name: String,
    /// Names of the enclosing nodes below the root, outermost first.
    pub scope: Vec<String>,
    /// Set when the path ends on a field of the node rather than the node
    /// itself, e.g. `package`, `options` or `dependency[1]`.
    pub slot: Option<String>,
}

impl Resolved {
    /// Dotted name of the node relative to its file; empty for the file itself.
    #[must_use]
    pub fn qualified(&self) -> String {
        if self.kind == NodeKind::File {
            return String::new();
        }
        let mut parts: Vec<&str> = self.scope.iter().map(String::as_str).collect();
        parts.push(&self.name);
        parts.join(".")
    }

    /// Association key: [`Self::qualified`] plus `#slot` for field targets.
    #[must_use]
    pub fn key(&self) -> String {
        match &self.slot {
            Some(slot) => format!("{}#{slot}", self.qualified()),
            None => self.qualified(),
        }
    }
}

/// Follow `path` from `root` to the declaration it identifies.
///
/// The path alternates field numbers and, for repeated fields, collection
/// indices. An empty path resolves to `root`.
///
/// # Errors
///
/// [`WalkError::MalformedPath`] for an unknown field number or a path that
/// descends into a scalar, [`WalkError::IndexOutOfRange`] for a bad
/// collection index, [`WalkError::BrokenReference`] for an unset singular child.
pub fn walk(path: &[i32], root: NodeRef<'_>) -> Result<Resolved, WalkError> {
    let mut node = root;
    let mut rest = path;
    let mut scope: Vec<String> = Vec::new();

    loop {
        let Some((&selector, tail)) = rest.split_first() else {
            trace!(path = ?path, kind = ?node.kind(), name = node.name(), "Location resolved");
            return Ok(Resolved {
                kind: node.kind(),
                name: node.name().to_string(),
                scope,
                slot: None,
            });
        };

        let (field, slot) = node.slot(selector).ok_or_else(|| WalkError::MalformedPath {
            path: path.to_vec(),
            node: node.name().to_string(),
            selector,
        })?;

        if tail.is_empty() {
            return Ok(slot_target(node, scope, field.to_string()));
        }

        let child = match slot {
            Slot::Node(Some(child)) => {
                rest = tail;
                child
            }
            Slot::Node(None) => {
                return Err(WalkError::BrokenReference {
                    path: path.to_vec(),
                    node: node.name().to_string(),
                    field,
                })
            }
            Slot::Nodes(list) => {
                let index = tail[0];
                let child = usize::try_from(index)
                    .ok()
                    .and_then(|i| list.get(i))
                    .ok_or_else(|| WalkError::IndexOutOfRange {
                        path: path.to_vec(),
                        field,
                        index,
                        len: list.len(),
                    })?;
                rest = &tail[1..];
                child
            }
            Slot::Scalars(len) => {
                let index = tail[0];
                if usize::try_from(index).map_or(true, |i| i >= len) {
                    return Err(WalkError::IndexOutOfRange {
                        path: path.to_vec(),
                        field,
                        index,
                        len,
                    });
                }
                if tail.len() > 1 {
                    return Err(WalkError::MalformedPath {
                        path: path.to_vec(),
                        node: node.name().to_string(),
                        selector: tail[1],
                    });
                }
                return Ok(slot_target(node, scope, format!("{field}[{index}]")));
            }
            Slot::Opaque { present: true } => {
                return Ok(slot_target(node, scope, field.to_string()));
            }
            Slot::Opaque { present: false } => {
                return Err(WalkError::BrokenReference {
                    path: path.to_vec(),
                    node: node.name().to_string(),
                    field,
                })
            }
            Slot::Scalar => {
                return Err(WalkError::MalformedPath {
                    path: path.to_vec(),
                    node: node.name().to_string(),
                    selector: tail[0],
                })
            }
        };

        if node.kind() != NodeKind::File {
            scope.push(node.name().to_string());
        }
        node = child;
    }
}

fn slot_target(node: NodeRef<'_>, scope: Vec<String>, slot: String) -> Resolved {
    Resolved {
        kind: node.kind(),
        name: node.name().to_string(),
        scope,
        slot: Some(slot),
    }
}

/// [`walk`] under a policy.
///
/// In [`WalkPolicy::BestEffort`] a failure is recorded against `subject` and
/// `Ok(None)` is returned; nothing already collected is touched.
///
/// # Errors
///
/// The walk error, in [`WalkPolicy::Strict`] only.
pub fn walk_with_policy(
    path: &[i32],
    root: NodeRef<'_>,
    policy: WalkPolicy,
    subject: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Option<Resolved>, WalkError> {
    match walk(path, root) {
        Ok(resolved) => Ok(Some(resolved)),
        Err(err) if policy == WalkPolicy::BestEffort => {
            diagnostics.warn(
                Stage::Correlate,
                Some(subject),
                path,
                format!("skipping comment location: {err}"),
            );
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

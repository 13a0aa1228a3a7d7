//! Structured diagnostics collected during one correlation or generation run.
//!
//! Records are pushed into a [`Diagnostics`] value the caller owns and passes
//! down by `&mut`; every record is also emitted as a `tracing` event.

use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

/// Pipeline stage that produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Correlate,
    Build,
    Generate,
    Format,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Correlate => "correlate",
            Stage::Build => "build",
            Stage::Generate => "generate",
            Stage::Format => "format",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub stage: Stage,
    /// Proto file or template asset the record refers to.
    pub subject: Option<String>,
    /// Source-location path, when the record comes from a walk.
    pub path: Vec<i32>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, stage: Stage, subject: Option<&str>, path: &[i32], message: impl Into<String>) {
        let message = message.into();
        warn!(stage = %stage, subject = ?subject, path = ?path, "{message}");
        self.records.push(Diagnostic {
            severity: Severity::Warning,
            stage,
            subject: subject.map(str::to_string),
            path: path.to_vec(),
            message,
        });
    }

    pub fn info(&mut self, stage: Stage, subject: Option<&str>, message: impl Into<String>) {
        let message = message.into();
        info!(stage = %stage, subject = ?subject, "{message}");
        self.records.push(Diagnostic {
            severity: Severity::Info,
            stage,
            subject: subject.map(str::to_string),
            path: Vec::new(),
            message,
        });
    }

    #[must_use]
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    #[must_use]
    pub fn warnings(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.severity == Severity::Warning)
            .count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Diagnostic> {
        self.records
    }

    /// Move the records of `other` to the end, without logging them again.
    pub fn append(&mut self, other: Diagnostics) {
        self.records.extend(other.records);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_append() {
        let mut diags = Diagnostics::new();
        diags.warn(Stage::Correlate, Some("a.proto"), &[4, 9], "index out of range");
        diags.info(Stage::Build, None, "no services");
        assert_eq!(diags.len(), 2);
        assert_eq!(diags.warnings(), 1);

        let mut other = Diagnostics::new();
        other.warn(Stage::Format, Some("src/lib.rs"), &[], "unformatted");
        diags.append(other);
        assert_eq!(diags.warnings(), 2);
        let last = &diags.records()[2];
        assert_eq!(last.stage, Stage::Format);
        assert_eq!(last.subject.as_deref(), Some("src/lib.rs"));
    }
}

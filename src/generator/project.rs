use std::fs;
use std::path::{Component, Path};

use anyhow::Context;
use tracing::{info, warn};

use super::engine::Generated;

/// How [`write_files`] treats existing files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Overwrite files whose content differs.
    pub force: bool,
    /// Report what would change without touching the filesystem.
    pub dry_run: bool,
}

/// Per-file outcome counts of a write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: Vec<String>,
    pub unchanged: Vec<String>,
    /// Existing files that differ and were left alone because `force` was off.
    pub skipped: Vec<String>,
}

/// Write generated files below `out_dir`, creating directories as needed.
///
/// Output paths must be relative and may not climb out of `out_dir`; every
/// path is checked before the first file is written.
pub fn write_files(
    out_dir: &Path,
    generated: &Generated,
    options: WriteOptions,
) -> anyhow::Result<WriteSummary> {
    if let Some(file) = generated.files.iter().find(|f| !is_contained(&f.path)) {
        anyhow::bail!("refusing to write outside the output directory: {}", file.path);
    }
    let mut summary = WriteSummary::default();

    for file in &generated.files {
        let target = out_dir.join(&file.path);

        if target.exists() {
            let existing = fs::read_to_string(&target)
                .with_context(|| format!("Failed to read existing file: {}", target.display()))?;
            if existing == file.contents {
                summary.unchanged.push(file.path.clone());
                continue;
            }
            if !options.force {
                warn!(path = %target.display(), "File differs; use --force to overwrite");
                summary.skipped.push(file.path.clone());
                continue;
            }
        }

        if options.dry_run {
            info!(path = %target.display(), bytes = file.contents.len(), "Would write");
            summary.written.push(file.path.clone());
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&target, &file.contents)
            .with_context(|| format!("Failed to write file: {}", target.display()))?;
        summary.written.push(file.path.clone());
    }

    info!(
        out_dir = %out_dir.display(),
        written = summary.written.len(),
        unchanged = summary.unchanged.len(),
        skipped = summary.skipped.len(),
        dry_run = options.dry_run,
        "Output written"
    );
    Ok(summary)
}

fn is_contained(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}

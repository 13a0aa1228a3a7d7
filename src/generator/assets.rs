use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

/// One template file, addressed by its `/`-separated stored path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAsset {
    pub stored_path: String,
    pub raw: Vec<u8>,
}

impl TemplateAsset {
    pub fn new(stored_path: impl Into<String>, raw: impl Into<Vec<u8>>) -> Self {
        Self {
            stored_path: stored_path.into(),
            raw: raw.into(),
        }
    }
}

macro_rules! builtin_asset {
    ($path:literal) => {
        ($path, include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/", $path)))
    };
}

static BUILTIN: &[(&str, &str)] = &[
    builtin_asset!("v1/NAME-service/Cargo.toml.tmpl"),
    builtin_asset!("v1/NAME-service/src/lib.rs.tmpl"),
    builtin_asset!("v1/NAME-service/src/handlers.rs.tmpl"),
    builtin_asset!("v1/NAME-service/src/svc/mod.rs.tmpl"),
    builtin_asset!("v1/NAME-service/src/svc/routes.rs.tmpl"),
    builtin_asset!("v1/NAME-service/src/svc/decode.rs.tmpl"),
    builtin_asset!("v1/docs/NAME.md.tmpl"),
];

/// The default Rust service template set compiled into the binary.
#[must_use]
pub fn builtin() -> Vec<TemplateAsset> {
    BUILTIN
        .iter()
        .map(|(path, text)| TemplateAsset::new(*path, text.as_bytes()))
        .collect()
}

/// Load every file under `root` as a template, sorted by stored path.
///
/// Stored paths are relative to `root` and always use `/`.
pub fn load_dir(root: &Path) -> anyhow::Result<Vec<TemplateAsset>> {
    let mut assets = Vec::new();
    collect(root, root, &mut assets)?;
    assets.sort_by(|a, b| a.stored_path.cmp(&b.stored_path));
    info!(root = %root.display(), templates = assets.len(), "Template directory loaded");
    Ok(assets)
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<TemplateAsset>) -> anyhow::Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read template directory: {}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list template directory: {}", dir.display()))?
            .path();
        if path.is_dir() {
            collect(root, &path, out)?;
            continue;
        }
        let relative = path
            .strip_prefix(root)
            .with_context(|| format!("Template outside root: {}", path.display()))?;
        let stored_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let raw = fs::read(&path)
            .with_context(|| format!("Failed to read template: {}", path.display()))?;
        debug!(stored_path = %stored_path, bytes = raw.len(), "Template loaded");
        out.push(TemplateAsset { stored_path, raw });
    }
    Ok(())
}

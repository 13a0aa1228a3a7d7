//! Generator configuration.
//!
//! Values are layered, later layers winning:
//!
//! 1. `svcgen.toml` (or the file given with `--config`)
//! 2. `SVCGEN_*` environment variables
//! 3. protoc plugin parameters or CLI flags

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::docs::DocsFormat;
use crate::walker::WalkPolicy;

/// File looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "svcgen.toml";

/// Settings shared by the CLI and the protoc plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Service to generate, short or fully qualified; the first one when unset.
    pub service: Option<String>,
    /// Module path of the handler trait, `crate::handlers` when unset
    pub handler_import: Option<String>,
    /// Module path of the generated decoders, `crate::svc` when unset
    pub generated_import: Option<String>,
    /// Directory replacing the built-in templates.
    pub template_dir: Option<PathBuf>,
    pub walk_policy: WalkPolicy,
    pub docs_format: DocsFormat,
}

/// What the protoc plugin produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PluginMode {
    Docs,
    #[default]
    Generate,
}

/// Load a configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<GeneratorConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read generator config: {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse generator config: {}", path.display()))
}

/// Resolve the file layer.
///
/// An explicit path must exist. Otherwise `svcgen.toml` in `dir` is used when
/// present, and the defaults when not.
pub fn resolve_config(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<GeneratorConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    if candidate.exists() {
        tracing::debug!(path = %candidate.display(), "using discovered config");
        return load_config(&candidate);
    }
    Ok(GeneratorConfig::default())
}

impl GeneratorConfig {
    /// Overlay the process environment.
    pub fn with_env(self) -> anyhow::Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`, which maps an env var name to its value.
    pub fn with_env_from<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (var, key) in [
            ("SVCGEN_SERVICE", "service"),
            ("SVCGEN_HANDLER_IMPORT", "handler_import"),
            ("SVCGEN_GENERATED_IMPORT", "generated_import"),
            ("SVCGEN_TEMPLATE_DIR", "template_dir"),
            ("SVCGEN_WALK_POLICY", "walk_policy"),
            ("SVCGEN_DOCS_FORMAT", "docs_format"),
        ] {
            if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
                self.set(key, &value).with_context(|| format!("Invalid {var}"))?;
            }
        }
        Ok(self)
    }

    /// Apply a protoc plugin parameter string, `key=value` pairs separated by commas.
    ///
    /// `mode` selects [`PluginMode`]; the other keys are the config fields.
    pub fn apply_plugin_parameter(&mut self, parameter: &str) -> anyhow::Result<PluginMode> {
        let mut mode = PluginMode::default();
        for pair in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("plugin parameter `{pair}` is not key=value"))?;
            let (key, value) = (key.trim(), value.trim());
            if key == "mode" {
                mode = match value {
                    "docs" => PluginMode::Docs,
                    "generate" => PluginMode::Generate,
                    other => bail!("unknown plugin mode `{other}`"),
                };
            } else {
                self.set(key, value)?;
            }
        }
        Ok(mode)
    }

    /// Set one field by its config key.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "service" => self.service = Some(value.to_string()),
            "handler_import" => self.handler_import = Some(value.to_string()),
            "generated_import" => self.generated_import = Some(value.to_string()),
            "template_dir" => self.template_dir = Some(PathBuf::from(value)),
            "walk_policy" => self.walk_policy = value.parse().map_err(|e: String| anyhow!(e))?,
            "docs_format" => {
                self.docs_format = match value {
                    "markdown" | "md" => DocsFormat::Markdown,
                    "json" => DocsFormat::Json,
                    other => bail!("unknown docs format `{other}`"),
                }
            }
            other => bail!("unknown config key `{other}`"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("svcgen.toml");
        std::fs::write(
            &path,
            r#"
service = "calc.Calculator"
handler_import = "my_api::logic"
walk_policy = "strict"
docs_format = "json"
"#,
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.service.as_deref(), Some("calc.Calculator"));
        assert_eq!(config.handler_import.as_deref(), Some("my_api::logic"));
        assert_eq!(config.generated_import, None);
        assert_eq!(config.walk_policy, WalkPolicy::Strict);
        assert_eq!(config.docs_format, DocsFormat::Json);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("svcgen.toml");
        std::fs::write(&path, "sevrice = \"x\"\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse generator config"));
    }

    #[test]
    fn test_resolve_discovers_default_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_config(None, dir.path()).unwrap(), GeneratorConfig::default());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "service = \"Calculator\"\n").unwrap();
        let config = resolve_config(None, dir.path()).unwrap();
        assert_eq!(config.service.as_deref(), Some("Calculator"));

        let missing = dir.path().join("missing.toml");
        assert!(resolve_config(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn test_env_overlay() {
        let env: HashMap<&str, &str> = [
            ("SVCGEN_SERVICE", "Other"),
            ("SVCGEN_TEMPLATE_DIR", "/tmp/tpl"),
            ("SVCGEN_WALK_POLICY", "best-effort"),
            ("SVCGEN_HANDLER_IMPORT", ""),
        ]
        .into_iter()
        .collect();
        let base = GeneratorConfig {
            service: Some("Calculator".into()),
            handler_import: Some("keep::me".into()),
            walk_policy: WalkPolicy::Strict,
            ..Default::default()
        };
        let config = base
            .with_env_from(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.service.as_deref(), Some("Other"));
        assert_eq!(config.template_dir, Some(PathBuf::from("/tmp/tpl")));
        assert_eq!(config.walk_policy, WalkPolicy::BestEffort);
        assert_eq!(config.handler_import.as_deref(), Some("keep::me"));
    }

    #[test]
    fn test_env_overlay_invalid_value() {
        let err = GeneratorConfig::default()
            .with_env_from(|k| (k == "SVCGEN_WALK_POLICY").then(|| "sloppy".to_string()))
            .unwrap_err();
        assert!(format!("{err:#}").contains("SVCGEN_WALK_POLICY"));
    }

    #[test]
    fn test_plugin_parameter() {
        let mut config = GeneratorConfig::default();
        let mode = config
            .apply_plugin_parameter("mode=docs, docs_format=json,walk_policy=strict")
            .unwrap();
        assert_eq!(mode, PluginMode::Docs);
        assert_eq!(config.docs_format, DocsFormat::Json);
        assert_eq!(config.walk_policy, WalkPolicy::Strict);

        let mut config = GeneratorConfig::default();
        assert_eq!(config.apply_plugin_parameter("").unwrap(), PluginMode::Generate);
        assert_eq!(
            config.apply_plugin_parameter("service=calc.Calculator").unwrap(),
            PluginMode::Generate
        );
        assert_eq!(config.service.as_deref(), Some("calc.Calculator"));
    }

    #[test]
    fn test_plugin_parameter_errors() {
        let mut config = GeneratorConfig::default();
        assert!(config.apply_plugin_parameter("mode").is_err());
        assert!(config.apply_plugin_parameter("mode=lint").is_err());
        assert!(config.apply_plugin_parameter("colour=blue").is_err());
    }
}

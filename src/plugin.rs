//! protoc plugin driver.
//!
//! `mode=docs` writes one document per file to generate, named after the
//! proto with its extension swapped. `mode=generate` (the default) writes
//! the service crate for the configured service.

use anyhow::Context;
use tracing::info;

use crate::config::{resolve_config, GeneratorConfig, PluginMode};
use crate::descriptor::{decode_plugin_request, proto::CodeGeneratorRequest};
use crate::diagnostics::Diagnostics;
use crate::docs::DocsFormat;
use crate::pipeline;

/// Handle an encoded request with config from `svcgen.toml` and the environment.
pub fn respond(request: &[u8]) -> anyhow::Result<Vec<(String, String)>> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let base = resolve_config(None, &cwd)?.with_env()?;
    respond_with(&decode_plugin_request(request)?, base)
}

/// Handle a decoded request; plugin parameters are applied over `base`.
pub fn respond_with(
    request: &CodeGeneratorRequest,
    mut config: GeneratorConfig,
) -> anyhow::Result<Vec<(String, String)>> {
    let mode = config
        .apply_plugin_parameter(request.parameter.as_deref().unwrap_or_default())
        .context("Invalid plugin parameter")?;
    let mut diagnostics = Diagnostics::new();

    let files = match mode {
        PluginMode::Docs => {
            let extension = match config.docs_format {
                DocsFormat::Markdown => "md",
                DocsFormat::Json => "json",
            };
            request
                .file_to_generate
                .iter()
                .map(|name| {
                    let text = pipeline::docs(
                        &request.proto_file,
                        std::slice::from_ref(name),
                        &config,
                        &mut diagnostics,
                    )?;
                    Ok((docs_name(name, extension), text))
                })
                .collect::<anyhow::Result<Vec<_>>>()?
        }
        PluginMode::Generate => pipeline::generate(
            &request.proto_file,
            &request.file_to_generate,
            &config,
            &mut diagnostics,
        )?
        .into_pairs(),
    };

    info!(
        mode = ?mode,
        files = files.len(),
        warnings = diagnostics.warnings(),
        "Plugin response ready"
    );
    Ok(files)
}

fn docs_name(proto: &str, extension: &str) -> String {
    let stem = proto.strip_suffix(".proto").unwrap_or(proto);
    format!("{stem}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docs_name() {
        assert_eq!(docs_name("api/calc.proto", "md"), "api/calc.md");
        assert_eq!(docs_name("calc", "json"), "calc.json");
    }

    #[test]
    fn test_bad_parameter_is_error() {
        let request = CodeGeneratorRequest {
            parameter: Some("mode=lint".into()),
            ..Default::default()
        };
        let err = respond_with(&request, GeneratorConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("unknown plugin mode"));
    }

    #[test]
    fn test_generate_without_services_is_error() {
        let request = CodeGeneratorRequest::default();
        let err = respond_with(&request, GeneratorConfig::default()).unwrap_err();
        assert!(format!("{err:#}").to_lowercase().contains("service"));
    }
}

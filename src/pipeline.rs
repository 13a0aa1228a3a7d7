//! End-to-end runs shared by the `svcgen` CLI and the protoc plugin.
//!
//! ```text
//! descriptors ─▶ correlate ─▶ Schema ─┬─▶ docs::render ─────────▶ String
//!                                     └─▶ GenerationContext ─▶ generate ─▶ Generated
//! ```

use anyhow::Context;
use tracing::info;

use crate::ast::Schema;
use crate::config::GeneratorConfig;
use crate::correlate::correlate_schema;
use crate::descriptor::FileDescriptorProto;
use crate::diagnostics::{Diagnostics, Stage};
use crate::docs;
use crate::generator::{self, CanonicalFormatter, Generated, GenerationContext, TemplateAsset};

/// Correlate the `requested` files into a [`Schema`].
pub fn schema(
    files: &[FileDescriptorProto],
    requested: &[String],
    config: &GeneratorConfig,
    diagnostics: &mut Diagnostics,
) -> anyhow::Result<Schema> {
    let schema = correlate_schema(files, requested, config.walk_policy, diagnostics)
        .context("Failed to correlate source comments")?;
    info!(
        files = schema.files.len(),
        services = schema.services().count(),
        policy = ?config.walk_policy,
        "Schema built"
    );
    Ok(schema)
}

/// Documentation for the `requested` files in the configured format.
pub fn docs(
    files: &[FileDescriptorProto],
    requested: &[String],
    config: &GeneratorConfig,
    diagnostics: &mut Diagnostics,
) -> anyhow::Result<String> {
    let schema = schema(files, requested, config, diagnostics)?;
    docs::render(&schema, config.docs_format).context("Failed to render documentation")
}

/// Templates to run: the configured directory, else the built-in set.
pub fn assets(config: &GeneratorConfig) -> anyhow::Result<Vec<TemplateAsset>> {
    match &config.template_dir {
        Some(dir) => generator::load_dir(dir),
        None => Ok(generator::builtin()),
    }
}

/// Service scaffolding for the configured service.
pub fn generate(
    files: &[FileDescriptorProto],
    requested: &[String],
    config: &GeneratorConfig,
    diagnostics: &mut Diagnostics,
) -> anyhow::Result<Generated> {
    let schema = schema(files, requested, config, diagnostics)?;
    let ctx = GenerationContext::select(&schema, config.service.as_deref())?.with_imports(
        config.handler_import.as_deref(),
        config.generated_import.as_deref(),
    );
    let assets = assets(config)?;
    let generated = generator::generate(&assets, &ctx, &CanonicalFormatter)
        .with_context(|| format!("Failed to generate `{}`", ctx.service.full_name))?;
    diagnostics.append(generated.diagnostics.clone());
    diagnostics.info(
        Stage::Generate,
        Some(&ctx.service.full_name),
        format!("{} files from {} templates", generated.files.len(), assets.len()),
    );
    Ok(generated)
}

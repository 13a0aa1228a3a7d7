use std::collections::BTreeMap;

use heck::{ToSnakeCase, ToUpperCamelCase};
use minijinja::{Environment, UndefinedBehavior};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use super::assets::TemplateAsset;
use super::context::GenerationContext;
use super::format::Formatter;
use super::path_map::map_path;
use crate::diagnostics::{Diagnostics, Stage};
use crate::error::{FormatError, GenerateError};

/// One output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Output path relative to the output root.
    pub path: String,
    /// Stored path of the template it came from.
    pub asset: String,
    pub contents: String,
    /// Set when the formatter rejected the text; `contents` is then unformatted.
    pub format_error: Option<FormatError>,
}

/// Result of a generation run, ordered by stored asset path.
#[derive(Debug, Clone, Default)]
pub struct Generated {
    pub files: Vec<GeneratedFile>,
    pub diagnostics: Diagnostics,
}

impl Generated {
    /// `(path, contents)` pairs, the shape protoc plugin responses take.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.files
            .into_iter()
            .map(|f| (f.path, f.contents))
            .collect()
    }
}

fn lower(value: String) -> String {
    value.to_lowercase()
}

fn lower_first(value: String) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn snake(value: String) -> String {
    value.to_snake_case()
}

fn pascal(value: String) -> String {
    value.to_upper_camel_case()
}

fn rust_ident(value: String) -> String {
    crate::ast::rust_ident(&value)
}

/// The template environment: strict undefined handling and only the
/// `lower`, `lower_first`, `snake`, `pascal` and `rust_ident` filters.
#[must_use]
pub fn environment() -> Environment<'static> {
    let mut env = Environment::empty();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("lower", lower);
    env.add_filter("lower_first", lower_first);
    env.add_filter("snake", snake);
    env.add_filter("pascal", pascal);
    env.add_filter("rust_ident", rust_ident);
    env
}

fn render(
    env: &Environment<'_>,
    asset: &TemplateAsset,
    ctx: &GenerationContext,
) -> Result<String, GenerateError> {
    let failed = |cause: String| GenerateError::TemplateExecution {
        asset: asset.stored_path.clone(),
        cause,
    };
    let source = std::str::from_utf8(&asset.raw)
        .map_err(|e| failed(format!("template is not valid UTF-8: {e}")))?;
    env.render_named_str(&asset.stored_path, source, ctx)
        .map_err(|e| {
            let mut cause = e.to_string();
            if let Some(detail) = e.detail() {
                cause = format!("{cause}: {detail}");
            }
            failed(cause)
        })
}

/// Render every asset against `ctx` and format the results.
///
/// Assets render in parallel; the output is ordered by stored path whatever
/// the completion order, and when several assets fail the first one in that
/// order is reported. Formatter failures keep the unformatted text and are
/// recorded as diagnostics.
///
/// # Errors
///
/// [`GenerateError::TemplateExecution`] for any template failure and
/// [`GenerateError::OutputCollision`] when two assets map to one path.
pub fn generate(
    assets: &[TemplateAsset],
    ctx: &GenerationContext,
    formatter: &dyn Formatter,
) -> Result<Generated, GenerateError> {
    let mut ordered: Vec<&TemplateAsset> = assets.iter().collect();
    ordered.sort_by(|a, b| a.stored_path.cmp(&b.stored_path));

    let env = environment();
    let rendered: Vec<Result<(String, String, Option<FormatError>), GenerateError>> = ordered
        .par_iter()
        .map(|asset| -> Result<_, GenerateError> {
            let text = render(&env, asset, ctx)?;
            let path = map_path(&asset.stored_path, &ctx.service_name);
            let (contents, format_error) = match formatter.format(&path, &text) {
                Ok(formatted) => (formatted, None),
                Err(err) => (text, Some(err)),
            };
            Ok((path, contents, format_error))
        })
        .collect();

    let mut generated = Generated::default();
    let mut claimed: BTreeMap<String, String> = BTreeMap::new();
    for (asset, result) in ordered.iter().zip(rendered) {
        let (path, contents, format_error) = result?;
        if let Some(first) = claimed.insert(path.clone(), asset.stored_path.clone()) {
            return Err(GenerateError::OutputCollision {
                path,
                first,
                second: asset.stored_path.clone(),
            });
        }
        if let Some(err) = &format_error {
            generated.diagnostics.warn(
                Stage::Format,
                Some(&path),
                &[],
                format!("emitting unformatted output: {}", err.message),
            );
        }
        debug!(asset = %asset.stored_path, path = %path, bytes = contents.len(), "Asset rendered");
        generated.files.push(GeneratedFile {
            path,
            asset: asset.stored_path.clone(),
            contents,
            format_error,
        });
    }

    info!(
        service = %ctx.service.full_name,
        files = generated.files.len(),
        unformatted = generated.files.iter().filter(|f| f.format_error.is_some()).count(),
        "Generation complete"
    );
    Ok(generated)
}

use tracing::debug;

use crate::error::FormatError;

/// Canonical formatting of one generated file.
pub trait Formatter: Send + Sync {
    /// Return the cleaned text for `path`.
    ///
    /// # Errors
    ///
    /// [`FormatError`] when `text` does not parse as the language `path` implies.
    fn format(&self, path: &str, text: &str) -> Result<String, FormatError>;
}

/// Dispatches on the output file's extension.
///
/// - `.rs`: parsed with `syn` and printed with `prettyplease`
/// - `.toml`: validated with `toml`; the text is kept with one trailing newline
/// - anything else: unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn format(&self, path: &str, text: &str) -> Result<String, FormatError> {
        let failed = |message: String| FormatError {
            path: path.to_string(),
            message,
        };
        match path.rsplit_once('.').map(|(_, ext)| ext) {
            Some("rs") => {
                let file = syn::parse_file(text).map_err(|e| failed(e.to_string()))?;
                debug!(path, "Rust output formatted");
                Ok(prettyplease::unparse(&file))
            }
            Some("toml") => {
                toml::from_str::<toml::Table>(text).map_err(|e| failed(e.to_string()))?;
                Ok(format!("{}\n", text.trim_end()))
            }
            _ => Ok(text.to_string()),
        }
    }
}

/// Leaves every file as rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFormatter;

impl Formatter for IdentityFormatter {
    fn format(&self, _path: &str, text: &str) -> Result<String, FormatError> {
        Ok(text.to_string())
    }
}

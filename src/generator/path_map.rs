//! Stored template path → output path.

/// Token replaced by the service name in stored paths.
pub const NAME_TOKEN: &str = "NAME";
/// Marker suffix of template files.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";
/// Suffix of the directory whose content is hoisted to the output root.
pub const HOIST_SUFFIX: &str = "-service";

/// Map a stored template path to the output path for `service`.
///
/// In order: every [`NAME_TOKEN`] becomes `service`, a trailing
/// [`TEMPLATE_SUFFIX`] is dropped, a leading version segment (`v1/`,
/// `v2beta/`) is dropped, and a leading `<service>-service/` directory is
/// dropped. Anything that does not match passes through unchanged, so mapping
/// an already mapped path returns it as is.
///
/// ```rust
/// use svcgen::generator::map_path;
///
/// assert_eq!(map_path("v1/NAME-service/src/lib.rs.tmpl", "calculator"), "src/lib.rs");
/// assert_eq!(map_path("v1/docs/NAME.md.tmpl", "calculator"), "docs/calculator.md");
/// assert_eq!(map_path("src/lib.rs", "calculator"), "src/lib.rs");
/// ```
#[must_use]
pub fn map_path(stored: &str, service: &str) -> String {
    let replaced = stored.replace(NAME_TOKEN, service);
    let trimmed = replaced
        .strip_suffix(TEMPLATE_SUFFIX)
        .unwrap_or(&replaced);
    let unversioned = match trimmed.split_once('/') {
        Some((first, rest)) if is_version_segment(first) => rest,
        _ => trimmed,
    };
    let hoist = format!("{service}{HOIST_SUFFIX}/");
    unversioned
        .strip_prefix(hoist.as_str())
        .unwrap_or(unversioned)
        .to_string()
}

/// `v` followed by at least one digit, then any ASCII alphanumerics.
fn is_version_segment(segment: &str) -> bool {
    let Some(rest) = segment.strip_prefix('v') else {
        return false;
    };
    rest.starts_with(|c: char| c.is_ascii_digit()) && rest.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_mapping() {
        assert_eq!(
            map_path("v1/NAME-service/Cargo.toml.tmpl", "calculator"),
            "Cargo.toml"
        );
        assert_eq!(
            map_path("v1/NAME-service/src/svc/mod.rs.tmpl", "calculator"),
            "src/svc/mod.rs"
        );
    }

    #[test]
    fn test_every_token_replaced() {
        assert_eq!(
            map_path("v2/NAME-service/NAME/NAME.rs", "echo"),
            "echo/echo.rs"
        );
    }

    #[test]
    fn test_unmatched_parts_pass_through() {
        assert_eq!(map_path("README.md", "calc"), "README.md");
        assert_eq!(map_path("vendor/a.rs.tmpl", "calc"), "vendor/a.rs");
        assert_eq!(map_path("v1/other-service/a.rs", "calc"), "other-service/a.rs");
        assert_eq!(map_path("v1", "calc"), "v1");
    }

    #[test]
    fn test_version_segment_shapes() {
        assert!(is_version_segment("v1"));
        assert!(is_version_segment("v2beta1"));
        assert!(!is_version_segment("v"));
        assert!(!is_version_segment("vendor"));
        assert!(!is_version_segment("src"));
    }

    #[test]
    fn test_idempotent() {
        for stored in [
            "v1/NAME-service/src/lib.rs.tmpl",
            "v1/docs/NAME.md.tmpl",
            "v3alpha/NAME-service/Cargo.toml.tmpl",
            "plain.txt",
        ] {
            let once = map_path(stored, "calculator");
            assert_eq!(map_path(&once, "calculator"), once, "{stored}");
        }
    }
}

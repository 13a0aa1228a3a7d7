use std::collections::BTreeMap;

/// Flatten multi-valued query parameters to `name → first value`.
///
/// Repeated parameters lose every value after the first, so
/// `?tag=a&tag=b` decodes to `{"tag": "a"}`. Repeated request fields are not
/// reconstructed from the query string.
pub fn query_params<I, K, V>(pairs: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut out = BTreeMap::new();
    for (key, value) in pairs {
        out.entry(key.into()).or_insert_with(|| value.into());
    }
    out
}

/// Decode a raw query string (with or without the leading `?`) and flatten it
/// with [`query_params`].
#[must_use]
pub fn parse_query(raw: &str) -> BTreeMap<String, String> {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    query_params(
        url::form_urlencoded::parse(raw.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned())),
    )
}

use std::collections::BTreeMap;

/// Placeholder positions of one URL template.
///
/// Maps each placeholder name to its zero-based index in the `/`-split
/// template. A leading `/` produces an empty first segment, so in
/// `/v1/{id}` the placeholder `id` sits at position 2.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathIndex {
    template: String,
    segments: usize,
    positions: BTreeMap<String, usize>,
}

impl PathIndex {
    /// Parse a template.
    ///
    /// Every segment containing `{` or `}` is treated as a placeholder; both
    /// brace characters are stripped wherever they appear, balanced or not.
    /// A name that occurs twice keeps the position of its last occurrence.
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let mut positions = BTreeMap::new();
        let mut segments = 0;
        for (index, segment) in template.split('/').enumerate() {
            segments = index + 1;
            if segment.contains(['{', '}']) {
                let name = segment.replace(['{', '}'], "");
                positions.insert(name, index);
            }
        }
        Self {
            template: template.to_string(),
            segments,
            positions,
        }
    }

    /// The template this index was built from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Number of `/`-separated segments in the template.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// Position of a placeholder, if the template declares it.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Placeholders ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.positions.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Placeholder names ordered by segment position.
    #[must_use]
    pub fn names_by_position(&self) -> Vec<&str> {
        let mut names: Vec<(&str, usize)> = self.iter().collect();
        names.sort_by_key(|(_, pos)| *pos);
        names.into_iter().map(|(name, _)| name).collect()
    }
}

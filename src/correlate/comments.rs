use crate::descriptor::Location;

/// Comment text for a location: detached blocks first, then the leading comment.
///
/// Each line loses the single space protoc keeps after `//` and any trailing
/// whitespace; blocks are trimmed and joined by a blank line.
#[must_use]
pub fn clean_comment(location: &Location) -> String {
    location
        .leading_detached_comments
        .iter()
        .map(String::as_str)
        .chain(location.leading_comments.as_deref())
        .map(clean_block)
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn clean_block(raw: &str) -> String {
    raw.lines()
        .map(|line| line.strip_prefix(' ').unwrap_or(line).trim_end())
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches('\n')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_comment_is_cleaned() {
        let location = Location {
            leading_comments: Some(" Adds two numbers.\n   Keeps indent.  \n".into()),
            ..Default::default()
        };
        assert_eq!(clean_comment(&location), "Adds two numbers.\n  Keeps indent.");
    }

    #[test]
    fn test_detached_blocks_come_first() {
        let location = Location {
            leading_comments: Some(" second\n".into()),
            leading_detached_comments: vec![" first\n".into(), "   \n".into()],
            ..Default::default()
        };
        assert_eq!(clean_comment(&location), "first\n\nsecond");
    }
}

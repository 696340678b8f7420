//! Tag string handling
//!
//! Tags are stored as a single `", "`-joined string. Search treats that
//! string as opaque text, while ranking works on the individual tokens.

/// Separator used when joining tags for storage
pub const TAG_SEPARATOR: &str = ", ";

/// Split a stored tag string into tokens.
///
/// Entries are comma-separated and trimmed. Empty entries are dropped and
/// only the first occurrence of a repeated tag is kept, so the result is a
/// set that still remembers insertion order.
pub fn tokenize_tags(raw: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = Vec::new();

    for token in raw.split(',').map(str::trim) {
        if !token.is_empty() && !tokens.contains(&token) {
            tokens.push(token);
        }
    }

    tokens
}

/// Join tags into their stored form, dropping blank entries
pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(TAG_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_preserves_order() {
        assert_eq!(tokenize_tags("kimura, armbar"), vec!["kimura", "armbar"]);
        assert_eq!(tokenize_tags("kimura,setup"), vec!["kimura", "setup"]);
    }

    #[test]
    fn test_tokenize_keeps_multi_word_tags() {
        assert_eq!(
            tokenize_tags("armbar, butterfly guard"),
            vec!["armbar", "butterfly guard"]
        );
    }

    #[test]
    fn test_tokenize_drops_blanks_and_duplicates() {
        assert_eq!(tokenize_tags(" kimura ,, kimura, x ,"), vec!["kimura", "x"]);
        assert!(tokenize_tags("").is_empty());
        assert!(tokenize_tags(" , ").is_empty());
    }

    #[test]
    fn test_join_tags() {
        assert_eq!(join_tags(&["armbar", "butterfly guard"]), "armbar, butterfly guard");
        assert_eq!(join_tags(&["", " kimura "]), "kimura");
        assert_eq!(join_tags::<&str>(&[]), "");
    }
}

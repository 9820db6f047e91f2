/// Punctuation ignored when comparing words
const IGNORED_PUNCTUATION: [char; 5] = [',', '.', ';', '?', '!'];

/// Canonical comparison key for a word token
///
/// Drops every `, . ; ? !` (wherever it appears) and lowercases. Only used
/// for matching; callers keep the display text as written.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !IGNORED_PUNCTUATION.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether two tokens are the same word (exact equality after normalization)
pub fn same_word(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_punctuation() {
        assert_eq!(normalize("star,"), "star");
        assert_eq!(normalize("are!"), "are");
        assert_eq!(normalize("high;"), "high");
        assert_eq!(normalize("why?"), "why");
        assert_eq!(normalize("sky."), "sky");
    }

    #[test]
    fn test_normalize_strips_embedded_punctuation_and_lowercases() {
        assert_eq!(normalize("Twin.kle"), "twinkle");
        assert_eq!(normalize("HELLO"), "hello");
    }

    #[test]
    fn test_normalize_keeps_other_characters() {
        // Apostrophes and parentheses are part of the word
        assert_eq!(normalize("Let's"), "let's");
        assert_eq!(normalize("(Instrumental"), "(instrumental");
    }

    #[test]
    fn test_normalize_is_total() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(",.;?!"), "");
    }

    #[test]
    fn test_same_word() {
        assert!(same_word("Star,", "star"));
        assert!(!same_word("star", "stars"));
    }
}

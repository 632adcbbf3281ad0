use globset::{GlobBuilder, GlobMatcher};

/// A compiled Redis-style key pattern: `*`, `?`, `[abc]`, `[a-z]`, `[^a]`
/// and `\` escapes. `:` is an ordinary character.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    matcher: GlobMatcher,
}

impl KeyPattern {
    pub fn new(pattern: &str) -> Result<Self, globset::Error> {
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(false)
            .backslash_escape(true)
            .build()?
            .compile_matcher();
        Ok(Self { matcher })
    }

    pub fn is_match(&self, key: &str) -> bool {
        self.matcher.is_match(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, key: &str) -> bool {
        KeyPattern::new(pattern).unwrap().is_match(key)
    }

    #[test]
    fn star_and_question_mark() {
        assert!(matches("user:*", "user:1"));
        assert!(matches("user:*", "user:1:friends"));
        assert!(matches("user:*", "user:"));
        assert!(!matches("user:*", "message:1"));
        assert!(matches("message:?", "message:7"));
        assert!(!matches("message:?", "message:17"));
        assert!(matches("*:friends", "user:42:friends"));
        assert!(matches("*", ""));
        assert!(!matches("a*b", "acbd"));
        assert!(matches("a*b*c", "aXbYbZc"));
    }

    #[test]
    fn star_crosses_path_separators() {
        assert!(matches("user:*", "user:a/b"));
        assert!(matches("message:?", "message:/"));
    }

    #[test]
    fn classes_and_escapes() {
        assert!(matches("user:[12]", "user:2"));
        assert!(!matches("user:[12]", "user:3"));
        assert!(matches("user:[0-9]", "user:5"));
        assert!(matches("user:[^0-9]", "user:x"));
        assert!(!matches("user:[^0-9]", "user:5"));
        assert!(matches(r"a\*b", "a*b"));
        assert!(!matches(r"a\*b", "axb"));
    }

    #[test]
    fn unclosed_class_is_rejected() {
        assert!(KeyPattern::new("a[b").is_err());
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// One verse of the source corpus: the payload carried by a mined block.
///
/// The field order here is the canonical serialization order. Block digests
/// hash the JSON encoding of this struct, so reordering fields changes every
/// hash in an existing chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verse {
    /// Book name, e.g. "John" or "2 Timothy". Matched case-sensitively.
    pub book: String,
    /// Chapter number within the book.
    pub chapter: u32,
    /// Verse number within the chapter.
    pub verse: u32,
    /// The verse text itself.
    pub text: String,
}

impl Verse {
    /// Create a new verse record.
    pub fn new(book: String, chapter: u32, verse: u32, text: String) -> Self {
        Self {
            book,
            chapter,
            verse,
            text,
        }
    }

    /// Exact match on the three-part lookup key.
    pub fn matches(&self, book: &str, chapter: u32, verse: u32) -> bool {
        self.book == book && self.chapter == chapter && self.verse == verse
    }
}

impl fmt::Display for Verse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{} {}",
            self.book, self.chapter, self.verse, self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reads_like_a_reference() {
        let v = Verse::new("John".into(), 3, 16, "For God so loved the world".into());
        assert_eq!(v.to_string(), "John 3:16 For God so loved the world");
    }

    #[test]
    fn canonical_json_field_order() {
        // The digest preimage depends on this exact encoding.
        let v = Verse::new("2 Timothy".into(), 3, 14, "But continue thou".into());
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(
            json,
            r#"{"book":"2 Timothy","chapter":3,"verse":14,"text":"But continue thou"}"#
        );
    }

    #[test]
    fn key_match_is_case_sensitive() {
        let v = Verse::new("John".into(), 3, 16, "".into());
        assert!(v.matches("John", 3, 16));
        assert!(!v.matches("john", 3, 16));
        assert!(!v.matches("John", 3, 17));
    }
}

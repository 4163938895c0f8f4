use crate::error::{ChainError, Result};
use crate::verse::Verse;
use log::debug;
use std::fs;
use std::path::Path;

/// Header lines the stock corpus files carry before the first verse.
pub const DEFAULT_HEADER_LINES: usize = 2;

fn malformed(line: &str) -> ChainError {
    ChainError::MalformedReference(line.to_string())
}

/// Parse one corpus line of the form `Book Chapter:Verse<ws>Text`, e.g.
/// `2 Timothy 3:14	But continue thou in the things...`.
///
/// Book names may contain spaces and leading numerals, so the chapter is
/// the last space-separated token before the first colon. The verse number
/// is the digit run immediately after the colon; whatever follows, trimmed,
/// is the text. Only the first colon delimits the reference, so verse text
/// may itself contain colons.
pub fn parse_reference(line: &str) -> Result<Verse> {
    let (reference, rest) = line.split_once(':').ok_or_else(|| malformed(line))?;
    let (book, chapter) = reference.rsplit_once(' ').ok_or_else(|| malformed(line))?;

    let book = book.trim();
    if book.is_empty() {
        return Err(malformed(line));
    }
    let chapter: u32 = chapter.parse().map_err(|_| malformed(line))?;

    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (verse, text) = rest.split_at(digits);
    let verse: u32 = verse.parse().map_err(|_| malformed(line))?;

    Ok(Verse::new(
        book.to_string(),
        chapter,
        verse,
        text.trim().to_string(),
    ))
}

/// Read an ordered verse corpus from a text file: one verse per line,
/// skipping `skip_header` lines at the top and any blank lines. The order
/// of the returned verses is the chain's append order.
pub fn read_corpus(path: &Path, skip_header: usize) -> Result<Vec<Verse>> {
    let content = fs::read_to_string(path)?;
    let mut verses = Vec::new();
    for line in content.lines().skip(skip_header) {
        if line.trim().is_empty() {
            continue;
        }
        verses.push(parse_reference(line)?);
    }
    debug!("read {} verses from {}", verses.len(), path.display());
    Ok(verses)
}

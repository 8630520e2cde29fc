use once_cell::sync::Lazy;
use regex::Regex;

/// Fragments of this many characters or fewer are dropped.
pub const MIN_FRAGMENT_CHARS: usize = 2;

// Sentence punctuation followed by whitespace, or a run of line breaks.
static BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+|[\r\n]+").unwrap());

/// Splits text into trimmed sentence fragments.
///
/// A fragment ends after `.`, `!` or `?` when whitespace follows, or at any
/// run of line breaks. The punctuation stays with the fragment it closes.
/// Fragments of two characters or fewer are discarded, so the result may be
/// empty for very short input.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start = 0;

    for boundary in BOUNDARY_RE.find_iter(text) {
        let closes_with_punctuation = boundary
            .as_str()
            .starts_with(|c: char| matches!(c, '.' | '!' | '?'));
        let end = if closes_with_punctuation {
            boundary.start() + 1
        } else {
            boundary.start()
        };
        push_fragment(&mut fragments, &text[start..end]);
        start = boundary.end();
    }
    push_fragment(&mut fragments, &text[start..]);

    fragments
}

fn push_fragment<'a>(fragments: &mut Vec<&'a str>, raw: &'a str) {
    let trimmed = raw.trim();
    if trimmed.chars().count() > MIN_FRAGMENT_CHARS {
        fragments.push(trimmed);
    }
}

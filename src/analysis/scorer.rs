//! Lexicon scoring of a single text fragment.
//!
//! Each lexicon term is searched for left to right without overlapping
//! itself. A hit is filtered by a word-boundary check for short terms, then
//! either counted negatively (when a negator precedes it in the same clause)
//! or scaled by an amplifier / dampener found just before it.

use super::lexicon::{Category, Lexicon, ToneTables};
use std::ops::{Index, IndexMut};

pub const NEGATION_WINDOW_CHARS: usize = 50;
pub const NEGATION_WINDOW_WORDS: usize = 5;
/// Fraction of the entry weight subtracted for a negated hit.
pub const NEGATION_PENALTY: f64 = 0.4;
pub const MODIFIER_WINDOW_CHARS: usize = 30;
pub const MODIFIER_WINDOW_WORDS: usize = 2;
/// Single-word terms up to this length must match on word boundaries.
pub const BOUNDARY_TERM_MAX_CHARS: usize = 4;

/// One score per [`Category`], indexed by category.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryScores {
    values: [f64; 6],
}

impl CategoryScores {
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.values[c.index()]))
    }
}

impl Index<Category> for CategoryScores {
    type Output = f64;

    fn index(&self, category: Category) -> &f64 {
        &self.values[category.index()]
    }
}

impl IndexMut<Category> for CategoryScores {
    fn index_mut(&mut self, category: Category) -> &mut f64 {
        &mut self.values[category.index()]
    }
}

/// Lowercases and folds typographic apostrophes so "can’t" matches "can't".
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}

/// Scores a fragment against every lexicon in `tables`.
pub fn score_fragment(text: &str, tables: &ToneTables) -> CategoryScores {
    let lower = normalize(text);
    let mut scores = CategoryScores::default();
    for lexicon in tables.lexicons() {
        scores[lexicon.category()] = score_normalized(&lower, lexicon, tables);
    }
    scores
}

/// Scores a fragment against one lexicon. Never negative.
pub fn score_category(text: &str, lexicon: &Lexicon, tables: &ToneTables) -> f64 {
    score_normalized(&normalize(text), lexicon, tables)
}

fn score_normalized(lower: &str, lexicon: &Lexicon, tables: &ToneTables) -> f64 {
    let mut score = 0.0;

    for entry in lexicon.entries() {
        let term = entry.term.as_str();
        let Some(first_char) = term.chars().next() else {
            continue;
        };
        let bounded = needs_word_boundary(term);
        let mut search_from = 0;

        while let Some(offset) = lower[search_from..].find(term) {
            let idx = search_from + offset;
            let end = idx + term.len();

            if bounded && !on_word_boundaries(lower, idx, end) {
                search_from = idx + first_char.len_utf8();
                continue;
            }

            if is_negated(lower, idx, tables) {
                score -= NEGATION_PENALTY * entry.weight;
            } else {
                score += entry.weight * intensity_multiplier(lower, idx, tables);
            }
            search_from = end;
        }
    }

    score.max(0.0)
}

fn needs_word_boundary(term: &str) -> bool {
    term.chars().count() <= BOUNDARY_TERM_MAX_CHARS && !term.contains(char::is_whitespace)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn on_word_boundaries(lower: &str, start: usize, end: usize) -> bool {
    let before = lower[..start].chars().next_back();
    let after = lower[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// The last `n` characters of `s`.
fn tail_chars(s: &str, n: usize) -> &str {
    match s.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((i, _)) => &s[i..],
        None => s,
    }
}

fn is_negated(lower: &str, idx: usize, tables: &ToneTables) -> bool {
    let window = tail_chars(&lower[..idx], NEGATION_WINDOW_CHARS);
    // Clause punctuation closes the scope of an earlier negator.
    let scope = match window.rfind([',', '.', ';']) {
        Some(p) => &window[p + 1..],
        None => window,
    };
    let words: Vec<&str> = scope.split_whitespace().collect();
    let skip = words.len().saturating_sub(NEGATION_WINDOW_WORDS);
    words[skip..].iter().any(|w| tables.is_negator(bare_word(w)))
}

/// Strips surrounding punctuation such as quotes, brackets or emphasis marks.
fn bare_word(word: &str) -> &str {
    word.trim_matches(|c: char| !(c.is_alphanumeric() || c == '\''))
}

fn intensity_multiplier(lower: &str, idx: usize, tables: &ToneTables) -> f64 {
    let window = tail_chars(&lower[..idx], MODIFIER_WINDOW_CHARS);
    let words: Vec<&str> = window
        .split_whitespace()
        .map(bare_word)
        .filter(|w| !w.is_empty())
        .collect();
    let skip = words.len().saturating_sub(MODIFIER_WINDOW_WORDS);
    let preceding = &words[skip..];

    let Some(&last) = preceding.last() else {
        return 1.0;
    };
    let joined = (preceding.len() == MODIFIER_WINDOW_WORDS).then(|| preceding.join(" "));
    let candidates: Vec<&str> = joined.as_deref().into_iter().chain([last]).collect();

    candidates
        .iter()
        .find_map(|c| tables.dampener(c))
        .or_else(|| candidates.iter().find_map(|c| tables.amplifier(c)))
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lexicon::LexiconEntry;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn apologetic(text: &str) -> f64 {
        let tables = ToneTables::builtin();
        score_category(text, tables.lexicon(Category::Apologetic), tables)
    }

    fn urgent(text: &str) -> f64 {
        let tables = ToneTables::builtin();
        score_category(text, tables.lexicon(Category::Urgent), tables)
    }

    #[test]
    fn negation_lowers_the_score() {
        let plain = apologetic("I am sorry");
        let negated = apologetic("I am not sorry");
        assert!(close(plain, 1.0));
        assert!(negated < plain);
        assert_eq!(negated, 0.0);
    }

    #[test]
    fn negated_hits_offset_positive_ones() {
        // One positive hit (1.0) and one negated hit (-0.4).
        assert!(close(apologetic("Sorry about that, though I am never worried."), 0.6));
    }

    #[test]
    fn clause_punctuation_resets_negation_scope() {
        assert!(close(apologetic("Not today, sorry"), 1.0));
        assert_eq!(apologetic("Not really sorry"), 0.0);
    }

    #[test]
    fn negator_outside_five_word_window_is_ignored() {
        assert!(close(apologetic("I would not have thought you were that sorry"), 1.0));
    }

    #[test]
    fn negator_beyond_fifty_chars_is_ignored() {
        // Only four words sit between "not" and the hit, but they span more than 50 chars.
        let text = "I am not extraordinarily overwhelmingly unquestionably incomprehensibly sorry";
        assert!(close(apologetic(text), 1.0));
        assert_eq!(apologetic("I am not extraordinarily sorry"), 0.0);
    }

    #[test]
    fn modifier_beyond_thirty_chars_is_ignored() {
        let far = format!("I am very{}sorry", " ".repeat(31));
        assert!(close(apologetic(&far), 1.0));
        let near = format!("I am very{}sorry", " ".repeat(5));
        assert!(close(apologetic(&near), 1.35));
    }

    #[test]
    fn modifiers_ignore_surrounding_punctuation() {
        assert!(close(apologetic("I am *very* sorry"), 1.35));
        assert!(close(apologetic("I am (really) sorry"), 1.3));
        assert!(close(apologetic("I am \"so very\" sorry"), 1.5));
        assert_eq!(apologetic("I am \"not\" sorry"), 0.0);
    }

    #[test]
    fn short_terms_require_word_boundaries() {
        assert_eq!(urgent("The geodesic survey"), 0.0);
        assert!(close(urgent("Need it by EOD please"), 1.0));
        assert!(close(urgent("by eod."), 1.0));
        assert_eq!(urgent("She brushed it off"), 0.0);
    }

    #[test]
    fn longer_terms_match_inside_words() {
        // "escalat" is a stem and should catch its inflections.
        assert!(close(urgent("We are escalating this"), 1.0));
    }

    #[test]
    fn repeated_term_counts_each_occurrence() {
        assert!(close(apologetic("sorry, sorry, sorry"), 3.0));
    }

    #[test]
    fn amplifiers_and_dampeners_scale_hits() {
        assert!(close(apologetic("I am very sorry"), 1.35));
        assert!(close(apologetic("I am slightly worried"), 0.6));
        assert!(close(apologetic("I'm a bit worried"), 0.65));
        assert!(close(apologetic("I am so very sorry"), 1.5));
    }

    #[test]
    fn typographic_apostrophes_are_folded() {
        assert!(close(urgent("We can\u{2019}t wait on this"), 1.3));
    }

    #[test]
    fn custom_entries_are_scored() {
        let tables = ToneTables::builtin()
            .with_entries([(Category::Urgent, LexiconEntry::with_weight("fire drill", 2.0))]);
        let lexicon = tables.lexicon(Category::Urgent);
        let score = score_category("This is a fire drill", lexicon, &tables);
        assert!(close(score, 2.0));
    }

    #[test]
    fn score_fragment_covers_every_category() {
        let scores = score_fragment("Thanks! Sorry this is urgent.", ToneTables::builtin());
        assert!(scores[Category::Warm] > 0.0);
        assert!(scores[Category::Apologetic] > 0.0);
        assert!(scores[Category::Urgent] > 0.0);
        assert_eq!(scores[Category::Automated], 0.0);
        assert_eq!(scores.iter().count(), 6);
    }
}

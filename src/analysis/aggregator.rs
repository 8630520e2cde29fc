use super::lexicon::{Category, ToneTables};
use super::scorer::{score_fragment, CategoryScores};
use crate::parsing::sentence_splitter::split_sentences;
use tracing::trace;

pub const OPENING_WEIGHT: f64 = 1.3;
pub const CLOSING_WEIGHT: f64 = 1.2;
pub const BODY_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionClass {
    Opening,
    Body,
    Closing,
}

impl PositionClass {
    /// A lone sentence counts as the opening only.
    pub fn for_index(index: usize, sentence_count: usize) -> Self {
        if index == 0 {
            PositionClass::Opening
        } else if index + 1 == sentence_count {
            PositionClass::Closing
        } else {
            PositionClass::Body
        }
    }

    pub fn weight(self) -> f64 {
        match self {
            PositionClass::Opening => OPENING_WEIGHT,
            PositionClass::Body => BODY_WEIGHT,
            PositionClass::Closing => CLOSING_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentenceScore<'a> {
    pub text: &'a str,
    pub position: PositionClass,
    pub scores: CategoryScores,
}

/// Position-weighted category totals for a whole message.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryTotals {
    pub totals: CategoryScores,
    /// Number of fragments that survived splitting. Zero when the message was
    /// too short to split and was scored whole.
    pub sentence_count: usize,
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> f64 {
        self.totals[category]
    }
}

pub fn score_sentences<'a>(sentences: &[&'a str], tables: &ToneTables) -> Vec<SentenceScore<'a>> {
    sentences
        .iter()
        .enumerate()
        .map(|(index, &text)| SentenceScore {
            text,
            position: PositionClass::for_index(index, sentences.len()),
            scores: score_fragment(text, tables),
        })
        .collect()
}

pub fn aggregate(sentence_scores: &[SentenceScore<'_>]) -> CategoryScores {
    let mut totals = CategoryScores::default();
    for sentence in sentence_scores {
        let weight = sentence.position.weight();
        for (category, score) in sentence.scores.iter() {
            totals[category] += score * weight;
        }
        trace!(
            position = ?sentence.position,
            scores = ?sentence.scores,
            text = sentence.text,
            "scored sentence"
        );
    }
    totals
}

/// Splits, scores and aggregates `text`. Input that yields no fragments is
/// scored as a single opening fragment with a sentence count of zero.
pub fn category_totals(text: &str, tables: &ToneTables) -> CategoryTotals {
    let sentences = split_sentences(text);
    let sentence_count = sentences.len();
    let sentence_scores = if sentences.is_empty() {
        score_sentences(&[text], tables)
    } else {
        score_sentences(&sentences, tables)
    };
    CategoryTotals {
        totals: aggregate(&sentence_scores),
        sentence_count,
    }
}

//! Blends category totals and punctuation signals into one score per tone,
//! picks the winner and derives a confidence from its lead.

use super::lexicon::Category;
use super::scorer::CategoryScores;
use super::signals::{Signals, StructureFlags};
use crate::types::tone_data::ToneLabel;
use std::cmp::Ordering;

/// Above this, an emotional category suppresses the structural bonus.
pub const STRONG_EMOTION_THRESHOLD: f64 = 1.2;
pub const CALM_BASELINE: f64 = 0.35;
pub const LONG_SENTENCE_CHARS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneScore {
    pub tone: ToneLabel,
    pub value: f64,
}

/// Every tone's score, sorted best first.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneScoreCard {
    entries: Vec<ToneScore>,
}

impl ToneScoreCard {
    pub fn build(totals: &CategoryScores, signals: &Signals, structure: &StructureFlags) -> Self {
        let urgent = totals[Category::Urgent];
        let apologetic = totals[Category::Apologetic];
        let warm = totals[Category::Warm];
        let calm = totals[Category::Calm];
        let sad = totals[Category::Sad];
        let automated = totals[Category::Automated];

        let emotional_peak = urgent.max(apologetic).max(warm).max(sad);
        let bonus = if emotional_peak > STRONG_EMOTION_THRESHOLD {
            0.0
        } else {
            structural_bonus(signals, structure)
        };

        let mut entries: Vec<ToneScore> = ToneLabel::ALL
            .into_iter()
            .map(|tone| {
                let value = match tone {
                    ToneLabel::UrgentTense => {
                        urgent * 1.25 + signals.exclamation_density * 1.6 + signals.caps_ratio * 1.8
                    }
                    ToneLabel::ApologeticAnxious => {
                        apologetic * 1.2 + signals.ellipsis_density * 0.5
                    }
                    ToneLabel::WarmPositive => {
                        let excited = signals.exclamation_density > 0.0 && warm > 0.0;
                        let excited = if excited { 0.4 } else { 0.0 };
                        warm * 1.15 + excited
                    }
                    ToneLabel::CalmProfessional => calm + bonus + CALM_BASELINE,
                    ToneLabel::SadConcerned => sad * 1.2 + signals.ellipsis_density * 0.3,
                    ToneLabel::NeutralAutomated => {
                        let sustained = if automated >= 2.0 { 0.5 } else { 0.0 };
                        automated * 1.4 + sustained
                    }
                };
                ToneScore { tone, value }
            })
            .collect();

        // Stable sort keeps score-card order between exact ties.
        entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        ToneScoreCard { entries }
    }

    pub fn entries(&self) -> &[ToneScore] {
        &self.entries
    }

    pub fn top(&self) -> ToneScore {
        self.entries[0]
    }

    pub fn runner_up(&self) -> ToneScore {
        self.entries[1]
    }

    pub fn score_of(&self, tone: ToneLabel) -> f64 {
        self.entries
            .iter()
            .find(|s| s.tone == tone)
            .map_or(0.0, |s| s.value)
    }

    pub fn gap(&self) -> f64 {
        self.top().value - self.runner_up().value
    }
}

fn structural_bonus(signals: &Signals, structure: &StructureFlags) -> f64 {
    let mut bonus = 0.0;
    if structure.has_greeting {
        bonus += 0.25;
    }
    if structure.has_sign_off {
        bonus += 0.25;
    }
    if signals.avg_sentence_len > LONG_SENTENCE_CHARS {
        bonus += 0.2;
    }
    bonus
}

pub fn confidence(card: &ToneScoreCard, sentence_count: usize) -> f64 {
    let top = card.top().value;
    let length_term = (sentence_count as f64 * 0.02).clamp(0.0, 1.0);
    (0.45 + card.gap() * 0.09 + (top * 0.04).min(0.22) + length_term).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToneSelection {
    pub tone: ToneLabel,
    pub confidence: f64,
    pub card: ToneScoreCard,
}

pub fn select_tone(
    totals: &CategoryScores,
    signals: &Signals,
    structure: &StructureFlags,
    sentence_count: usize,
) -> ToneSelection {
    let card = ToneScoreCard::build(totals, signals, structure);
    ToneSelection {
        tone: card.top().tone,
        confidence: confidence(&card, sentence_count),
        card,
    }
}

use super::lexicon::Category;
use super::scorer::CategoryScores;
use super::signals::{Signals, StructureFlags};
use crate::types::tone_data::{EmotionScore, ToneLabel};

/// Category totals above this earn the stronger wording.
pub const STRONG_CATEGORY_TOTAL: f64 = 3.0;
/// Emotions at or below this intensity are left out of the breakdown.
pub const EMOTION_FLOOR: f64 = 0.06;
/// Messages longer than this read as more formal.
const FORMAL_LENGTH_CHARS: usize = 80;

/// Everything the explanation and emotion breakdown draw on.
#[derive(Debug, Clone, Copy)]
pub struct Evidence<'a> {
    pub totals: &'a CategoryScores,
    pub signals: &'a Signals,
    pub structure: &'a StructureFlags,
    pub text_len: usize,
}

pub fn explain(tone: ToneLabel, evidence: &Evidence<'_>) -> String {
    let totals = evidence.totals;
    let signals = evidence.signals;
    let structure = evidence.structure;

    let text = match tone {
        ToneLabel::UrgentTense => {
            if signals.caps_ratio > 0.3 {
                "Urgency language and emphasized capitalization detected."
            } else if totals[Category::Urgent] > STRONG_CATEGORY_TOTAL {
                "Repeated urgency markers and time-pressure phrasing detected."
            } else if signals.exclamation_density > 0.5 {
                "Urgent wording reinforced by heavy exclamation use."
            } else {
                "Language suggests urgency and time pressure."
            }
        }
        ToneLabel::ApologeticAnxious => {
            if totals[Category::Apologetic] > STRONG_CATEGORY_TOTAL {
                "Multiple apology or anxiety markers found."
            } else if signals.ellipsis_density > 0.3 {
                "Apologetic phrasing with hesitant, trailing punctuation."
            } else {
                "Wording contains apologetic or anxious phrasing."
            }
        }
        ToneLabel::WarmPositive => {
            if totals[Category::Warm] > STRONG_CATEGORY_TOTAL {
                "Strong appreciation and positive sentiment throughout."
            } else {
                "Text includes appreciation and positive intent."
            }
        }
        ToneLabel::CalmProfessional => {
            if totals[Category::Calm] > STRONG_CATEGORY_TOTAL {
                "Consistently measured, task-oriented wording."
            } else if structure.has_greeting && structure.has_sign_off {
                "Measured wording framed by a conventional greeting and sign-off."
            } else if structure.is_short {
                "Brief, neutral wording with no strong emotional markers."
            } else {
                "Wording is measured, structured, and task-oriented."
            }
        }
        ToneLabel::SadConcerned => {
            if totals[Category::Sad] > STRONG_CATEGORY_TOTAL {
                "Multiple indicators of sadness, concern, or bad news."
            } else {
                "Text contains concern or negative emotional framing."
            }
        }
        ToneLabel::NeutralAutomated => {
            if totals[Category::Automated] > STRONG_CATEGORY_TOTAL {
                "Automated/system-generated email patterns detected."
            } else if structure.has_forwarded {
                "Forwarded content with little emotional signal of its own."
            } else {
                "Low emotional signal; likely informational or transactional."
            }
        }
    };
    text.to_string()
}

/// Named emotion intensities in fixed order, keeping only those above the floor.
pub fn emotions(evidence: &Evidence<'_>) -> Vec<EmotionScore> {
    let totals = evidence.totals;
    let signals = evidence.signals;
    let formal_length = if evidence.text_len > FORMAL_LENGTH_CHARS { 0.15 } else { 0.0 };

    let breakdown = [
        ("urgency", totals[Category::Urgent] * 0.18 + signals.caps_ratio * 0.15),
        ("warmth", totals[Category::Warm] * 0.16),
        ("anxiety", totals[Category::Apologetic] * 0.18 + signals.ellipsis_density * 0.1),
        ("concern", totals[Category::Sad] * 0.18),
        ("professionalism", totals[Category::Calm] * 0.12 + formal_length),
        ("stress", signals.exclamation_density * 0.3 + signals.caps_ratio * 0.25),
    ];

    breakdown
        .into_iter()
        .map(|(name, raw)| (name, raw.clamp(0.0, 1.0)))
        .filter(|&(_, intensity)| intensity > EMOTION_FLOOR)
        .map(|(name, intensity)| EmotionScore {
            name: name.to_string(),
            intensity,
        })
        .collect()
}

//! Rule-based rewording toward a requested tone.
//!
//! The rewriter only needs the detected label of the draft; everything else
//! is plain regex substitution.

use crate::analysis::ToneAnalyzer;
use crate::types::tone_data::{RewriteResponse, ToneLabel};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

fn rule(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

static SOFTENERS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (rule(r"(?i)\bASAP\b"), "as soon as possible"),
        (rule(r"(?i)\bmust\b"), "could"),
        (rule(r"(?i)\byou need to\b"), "could you"),
        (rule(r"(?i)\bwhy didn't you\b"), "could you help me understand why"),
        (rule(r"(?i)\bthis is unacceptable\b"), "this is concerning"),
        (rule(r"(?i)\bI need this now\b"), "I would appreciate a quick turnaround"),
    ]
});

static GREETING_RE: Lazy<Regex> = Lazy::new(|| rule(r"(?i)^(hi|hello|hey)\b"));
static THANKS_RE: Lazy<Regex> = Lazy::new(|| rule(r"(?i)\bthanks\b|\bthank you\b"));
static FIRST_PERSON_RE: Lazy<Regex> = Lazy::new(|| rule(r"\bI\b"));
static EXCLAMATION_RE: Lazy<Regex> = Lazy::new(|| rule(r"!+"));
static SPACED_EXCLAMATION_RE: Lazy<Regex> = Lazy::new(|| rule(r"\s*!+"));
static NOW_RE: Lazy<Regex> = Lazy::new(|| rule(r"(?i)\bnow\b"));
static SENTENCE_START_RE: Lazy<Regex> = Lazy::new(|| rule(r"(^|[.!?]\s+)([a-z])"));

pub const WARM_GREETING: &str = "Hi,\n\n";
pub const WARM_THANKS: &str = "\n\nThanks for your help.";

/// Softens directive and demanding phrasing.
pub fn soften(text: &str) -> String {
    SOFTENERS
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}

/// Adds a greeting and a thank-you line when they are missing.
pub fn add_warmth(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let mut result = trimmed.to_string();
    if !GREETING_RE.is_match(trimmed) {
        result = format!("{WARM_GREETING}{result}");
    }
    if !THANKS_RE.is_match(trimmed) {
        result.push_str(WARM_THANKS);
    }
    result
}

fn neutralize(text: &str) -> String {
    let impersonal = FIRST_PERSON_RE.replace_all(text, "We");
    EXCLAMATION_RE.replace_all(&impersonal, ".").into_owned()
}

fn calm_urgency(text: &str) -> String {
    let no_exclamations = SPACED_EXCLAMATION_RE.replace_all(text, ".");
    NOW_RE.replace_all(&no_exclamations, "soon").into_owned()
}

/// Uppercases the first letter of the text and of every following sentence.
pub fn capitalize_sentences(text: &str) -> String {
    SENTENCE_START_RE
        .replace_all(text, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned()
}

/// Rewrites a draft toward `target` (calm/professional when `None`), using the
/// built-in tables to detect the draft's current tone.
pub fn rewrite_draft(raw_text: &str, target: Option<ToneLabel>) -> RewriteResponse {
    rewrite_draft_with(&ToneAnalyzer::default(), raw_text, target)
}

pub fn rewrite_draft_with(
    analyzer: &ToneAnalyzer<'_>,
    raw_text: &str,
    target: Option<ToneLabel>,
) -> RewriteResponse {
    let original = raw_text.trim().to_string();
    if original.is_empty() {
        return RewriteResponse {
            original,
            rewritten: String::new(),
            strategy: "No text to rewrite.".to_string(),
        };
    }

    let target = target.unwrap_or(ToneLabel::CalmProfessional);
    let detected = analyzer.analyze(&original).tone_label;

    let (mut rewritten, strategy) = match target {
        ToneLabel::CalmProfessional => (
            soften(&original),
            "Softened directive language and reduced tension markers.",
        ),
        ToneLabel::WarmPositive => (
            add_warmth(&soften(&original)),
            "Added positive framing and appreciation language.",
        ),
        ToneLabel::NeutralAutomated => (
            neutralize(&original),
            "Reduced personal emphasis for neutral transactional tone.",
        ),
        ToneLabel::UrgentTense | ToneLabel::ApologeticAnxious | ToneLabel::SadConcerned => (
            original.clone(),
            "Applied minimal edits to improve readability.",
        ),
    };

    if detected == ToneLabel::UrgentTense && target != ToneLabel::UrgentTense {
        rewritten = calm_urgency(&rewritten);
    }
    rewritten = capitalize_sentences(&rewritten);

    debug!(%detected, %target, "rewrote draft");
    RewriteResponse {
        original,
        rewritten,
        strategy: strategy.to_string(),
    }
}

use super::aggregator::category_totals;
use super::explain::{emotions, explain, Evidence};
use super::lexicon::ToneTables;
use super::selector::select_tone;
use super::signals::{detect_structure, extract_signals};
use crate::types::tone_data::AnalyzeResponse;
use tracing::debug;

/// Runs the classification pipeline against a borrowed set of tables.
///
/// Holds no state of its own, so one analyzer can serve any number of
/// threads at once.
#[derive(Debug, Clone, Copy)]
pub struct ToneAnalyzer<'t> {
    tables: &'t ToneTables,
}

impl Default for ToneAnalyzer<'static> {
    fn default() -> Self {
        ToneAnalyzer::new(ToneTables::builtin())
    }
}

impl<'t> ToneAnalyzer<'t> {
    pub fn new(tables: &'t ToneTables) -> Self {
        ToneAnalyzer { tables }
    }

    pub fn analyze(&self, raw_text: &str) -> AnalyzeResponse {
        let text = raw_text.trim();
        if text.is_empty() {
            return AnalyzeResponse::empty_input();
        }

        let totals = category_totals(text, self.tables);
        let signals = extract_signals(text, totals.sentence_count);
        let structure = detect_structure(text);
        let selection = select_tone(&totals.totals, &signals, &structure, totals.sentence_count);

        let evidence = Evidence {
            totals: &totals.totals,
            signals: &signals,
            structure: &structure,
            text_len: text.chars().count(),
        };
        let response = AnalyzeResponse {
            tone_label: selection.tone,
            confidence: selection.confidence,
            explanation: explain(selection.tone, &evidence),
            emotions: emotions(&evidence),
        };

        debug!(
            tone = %response.tone_label,
            confidence = response.confidence,
            sentences = totals.sentence_count,
            runner_up = %selection.card.runner_up().tone,
            "classified message"
        );
        response
    }
}

/// Classifies `text` with the built-in tables. Empty or whitespace-only input
/// yields [`AnalyzeResponse::empty_input`].
pub fn analyze_tone(text: &str) -> AnalyzeResponse {
    ToneAnalyzer::default().analyze(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lexicon::{Category, LexiconEntry};
    use crate::types::tone_data::ToneLabel;

    #[test]
    fn blank_input_returns_the_sentinel() {
        assert_eq!(analyze_tone(""), AnalyzeResponse::empty_input());
        assert_eq!(analyze_tone(" \n\t "), AnalyzeResponse::empty_input());
    }

    #[test]
    fn custom_tables_change_the_outcome() {
        let text = "This is a fire drill. Fire drill again.";
        assert_ne!(analyze_tone(text).tone_label, ToneLabel::UrgentTense);

        let tables = ToneTables::builtin()
            .with_entries([(Category::Urgent, LexiconEntry::with_weight("fire drill", 2.0))]);
        let result = ToneAnalyzer::new(&tables).analyze(text);
        assert_eq!(result.tone_label, ToneLabel::UrgentTense);
    }

    #[test]
    fn very_short_input_still_scores() {
        let result = analyze_tone("ty!");
        assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
        let result = analyze_tone("ok");
        assert_eq!(result.tone_label, ToneLabel::CalmProfessional);
    }
}

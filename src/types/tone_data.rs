use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six fixed tone categories a message can be classified into.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToneLabel {
    UrgentTense,
    ApologeticAnxious,
    WarmPositive,
    #[default]
    CalmProfessional,
    SadConcerned,
    NeutralAutomated,
}

impl ToneLabel {
    /// Score-card order. Ties between equal scores resolve to the earlier entry.
    pub const ALL: [ToneLabel; 6] = [
        ToneLabel::UrgentTense,
        ToneLabel::ApologeticAnxious,
        ToneLabel::WarmPositive,
        ToneLabel::CalmProfessional,
        ToneLabel::SadConcerned,
        ToneLabel::NeutralAutomated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToneLabel::UrgentTense => "urgent_tense",
            ToneLabel::ApologeticAnxious => "apologetic_anxious",
            ToneLabel::WarmPositive => "warm_positive",
            ToneLabel::CalmProfessional => "calm_professional",
            ToneLabel::SadConcerned => "sad_concerned",
            ToneLabel::NeutralAutomated => "neutral_automated",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ToneLabel::UrgentTense => "Urgent / Tense",
            ToneLabel::ApologeticAnxious => "Apologetic / Anxious",
            ToneLabel::WarmPositive => "Warm / Positive",
            ToneLabel::CalmProfessional => "Calm / Professional",
            ToneLabel::SadConcerned => "Sad / Concerned",
            ToneLabel::NeutralAutomated => "Neutral / Automated",
        }
    }
}

impl fmt::Display for ToneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToneLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ToneLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown tone '{}'. Expected one of: {}",
                    s,
                    ToneLabel::ALL.map(|l| l.as_str()).join(", ")
                )
            })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmotionScore {
    pub name: String,
    pub intensity: f64,
}

/// The classification record handed back to callers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub tone_label: ToneLabel,
    pub confidence: f64,
    pub explanation: String,
    pub emotions: Vec<EmotionScore>,
}

impl AnalyzeResponse {
    /// Returned for empty or whitespace-only input.
    pub fn empty_input() -> Self {
        AnalyzeResponse {
            tone_label: ToneLabel::NeutralAutomated,
            confidence: 0.5,
            explanation: "No meaningful text to analyze.".to_string(),
            emotions: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzeMode {
    #[default]
    Incoming,
    Outgoing,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub mode: AnalyzeMode,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRequest {
    pub text: String,
    #[serde(default)]
    pub target_tone: Option<ToneLabel>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RewriteResponse {
    pub original: String,
    pub rewritten: String,
    pub strategy: String,
}

//! Static scoring tables: the six category lexicons, the negator set and the
//! intensity modifier maps.
//!
//! The built-in tables are compiled once on first use and shared read-only.
//! Custom entries go through [`ToneTables::with_entries`], which produces a
//! new owned table set instead of touching the shared one.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::warn;

/// Weight given to a single-word term when none is specified.
pub const WORD_WEIGHT: f64 = 1.0;
/// Weight given to a multi-word phrase when none is specified.
pub const PHRASE_WEIGHT: f64 = 1.3;

/// The underlying signal a lexicon measures. Not the same thing as a tone label:
/// several signals can feed one tone and vice versa.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Urgent,
    Apologetic,
    Warm,
    Calm,
    Sad,
    Automated,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Urgent,
        Category::Apologetic,
        Category::Warm,
        Category::Calm,
        Category::Sad,
        Category::Automated,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Urgent => "urgent",
            Category::Apologetic => "apologetic",
            Category::Warm => "warm",
            Category::Calm => "calm",
            Category::Sad => "sad",
            Category::Automated => "automated",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexiconEntry {
    pub term: String,
    pub weight: f64,
}

impl LexiconEntry {
    /// Builds an entry with the default weight for its shape (word or phrase).
    pub fn new(term: &str) -> Self {
        let term = term.trim().to_lowercase();
        let weight = default_weight(&term);
        LexiconEntry { term, weight }
    }

    pub fn with_weight(term: &str, weight: f64) -> Self {
        LexiconEntry {
            term: term.trim().to_lowercase(),
            weight,
        }
    }

    pub fn is_phrase(&self) -> bool {
        self.term.contains(char::is_whitespace)
    }
}

pub fn default_weight(term: &str) -> f64 {
    if term.contains(char::is_whitespace) {
        PHRASE_WEIGHT
    } else {
        WORD_WEIGHT
    }
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    category: Category,
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    fn from_terms(category: Category, terms: &[(&str, Option<f64>)]) -> Self {
        let entries = terms
            .iter()
            .map(|&(term, weight)| match weight {
                Some(w) => LexiconEntry::with_weight(term, w),
                None => LexiconEntry::new(term),
            })
            .collect();
        Lexicon { category, entries }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.entries.iter().any(|e| e.term == term)
    }

    /// Replaces the weight of an existing term in place, or appends a new entry.
    /// Returns `true` when an existing entry was replaced.
    fn upsert(&mut self, entry: LexiconEntry) -> bool {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.term == entry.term) {
            existing.weight = entry.weight;
            true
        } else {
            self.entries.push(entry);
            false
        }
    }
}

macro_rules! terms {
    (@weight) => { None };
    (@weight $w:literal) => { Some($w) };
    ($($term:literal $(=> $w:literal)?),* $(,)?) => {
        &[$(($term, terms!(@weight $($w)?))),*]
    };
}

const URGENT_TERMS: &[(&str, Option<f64>)] = terms![
    "urgent", "asap", "immediately", "critical", "deadline",
    "right away", "time sensitive" => 1.4, "high priority" => 1.4,
    "as soon as possible" => 1.2, "escalat", "overdue", "behind schedule",
    "need this today" => 1.5, "need this now" => 1.5, "end of day" => 1.2,
    "rush", "expedite", "pressing", "emergency",
    "don't delay", "can't wait", "running out of time" => 1.4,
    "drop everything" => 1.5, "top priority" => 1.4, "eod", "cob",
];

const APOLOGETIC_TERMS: &[(&str, Option<f64>)] = terms![
    "sorry", "apolog", "regret", "my fault", "my mistake",
    "i take responsibility" => 1.4, "i should have" => 1.2, "forgive",
    "pardon", "please understand" => 1.2, "oversight", "miscommunication",
    "i was wrong" => 1.4, "i feel bad", "i didn't mean" => 1.2,
    "worry", "worried", "anxious", "nervous", "hesitant",
    "i hope this is okay", "i'm not sure if" => 1.1,
    "please don't be upset" => 1.4, "hope i haven't" => 1.2,
];

const WARM_TERMS: &[(&str, Option<f64>)] = terms![
    "thanks", "thank you", "appreciate", "grateful", "great job",
    "well done", "congrats", "congratulations", "fantastic",
    "wonderful", "amazing", "awesome", "excellent", "brilliant",
    "happy", "glad", "excited", "thrilled", "delighted",
    "looking forward" => 1.2, "pleasure working", "great work",
    "welcome", "cheers", "kind regards", "warmly", "best wishes",
    "you're the best" => 1.4, "really helped" => 1.2, "means a lot",
    "love it", "perfect", "superb", "kudos",
];

const CALM_TERMS: &[(&str, Option<f64>)] = terms![
    "please", "review", "summary", "update", "attached",
    "as discussed", "per our conversation", "following up",
    "for your reference", "fyi", "please see", "kindly",
    "at your convenience", "when you get a chance",
    "no rush", "not urgent", "no hurry",
    "take your time", "just a heads up" => 1.2, "gentle reminder",
    "wanted to check", "circling back", "touching base",
    "let me know", "your thoughts", "feedback", "input",
    "agenda", "action items", "next steps", "moving forward",
    "aligned", "noted", "acknowledged", "confirmed",
    "on track" => 1.2, "going smoothly", "going well" => 1.2,
    "all good" => 1.2, "sounds good", "works for me",
];

const SAD_TERMS: &[(&str, Option<f64>)] = terms![
    "unfortunate", "sadly", "sad", "concerned", "loss",
    "difficult", "afraid", "disappointed", "heartbroken",
    "i'm sorry to hear" => 1.4, "bad news", "devastating",
    "painful", "struggling", "tough time", "passed away",
    "condolences", "sympathy", "grief", "mourn",
    "deeply sorry" => 1.4, "terrible news" => 1.4, "suffer",
    "distress", "disheartened", "hopeless", "bleak",
    "hard to accept" => 1.2, "tragic", "misfortune",
    "regret to inform" => 1.4, "sorry to inform",
];

const AUTOMATED_TERMS: &[(&str, Option<f64>)] = terms![
    "do not reply" => 1.5, "noreply" => 1.5, "no-reply" => 1.5,
    "notification", "automated", "generated", "receipt",
    "unsubscribe", "subscription", "your order", "your account",
    "has been processed", "has been shipped", "tracking number",
    "verify your", "confirm your", "one-time", "passcode",
    "this is an automated" => 1.5, "terms of service",
    "privacy policy", "click here", "view in browser",
    "powered by", "sent via", "manage preferences",
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't",
    "won't", "can't", "cannot", "isn't", "aren't", "wasn't",
    "weren't", "hardly", "barely", "neither", "nor",
];

const AMPLIFIERS: &[(&str, f64)] = &[
    ("very", 1.35),
    ("really", 1.3),
    ("extremely", 1.5),
    ("so", 1.25),
    ("incredibly", 1.45),
    ("truly", 1.3),
    ("deeply", 1.35),
    ("absolutely", 1.4),
    ("totally", 1.3),
    ("highly", 1.3),
    ("super", 1.25),
    ("seriously", 1.3),
    ("so very", 1.5),
    ("very very", 1.5),
];

const DAMPENERS: &[(&str, f64)] = &[
    ("slightly", 0.6),
    ("somewhat", 0.7),
    ("mildly", 0.6),
    ("fairly", 0.8),
    ("rather", 0.85),
    ("maybe", 0.75),
    ("perhaps", 0.75),
    ("a bit", 0.65),
    ("a little", 0.65),
    ("a tad", 0.7),
    ("kind of", 0.7),
    ("sort of", 0.7),
];

static BUILTIN: Lazy<ToneTables> = Lazy::new(|| ToneTables {
    lexicons: [
        Lexicon::from_terms(Category::Urgent, URGENT_TERMS),
        Lexicon::from_terms(Category::Apologetic, APOLOGETIC_TERMS),
        Lexicon::from_terms(Category::Warm, WARM_TERMS),
        Lexicon::from_terms(Category::Calm, CALM_TERMS),
        Lexicon::from_terms(Category::Sad, SAD_TERMS),
        Lexicon::from_terms(Category::Automated, AUTOMATED_TERMS),
    ],
    negators: NEGATORS.iter().copied().collect(),
    amplifiers: AMPLIFIERS.iter().copied().collect(),
    dampeners: DAMPENERS.iter().copied().collect(),
});

/// Everything the scorer consults. Immutable once built.
#[derive(Debug, Clone)]
pub struct ToneTables {
    lexicons: [Lexicon; 6],
    negators: HashSet<&'static str>,
    amplifiers: HashMap<&'static str, f64>,
    dampeners: HashMap<&'static str, f64>,
}

impl ToneTables {
    /// The shared built-in tables.
    pub fn builtin() -> &'static ToneTables {
        &BUILTIN
    }

    /// Returns a copy of `self` extended with `entries`. A term already present
    /// in its category keeps its position and takes the new weight.
    pub fn with_entries<I>(&self, entries: I) -> ToneTables
    where
        I: IntoIterator<Item = (Category, LexiconEntry)>,
    {
        let mut tables = self.clone();
        for (category, entry) in entries {
            let term = entry.term.clone();
            if tables.lexicons[category.index()].upsert(entry) {
                warn!(%category, %term, "custom lexicon entry overrides a built-in term");
            }
        }
        tables
    }

    pub fn lexicon(&self, category: Category) -> &Lexicon {
        &self.lexicons[category.index()]
    }

    pub fn lexicons(&self) -> impl Iterator<Item = &Lexicon> {
        self.lexicons.iter()
    }

    pub fn is_negator(&self, word: &str) -> bool {
        self.negators.contains(word)
    }

    pub fn amplifier(&self, words: &str) -> Option<f64> {
        self.amplifiers.get(words).copied()
    }

    pub fn dampener(&self, words: &str) -> Option<f64> {
        self.dampeners.get(words).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lexicons_are_indexed_by_category() {
        let tables = ToneTables::builtin();
        for category in Category::ALL {
            let lexicon = tables.lexicon(category);
            assert_eq!(lexicon.category(), category);
            assert!(!lexicon.is_empty());
        }
    }

    #[test]
    fn phrases_default_heavier_than_words() {
        let urgent = ToneTables::builtin().lexicon(Category::Urgent);
        let asap = urgent.entries().iter().find(|e| e.term == "asap").unwrap();
        let right_away = urgent.entries().iter().find(|e| e.term == "right away").unwrap();
        let drop_everything = urgent
            .entries()
            .iter()
            .find(|e| e.term == "drop everything")
            .unwrap();
        assert_eq!(asap.weight, WORD_WEIGHT);
        assert_eq!(right_away.weight, PHRASE_WEIGHT);
        assert_eq!(drop_everything.weight, 1.5);
        assert!(right_away.is_phrase());
    }

    #[test]
    fn modifier_and_negator_lookups() {
        let tables = ToneTables::builtin();
        assert!(tables.is_negator("never"));
        assert!(tables.is_negator("can't"));
        assert!(!tables.is_negator("please"));
        assert_eq!(tables.amplifier("very"), Some(1.35));
        assert_eq!(tables.dampener("slightly"), Some(0.6));
        assert_eq!(tables.dampener("a bit"), Some(0.65));
        assert_eq!(tables.amplifier("slightly"), None);
    }

    #[test]
    fn with_entries_leaves_builtin_untouched() {
        let builtin = ToneTables::builtin();
        let before = builtin.lexicon(Category::Urgent).len();
        let custom = builtin.with_entries([
            (Category::Urgent, LexiconEntry::new("Fire Drill")),
            (Category::Urgent, LexiconEntry::with_weight("asap", 2.0)),
        ]);

        let urgent = custom.lexicon(Category::Urgent);
        assert_eq!(urgent.len(), before + 1);
        assert!(urgent.contains_term("fire drill"));
        let asap = urgent.entries().iter().find(|e| e.term == "asap").unwrap();
        assert_eq!(asap.weight, 2.0);
        assert_eq!(builtin.lexicon(Category::Urgent).len(), before);
    }
}

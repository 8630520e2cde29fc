pub mod lexicon;
pub mod scorer;
pub mod signals;
pub mod aggregator;
pub mod selector;
pub mod explain;
pub mod analyzer;

// Re-export the pieces callers reach for most often
pub use analyzer::{analyze_tone, ToneAnalyzer};
pub use lexicon::{Category, Lexicon, LexiconEntry, ToneTables};
pub use scorer::{score_category, CategoryScores};

//! Heuristic tone classification for short messages such as emails.
//!
//! [`analyze_tone`] maps raw text to a [`AnalyzeResponse`]: one of six tone
//! labels, a confidence, a short explanation and an emotion breakdown. The
//! classifier is a pure function of its input and a read-only set of
//! [`ToneTables`]; [`rewrite_draft`] builds on it to reword a draft toward a
//! target tone.

pub mod config;
pub mod error;
pub mod types {
    pub mod tone_data;
}
pub mod parsing;
pub mod analysis;
pub mod rewrite;
pub mod lexicon_io;
pub mod batch;

pub use analysis::{analyze_tone, ToneAnalyzer, ToneTables};
pub use error::{MailmoodError, Result};
pub use rewrite::rewrite_draft;
pub use types::tone_data::{AnalyzeResponse, EmotionScore, RewriteResponse, ToneLabel};

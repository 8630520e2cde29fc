use crate::analysis::lexicon::{Category, LexiconEntry, ToneTables};
use crate::error::{MailmoodError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct EntrySpec {
    pub term: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// On-disk shape of a custom lexicon file: one array of entries per category.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct LexiconFile {
    pub urgent: Vec<EntrySpec>,
    pub apologetic: Vec<EntrySpec>,
    pub warm: Vec<EntrySpec>,
    pub calm: Vec<EntrySpec>,
    pub sad: Vec<EntrySpec>,
    pub automated: Vec<EntrySpec>,
}

impl LexiconFile {
    /// Validates every entry and pairs it with its category.
    pub fn into_entries(self) -> Result<Vec<(Category, LexiconEntry)>> {
        let groups = [
            (Category::Urgent, self.urgent),
            (Category::Apologetic, self.apologetic),
            (Category::Warm, self.warm),
            (Category::Calm, self.calm),
            (Category::Sad, self.sad),
            (Category::Automated, self.automated),
        ];

        let mut entries = Vec::new();
        for (category, specs) in groups {
            for spec in specs {
                entries.push((category, validate(category, spec)?));
            }
        }
        Ok(entries)
    }
}

fn validate(category: Category, spec: EntrySpec) -> Result<LexiconEntry> {
    let invalid = |reason: &str| MailmoodError::InvalidLexiconEntry {
        category: category.to_string(),
        term: spec.term.clone(),
        reason: reason.to_string(),
    };

    if spec.term.trim().is_empty() {
        return Err(invalid("term is empty"));
    }
    match spec.weight {
        Some(w) if !w.is_finite() || w <= 0.0 => Err(invalid("weight must be a positive number")),
        Some(w) => Ok(LexiconEntry::with_weight(&spec.term, w)),
        None => Ok(LexiconEntry::new(&spec.term)),
    }
}

pub fn parse_lexicon_entries(
    contents: &str,
    file_path: &Path,
) -> Result<Vec<(Category, LexiconEntry)>> {
    let file: LexiconFile = toml::from_str(contents).map_err(|e| MailmoodError::LexiconParse {
        path: file_path.to_path_buf(),
        source: e,
    })?;
    file.into_entries()
}

/// Reads custom lexicon entries from a TOML file.
pub fn load_lexicon_entries(file_path: &Path) -> Result<Vec<(Category, LexiconEntry)>> {
    let contents = fs::read_to_string(file_path).map_err(|e| MailmoodError::Io {
        path: file_path.to_path_buf(),
        source: e,
    })?;
    parse_lexicon_entries(&contents, file_path)
}

/// Builds a table set from the built-in tables plus the entries in `file_path`.
pub fn load_tables(file_path: &Path) -> Result<ToneTables> {
    let entries = load_lexicon_entries(file_path)?;
    info!(path = %file_path.display(), entries = entries.len(), "loaded custom lexicon entries");
    Ok(ToneTables::builtin().with_entries(entries))
}

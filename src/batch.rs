//! JSON Lines processing for bulk mailboxes.
//!
//! Every non-blank line holds one request object. Lines that fail to parse
//! or carry no text are logged and skipped; the rest are answered in order.

use crate::analysis::ToneAnalyzer;
use crate::error::{MailmoodError, Result};
use crate::rewrite::rewrite_draft_with;
use crate::types::tone_data::{
    AnalyzeRequest, AnalyzeResponse, RewriteRequest, RewriteResponse, ToneLabel,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, warn};

/// One answered request. `index` is the zero-based line number in the input,
/// so skipped lines leave gaps instead of shifting later records.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BatchRecord<T> {
    pub index: usize,
    pub response: T,
}

trait BatchRequest: DeserializeOwned {
    fn text(&self) -> &str;
}

impl BatchRequest for AnalyzeRequest {
    fn text(&self) -> &str {
        &self.text
    }
}

impl BatchRequest for RewriteRequest {
    fn text(&self) -> &str {
        &self.text
    }
}

fn process_lines<R, Q, T, F>(
    reader: R,
    source: &Path,
    mut handle: F,
) -> Result<Vec<BatchRecord<T>>>
where
    R: BufRead,
    Q: BatchRequest,
    F: FnMut(Q) -> T,
{
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| MailmoodError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let request: Q = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(e) => {
                warn!(line = index + 1, error = %e, "skipping malformed request");
                skipped += 1;
                continue;
            }
        };
        if request.text().trim().is_empty() {
            warn!(line = index + 1, "skipping request without text");
            skipped += 1;
            continue;
        }

        records.push(BatchRecord {
            index,
            response: handle(request),
        });
    }

    info!(source = %source.display(), answered = records.len(), skipped, "batch finished");
    Ok(records)
}

/// Classifies every [`AnalyzeRequest`] line read from `reader`.
/// `source` only labels log lines and I/O errors.
pub fn analyze_lines<R: BufRead>(
    analyzer: &ToneAnalyzer<'_>,
    reader: R,
    source: &Path,
) -> Result<Vec<BatchRecord<AnalyzeResponse>>> {
    process_lines(reader, source, |request: AnalyzeRequest| {
        let response = analyzer.analyze(&request.text);
        debug!(
            mode = ?request.mode,
            tone = response.tone_label.display_name(),
            "analyzed line"
        );
        response
    })
}

/// Rewrites every [`RewriteRequest`] line read from `reader`. Requests without
/// a `targetTone` use `default_target`.
pub fn rewrite_lines<R: BufRead>(
    analyzer: &ToneAnalyzer<'_>,
    reader: R,
    source: &Path,
    default_target: ToneLabel,
) -> Result<Vec<BatchRecord<RewriteResponse>>> {
    process_lines(reader, source, |request: RewriteRequest| {
        let target = request.target_tone.unwrap_or(default_target);
        rewrite_draft_with(analyzer, &request.text, Some(target))
    })
}

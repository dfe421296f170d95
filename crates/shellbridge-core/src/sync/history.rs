//! Budgeted retrieval of recent transcript history
//!
//! History may predate any live tailing, so retrieval always re-reads the
//! transcript file in full. The budget is spent on the most recent lines
//! first; the oldest content is the first to be dropped.

use tracing::debug;

use crate::error::BridgeResult;
use crate::text::TextMeasurer;
use crate::transcript::TranscriptFile;

/// Fixed per-line overhead added to the measured cost (the newline the
/// joined result reintroduces)
const LINE_OVERHEAD: usize = 1;

/// Returns the most recent transcript span that fits a measurement budget
pub struct HistoryRetriever<'a> {
    transcript: &'a TranscriptFile,
    measurer: &'a dyn TextMeasurer,
}

impl<'a> HistoryRetriever<'a> {
    pub fn new(transcript: &'a TranscriptFile, measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            transcript,
            measurer,
        }
    }

    /// Walk the cleaned transcript newest-first, skipping purely blank
    /// lines, and accumulate lines while the running total stays within
    /// `budget`; the result is restored to chronological order and never
    /// exceeds the budget.
    pub fn get(&self, budget: usize) -> BridgeResult<String> {
        let lines = self.transcript.clean_lines()?;
        let mut kept: Vec<&str> = Vec::new();
        let mut total = 0usize;
        for line in lines.iter().rev() {
            if line.trim().is_empty() {
                continue;
            }
            let cost = self.measurer.measure(line) + LINE_OVERHEAD;
            if total + cost > budget {
                break;
            }
            kept.push(line);
            total += cost;
        }
        kept.reverse();
        debug!(lines = kept.len(), spent = total, budget, "assembled history");
        Ok(kept.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TokenEstimator;
    use std::fs;

    fn transcript_with(content: &str) -> (tempfile::TempDir, TranscriptFile) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        fs::write(&path, content).unwrap();
        (dir, TranscriptFile::from_path(path))
    }

    #[test]
    fn zero_budget_returns_empty() {
        let (_dir, transcript) = transcript_with("some\nhistory\n");
        let estimator = TokenEstimator::new();
        let history = HistoryRetriever::new(&transcript, &estimator);
        assert_eq!(history.get(0).unwrap(), "");
    }

    #[test]
    fn prefers_the_most_recent_lines() {
        let (_dir, transcript) = transcript_with("oldest line here\nmiddle\nnewest\n");
        let estimator = TokenEstimator::new();
        let history = HistoryRetriever::new(&transcript, &estimator);

        // Enough for the newest two lines but not the oldest.
        let result = history.get(6).unwrap();
        assert_eq!(result, "middle\nnewest");
    }

    #[test]
    fn skips_blank_lines_entirely() {
        let (_dir, transcript) = transcript_with("real\n\n\n   \nalso real\n\n");
        let estimator = TokenEstimator::new();
        let history = HistoryRetriever::new(&transcript, &estimator);
        assert_eq!(history.get(1024).unwrap(), "real\nalso real");
    }

    #[test]
    fn budget_for_one_line_is_enough() {
        let (_dir, transcript) = transcript_with("ignored older content\nlast\n");
        let estimator = TokenEstimator::new();
        let history = HistoryRetriever::new(&transcript, &estimator);

        let single = estimator.measure("last") + 1;
        let result = history.get(single).unwrap();
        assert_eq!(result, "last");
    }

    #[test]
    fn never_exceeds_the_budget() {
        let content = (0..50)
            .map(|i| format!("line number {i} with some padding"))
            .collect::<Vec<_>>()
            .join("\n");
        let (_dir, transcript) = transcript_with(&content);
        let estimator = TokenEstimator::new();
        let history = HistoryRetriever::new(&transcript, &estimator);

        for budget in [0, 3, 10, 57, 200] {
            let result = history.get(budget).unwrap();
            let spent: usize = result
                .split('\n')
                .filter(|l| !l.is_empty())
                .map(|l| estimator.measure(l) + 1)
                .sum();
            assert!(spent <= budget, "budget {budget} exceeded: spent {spent}");
        }
    }

    #[test]
    fn restores_chronological_order() {
        let (_dir, transcript) = transcript_with("first\nsecond\nthird\n");
        let estimator = TokenEstimator::new();
        let history = HistoryRetriever::new(&transcript, &estimator);
        assert_eq!(history.get(1024).unwrap(), "first\nsecond\nthird");
    }

    #[test]
    fn strips_escape_sequences() {
        let (_dir, transcript) = transcript_with("\x1B[31merror: bad\x1B[0m\n");
        let estimator = TokenEstimator::new();
        let history = HistoryRetriever::new(&transcript, &estimator);
        assert_eq!(history.get(1024).unwrap(), "error: bad");
    }
}

//! Derived figures for the notes report: word counts, compression and key
//! points.

use crate::{
    error::{Result, TubenotesError},
    summarizer::HierarchicalSummary,
    types::SourceInfo,
};

pub const MAX_KEY_POINTS: usize = 5;

/// Number of whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `(1 - summary / original) * 100` rounded to one decimal, ties to even.
/// Negative when the summary is longer than the original.
pub fn compression_percent(original_words: usize, summary_words: usize) -> Result<f64> {
    if original_words == 0 {
        return Err(TubenotesError::CompressionUndefined);
    }
    let ratio = 1.0 - summary_words as f64 / original_words as f64;
    Ok((ratio * 1000.0).round_ties_even() / 10.0)
}

/// Split on every literal `.` and re-append it to each non-empty trimmed
/// piece.
///
/// This is not sentence segmentation: "Dr. Smith paid 3.50" becomes
/// `["Dr.", "Smith paid 3.", "50."]`.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("{}.", s))
        .collect()
}

/// First five sentence-like pieces of the final summary.
pub fn key_points(summary: &str) -> Vec<String> {
    let mut points = split_sentences(summary);
    points.truncate(MAX_KEY_POINTS);
    points
}

#[derive(Debug, Clone)]
pub struct Report {
    pub source: SourceInfo,
    pub original_words: usize,
    pub summary_words: usize,
    pub compression_percent: f64,
    pub key_points: Vec<String>,
    pub final_summary: String,
    pub chunk_summaries: Vec<String>,
    pub original_text: String,
}

impl Report {
    pub fn build(
        source: SourceInfo,
        original_text: &str,
        summary: HierarchicalSummary,
    ) -> Result<Self> {
        let original_words = word_count(original_text);
        let summary_words = word_count(&summary.final_summary);

        Ok(Self {
            source,
            original_words,
            summary_words,
            compression_percent: compression_percent(original_words, summary_words)?,
            key_points: key_points(&summary.final_summary),
            final_summary: summary.final_summary,
            chunk_summaries: summary.chunk_summaries,
            original_text: original_text.to_string(),
        })
    }
}

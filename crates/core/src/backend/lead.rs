use async_trait::async_trait;

use crate::{
    backend::{SummarizationBackend, SummaryLengths},
    error::Result,
    report::split_sentences,
};

/// Offline extractive backend: keeps the leading sentences of the text.
///
/// `max_len` and `min_len` are read as word counts. Sentences are added whole
/// while they fit under `max_len`; if that leaves the summary below `min_len`,
/// the next sentence is cut at the word boundary that reaches `max_len`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeadBackend;

impl LeadBackend {
    pub fn lead(text: &str, lengths: SummaryLengths) -> String {
        let mut picked: Vec<String> = Vec::new();
        let mut words = 0;

        for sentence in split_sentences(text) {
            let sentence_words = sentence.split_whitespace().count();
            if words + sentence_words <= lengths.max_len {
                words += sentence_words;
                picked.push(sentence);
                continue;
            }
            if words < lengths.min_len {
                let room = lengths.max_len - words;
                let cut: Vec<&str> = sentence.split_whitespace().take(room).collect();
                if !cut.is_empty() {
                    picked.push(cut.join(" "));
                }
            }
            break;
        }

        picked.join(" ")
    }
}

#[async_trait]
impl SummarizationBackend for LeadBackend {
    fn name(&self) -> &str {
        "lead"
    }

    async fn summarize(&self, text: &str, lengths: SummaryLengths) -> Result<String> {
        Ok(Self::lead(text, lengths))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(max_len: usize, min_len: usize) -> SummaryLengths {
        SummaryLengths { max_len, min_len }
    }

    #[test]
    fn test_keeps_leading_sentences_that_fit() {
        let text = "One two three. Four five six. Seven eight nine.";
        assert_eq!(
            LeadBackend::lead(text, lengths(6, 0)),
            "One two three. Four five six."
        );
    }

    #[test]
    fn test_cuts_long_first_sentence() {
        let text = "a b c d e f g h i j. k l.";
        assert_eq!(LeadBackend::lead(text, lengths(4, 2)), "a b c d");
    }

    #[test]
    fn test_short_text_is_returned_whole() {
        assert_eq!(LeadBackend::lead("Hello world.", lengths(150, 60)), "Hello world.");
        assert_eq!(LeadBackend::lead("", lengths(150, 60)), "");
    }

    #[tokio::test]
    async fn test_summarize_never_fails() {
        let summary = LeadBackend
            .summarize("Alpha beta. Gamma delta.", SummaryLengths::CHUNK)
            .await
            .unwrap();
        assert_eq!(summary, "Alpha beta. Gamma delta.");
    }
}

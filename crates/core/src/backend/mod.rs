//! Summarization backends.
//!
//! The pipeline only needs a text-in/text-out capability with length hints.
//! Model choice, batching and hardware placement stay inside each backend.

pub mod chat;
pub mod huggingface;
pub mod lead;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::{Result, TubenotesError};

pub use chat::ChatBackend;
pub use huggingface::HuggingFaceBackend;
pub use lead::LeadBackend;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Length hints passed to a backend, in model tokens or words depending on
/// the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLengths {
    pub max_len: usize,
    pub min_len: usize,
}

impl SummaryLengths {
    /// Hints for each per-chunk call
    pub const CHUNK: SummaryLengths = SummaryLengths {
        max_len: 150,
        min_len: 60,
    };

    /// Hints for the call over the merged chunk summaries
    pub const FINAL: SummaryLengths = SummaryLengths {
        max_len: 200,
        min_len: 100,
    };

    pub fn validate(&self) -> Result<()> {
        if self.max_len == 0 {
            return Err(TubenotesError::invalid_config(
                "summary max length must be greater than 0",
            ));
        }
        if self.min_len > self.max_len {
            return Err(TubenotesError::invalid_config(format!(
                "summary min length ({}) exceeds max length ({})",
                self.min_len, self.max_len
            )));
        }
        Ok(())
    }
}

#[async_trait]
pub trait SummarizationBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn summarize(&self, text: &str, lengths: SummaryLengths) -> Result<String>;
}

#[async_trait]
impl<'a, B: SummarizationBackend + ?Sized> SummarizationBackend for &'a B {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn summarize(&self, text: &str, lengths: SummaryLengths) -> Result<String> {
        (**self).summarize(text, lengths).await
    }
}

#[async_trait]
impl<B: SummarizationBackend + ?Sized> SummarizationBackend for Arc<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn summarize(&self, text: &str, lengths: SummaryLengths) -> Result<String> {
        (**self).summarize(text, lengths).await
    }
}

#[async_trait]
impl<B: SummarizationBackend + ?Sized> SummarizationBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn summarize(&self, text: &str, lengths: SummaryLengths) -> Result<String> {
        (**self).summarize(text, lengths).await
    }
}

/// Map a non-success HTTP response onto the backend error kinds.
pub(crate) fn classify_status(
    backend: &str,
    status: StatusCode,
    body: &str,
    input_chars: usize,
) -> TubenotesError {
    let lowered = body.to_lowercase();
    let mentions_length = [
        "too long",
        "index out of range",
        "maximum context",
        "max_length",
        "sequence length",
    ]
    .iter()
    .any(|needle| lowered.contains(needle));

    match status {
        StatusCode::GATEWAY_TIMEOUT | StatusCode::REQUEST_TIMEOUT => {
            TubenotesError::BackendTimeout {
                backend: backend.to_string(),
            }
        }
        StatusCode::PAYLOAD_TOO_LARGE => TubenotesError::BackendInputTooLong {
            backend: backend.to_string(),
            chars: input_chars,
        },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY if mentions_length => {
            TubenotesError::BackendInputTooLong {
                backend: backend.to_string(),
                chars: input_chars,
            }
        }
        _ => TubenotesError::BackendUnavailable {
            backend: backend.to_string(),
            reason: format!("HTTP {}: {}", status, body.trim()),
        },
    }
}

/// Map a transport failure onto the backend error kinds.
pub(crate) fn classify_transport(backend: &str, err: reqwest::Error) -> TubenotesError {
    if err.is_timeout() {
        TubenotesError::BackendTimeout {
            backend: backend.to_string(),
        }
    } else {
        TubenotesError::BackendUnavailable {
            backend: backend.to_string(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lengths_are_valid() {
        assert!(SummaryLengths::CHUNK.validate().is_ok());
        assert!(SummaryLengths::FINAL.validate().is_ok());
    }

    #[test]
    fn test_invalid_lengths() {
        let inverted = SummaryLengths {
            max_len: 10,
            min_len: 20,
        };
        assert!(matches!(
            inverted.validate(),
            Err(TubenotesError::InvalidConfiguration { .. })
        ));

        let zero = SummaryLengths {
            max_len: 0,
            min_len: 0,
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_classify_status() {
        let err = classify_status("hf", StatusCode::SERVICE_UNAVAILABLE, "loading", 10);
        assert!(matches!(err, TubenotesError::BackendUnavailable { .. }));

        let err = classify_status("hf", StatusCode::GATEWAY_TIMEOUT, "", 10);
        assert!(matches!(err, TubenotesError::BackendTimeout { .. }));

        let err = classify_status(
            "hf",
            StatusCode::BAD_REQUEST,
            "index out of range in self",
            5000,
        );
        assert!(matches!(
            err,
            TubenotesError::BackendInputTooLong { chars: 5000, .. }
        ));

        let err = classify_status("hf", StatusCode::BAD_REQUEST, "bad json", 10);
        assert!(matches!(err, TubenotesError::BackendUnavailable { .. }));
    }
}

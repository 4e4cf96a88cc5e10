use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::{
    backend::{
        DEFAULT_TIMEOUT, SummarizationBackend, SummaryLengths, classify_status, classify_transport,
    },
    error::{Result, TubenotesError},
};

pub const DEFAULT_MODEL: &str = "facebook/bart-large-cnn";
pub const API_TOKEN_ENV: &str = "HF_API_TOKEN";

const INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

/// Abstractive summarization through the Hugging Face Inference API.
pub struct HuggingFaceBackend {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
    name: String,
}

impl HuggingFaceBackend {
    pub fn new(model: &str, api_token: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TubenotesError::BackendUnavailable {
                backend: model.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_url: format!("{}/{}", INFERENCE_URL, model),
            api_token,
            name: model.to_string(),
        })
    }

    /// Build a backend for `model` with the token taken from `HF_API_TOKEN`.
    pub fn from_env(model: Option<&str>, timeout: Option<Duration>) -> Result<Self> {
        let api_token =
            std::env::var(API_TOKEN_ENV).map_err(|_| TubenotesError::MissingApiKey {
                env_var: API_TOKEN_ENV.to_string(),
            })?;
        Self::new(
            model.unwrap_or(DEFAULT_MODEL),
            api_token,
            timeout.unwrap_or(DEFAULT_TIMEOUT),
        )
    }

    fn request_body(text: &str, lengths: SummaryLengths) -> serde_json::Value {
        serde_json::json!({
            "inputs": text,
            "parameters": {
                "max_length": lengths.max_len,
                "min_length": lengths.min_len,
                "do_sample": false,
            },
            "options": {
                "wait_for_model": true,
            },
        })
    }

    fn parse_response(&self, body: &str) -> Result<String> {
        let outputs: Vec<SummaryOutput> =
            serde_json::from_str(body).map_err(|e| TubenotesError::BackendUnavailable {
                backend: self.name.clone(),
                reason: format!("Invalid API response: {}", e),
            })?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text.trim().to_string())
            .ok_or_else(|| TubenotesError::BackendUnavailable {
                backend: self.name.clone(),
                reason: "API returned no summary".to_string(),
            })
    }
}

#[async_trait]
impl SummarizationBackend for HuggingFaceBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn summarize(&self, text: &str, lengths: SummaryLengths) -> Result<String> {
        let input_chars = text.chars().count();
        debug!(model = %self.name, input_chars, ?lengths, "hugging face summarize");

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&Self::request_body(text, lengths))
            .send()
            .await
            .map_err(|e| classify_transport(&self.name, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport(&self.name, e))?;

        if !status.is_success() {
            return Err(classify_status(&self.name, status, &body, input_chars));
        }

        self.parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> HuggingFaceBackend {
        HuggingFaceBackend::new(DEFAULT_MODEL, "token".to_string(), DEFAULT_TIMEOUT).unwrap()
    }

    #[test]
    fn test_request_body_carries_length_hints() {
        let body = HuggingFaceBackend::request_body("some text", SummaryLengths::CHUNK);

        assert_eq!(body["inputs"], "some text");
        assert_eq!(body["parameters"]["max_length"], 150);
        assert_eq!(body["parameters"]["min_length"], 60);
        assert_eq!(body["parameters"]["do_sample"], false);
    }

    #[test]
    fn test_parse_response() {
        let summary = backend()
            .parse_response(r#"[{"summary_text": " A short summary. "}]"#)
            .unwrap();
        assert_eq!(summary, "A short summary.");
    }

    #[test]
    fn test_parse_empty_response_is_unavailable() {
        let err = backend().parse_response("[]").unwrap_err();
        assert!(matches!(err, TubenotesError::BackendUnavailable { .. }));

        let err = backend()
            .parse_response(r#"{"error": "Model is loading"}"#)
            .unwrap_err();
        assert!(matches!(err, TubenotesError::BackendUnavailable { .. }));
    }

    #[test]
    fn test_api_url_includes_model() {
        assert_eq!(
            backend().api_url,
            "https://api-inference.huggingface.co/models/facebook/bart-large-cnn"
        );
        assert_eq!(backend().name(), DEFAULT_MODEL);
    }
}

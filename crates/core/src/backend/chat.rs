use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    backend::{
        DEFAULT_TIMEOUT, SummarizationBackend, SummaryLengths, classify_status, classify_transport,
    },
    error::{Result, TubenotesError},
    provider::Provider,
};

static SUMMARY_SYSTEM_PROMPT: &str = r#"You are a summarization engine. You receive a passage of text and return an abstractive summary of it.

Rules:
- Write plain prose, no markdown, no bullet points, no preamble
- Keep the facts of the passage, do not add information
- Respect the requested length in words
- Output ONLY the summary, nothing else"#;

/// Summarization through an OpenAI-compatible chat-completions endpoint.
pub struct ChatBackend {
    client: reqwest::Client,
    provider: Provider,
    model: String,
    api_key: String,
}

impl ChatBackend {
    pub fn new(
        provider: Provider,
        model: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = provider.api_key()?;
        let client = reqwest::Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| TubenotesError::BackendUnavailable {
                backend: provider.name().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            model: model.unwrap_or_else(|| provider.config().model.to_string()),
            provider,
            api_key,
        })
    }

    fn user_prompt(text: &str, lengths: SummaryLengths) -> String {
        format!(
            "Summarize the following text in {} to {} words:\n\n{}",
            lengths.min_len, lengths.max_len, text
        )
    }

    fn extract_content(&self, response: &serde_json::Value) -> Result<String> {
        response["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| TubenotesError::BackendUnavailable {
                backend: self.provider.name().to_string(),
                reason: format!("Invalid API response: {:?}", response),
            })
    }
}

#[async_trait]
impl SummarizationBackend for ChatBackend {
    fn name(&self) -> &str {
        self.provider.name()
    }

    async fn summarize(&self, text: &str, lengths: SummaryLengths) -> Result<String> {
        let config = self.provider.config();
        let input_chars = text.chars().count();
        debug!(provider = self.name(), model = %self.model, input_chars, "chat summarize");

        let response = self
            .client
            .post(config.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [
                    {
                        "role": "system",
                        "content": SUMMARY_SYSTEM_PROMPT,
                    },
                    {
                        "role": "user",
                        "content": Self::user_prompt(text, lengths),
                    },
                ],
                "temperature": 0.3,
            }))
            .send()
            .await
            .map_err(|e| classify_transport(self.name(), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport(self.name(), e))?;

        if !status.is_success() {
            return Err(classify_status(self.name(), status, &body, input_chars));
        }

        let response: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| TubenotesError::BackendUnavailable {
                backend: self.name().to_string(),
                reason: format!("Invalid API response: {}", e),
            })?;
        self.extract_content(&response)
    }
}

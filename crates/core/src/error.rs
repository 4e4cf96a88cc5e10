use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TubenotesError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Document is empty, nothing to summarize")]
    EmptyDocument,

    #[error("Input too short: {actual} characters, at least {min} required")]
    InputTooShort { min: usize, actual: usize },

    #[error("Summarization backend {backend} is unavailable: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    #[error("Summarization backend {backend} timed out")]
    BackendTimeout { backend: String },

    #[error("Input of {chars} characters is too long for backend {backend}")]
    BackendInputTooLong { backend: String, chars: usize },

    #[error("Summarization cancelled after {completed} chunk summaries")]
    Cancelled { completed: usize },

    #[error("Compression is undefined for an original text with no words")]
    CompressionUndefined,

    #[error("Invalid YouTube URL format: {url}")]
    InvalidUrl { url: String },

    #[error("No English transcript available for video {video_id}")]
    TranscriptUnavailable { video_id: String },

    #[error("Transcript fetch failed for {url}: {reason}")]
    TranscriptFetchFailed { url: String, reason: String },

    #[error("File {path} is not valid UTF-8")]
    InvalidEncoding { path: PathBuf },

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TubenotesError {
    /// Remediation text shown next to the error in the CLI.
    pub fn hint(&self) -> &'static str {
        match self {
            TubenotesError::InvalidConfiguration { .. } => {
                "Use an overlap smaller than --chunk-size and a non-zero chunk size."
            }
            TubenotesError::EmptyDocument | TubenotesError::CompressionUndefined => {
                "Provide a document that contains some text."
            }
            TubenotesError::InputTooShort { .. } => "Enter at least 100 characters.",
            TubenotesError::BackendUnavailable { .. } => {
                "Check your network connection and API key, then try again."
            }
            TubenotesError::BackendTimeout { .. } => {
                "Try a shorter input, a smaller --chunk-size, or a larger --timeout-secs."
            }
            TubenotesError::BackendInputTooLong { .. } => {
                "Try a shorter input or adjust --chunk-size."
            }
            TubenotesError::Cancelled { .. } => "Run the command again to restart.",
            TubenotesError::InvalidUrl { .. } => {
                "Use https://www.youtube.com/watch?v=... or https://youtu.be/..."
            }
            TubenotesError::TranscriptUnavailable { .. } => {
                "Make sure the video has English captions/subtitles available."
            }
            TubenotesError::TranscriptFetchFailed { .. } => {
                "Make sure yt-dlp is installed and the video is public."
            }
            TubenotesError::InvalidEncoding { .. } => "Upload a UTF-8 encoded .txt or .md file.",
            TubenotesError::MissingApiKey { .. } => {
                "Export the API key or pick another --backend."
            }
            TubenotesError::IoError(_) | TubenotesError::JsonError(_) => {
                "Re-run with --force to discard cached files."
            }
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        TubenotesError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TubenotesError>;

use serde::{Deserialize, Serialize};

/// Caption transcript of a video, as cached in `transcript.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: String,
    pub language: String,
    /// Cleaned plain text
    pub transcript: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    /// Seconds from the start of the video
    pub start: f64,
    pub duration: f64,
}

/// Where a document came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceInfo {
    YouTube {
        url: String,
        video_id: String,
        segments: usize,
    },
    Text {
        length: usize,
    },
    File {
        filename: String,
        size: u64,
    },
}

impl SourceInfo {
    pub fn kind(&self) -> &'static str {
        match self {
            SourceInfo::YouTube { .. } => "YouTube",
            SourceInfo::Text { .. } => "Manual Text",
            SourceInfo::File { .. } => "File",
        }
    }
}

/// Input text together with its origin.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub source: SourceInfo,
}

impl Document {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

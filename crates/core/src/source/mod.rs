//! Input acquisition: video captions, pasted text and uploaded files.
//!
//! The minimum length rule lives here, on the input side. The summarizer
//! itself accepts any non-empty document.

pub mod youtube;

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::{
    error::{Result, TubenotesError},
    types::{Document, SourceInfo, Transcript},
};

pub use youtube::{
    YouTubeSource, clean_transcript, extract_video_id, load_transcript, save_transcript_files,
};

/// Shortest pasted or uploaded text accepted, in chars.
pub const MIN_INPUT_CHARS: usize = 100;

/// Where to read a document from.
#[derive(Debug, Clone)]
pub enum Locator {
    YouTube(String),
    Text(String),
    File(PathBuf),
}

/// A loaded document, plus the caption transcript when it came from a video.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: Document,
    pub transcript: Option<Transcript>,
}

fn ensure_min_length(text: &str) -> Result<()> {
    let actual = text.chars().count();
    if actual < MIN_INPUT_CHARS {
        return Err(TubenotesError::InputTooShort {
            min: MIN_INPUT_CHARS,
            actual,
        });
    }
    Ok(())
}

/// Pasted text, trimmed.
pub fn from_text(text: &str) -> Result<Document> {
    let text = text.trim();
    ensure_min_length(text)?;

    Ok(Document {
        text: text.to_string(),
        source: SourceInfo::Text {
            length: text.chars().count(),
        },
    })
}

/// A UTF-8 text file, trimmed.
pub async fn from_file(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).await?;
    let size = bytes.len() as u64;
    let content = String::from_utf8(bytes).map_err(|_| TubenotesError::InvalidEncoding {
        path: path.to_path_buf(),
    })?;

    let text = content.trim();
    ensure_min_length(text)?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Document {
        text: text.to_string(),
        source: SourceInfo::File { filename, size },
    })
}

pub async fn load(locator: &Locator, youtube: &YouTubeSource) -> Result<LoadedDocument> {
    match locator {
        Locator::YouTube(url) => {
            let transcript = youtube.fetch(url).await?;
            let document = Document {
                text: transcript.transcript.clone(),
                source: SourceInfo::YouTube {
                    url: url.clone(),
                    video_id: transcript.video_id.clone(),
                    segments: transcript.segments.len(),
                },
            };
            Ok(LoadedDocument {
                document,
                transcript: Some(transcript),
            })
        }
        Locator::Text(text) => Ok(LoadedDocument {
            document: from_text(text)?,
            transcript: None,
        }),
        Locator::File(path) => Ok(LoadedDocument {
            document: from_file(path).await?,
            transcript: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_trims_and_checks_length() {
        let text = format!("  {}  \n", "a".repeat(120));
        let document = from_text(&text).unwrap();

        assert_eq!(document.text.len(), 120);
        assert_eq!(document.source, SourceInfo::Text { length: 120 });
    }

    #[test]
    fn test_from_text_too_short() {
        let err = from_text(&format!("{}          ", "b".repeat(99))).unwrap_err();
        assert!(matches!(
            err,
            TubenotesError::InputTooShort {
                min: 100,
                actual: 99
            }
        ));
    }

    #[tokio::test]
    async fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        let content = format!("{}\n", "word ".repeat(30));
        std::fs::write(&path, &content).unwrap();

        let document = from_file(&path).await.unwrap();

        assert_eq!(document.text, content.trim());
        assert_eq!(
            document.source,
            SourceInfo::File {
                filename: "notes.md".to_string(),
                size: content.len() as u64,
            }
        );
    }

    #[tokio::test]
    async fn test_from_file_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let err = from_file(&path).await.unwrap_err();
        assert!(matches!(err, TubenotesError::InvalidEncoding { .. }));
    }

    #[tokio::test]
    async fn test_load_text_locator() {
        let youtube = YouTubeSource::new(std::env::temp_dir(), false);
        let loaded = load(&Locator::Text("x".repeat(200)), &youtube)
            .await
            .unwrap();

        assert!(loaded.transcript.is_none());
        assert_eq!(loaded.document.source.kind(), "Manual Text");
    }
}

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::{fs, process::Command};
use tracing::{debug, info};

use crate::{
    cache::{get_cache_dir, get_captions_path, get_captions_template, get_transcript_path},
    error::{Result, TubenotesError},
    types::{Segment, Transcript},
};

const PUNCTUATION: [&str; 6] = [".", ",", "!", "?", ";", ":"];

/// Extract the video id from a `youtu.be` or `youtube.com/watch` URL.
pub fn extract_video_id(url: &str) -> Result<String> {
    let video_id = if let Some(rest) = url.strip_prefix("https://youtu.be/") {
        rest.rsplit('/').next().unwrap_or(rest)
    } else if url.starts_with("https://www.youtube.com/watch?v=") {
        let after = url.rsplit("v=").next().unwrap_or_default();
        after.split('&').next().unwrap_or_default()
    } else {
        return Err(TubenotesError::InvalidUrl {
            url: url.to_string(),
        });
    };

    if video_id.is_empty() {
        return Err(TubenotesError::InvalidUrl {
            url: url.to_string(),
        });
    }
    Ok(video_id.to_string())
}

/// Normalize raw caption text: drop line breaks, collapse runs of spaces and
/// move punctuation in front of the space that preceded it.
pub fn clean_transcript(raw: &str) -> String {
    let mut text = raw.trim().replace('\n', " ");

    while text.contains("  ") {
        text = text.replace("  ", " ");
    }

    for punct in PUNCTUATION {
        text = text.replace(&format!(" {}", punct), &format!("{} ", punct));
    }

    text
}

/// Join caption segments into one cleaned text.
pub fn segments_to_text(segments: &[Segment]) -> String {
    let mut raw = String::new();
    for segment in segments {
        raw.push_str(&segment.text);
        raw.push(' ');
    }
    clean_transcript(&raw)
}

#[derive(Debug, Deserialize)]
struct Json3Captions {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Parse a yt-dlp `json3` caption file into segments, skipping events that
/// carry only whitespace.
pub fn parse_json3(content: &str) -> Result<Vec<Segment>> {
    let captions: Json3Captions = serde_json::from_str(content)?;

    Ok(captions
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            if text.trim().is_empty() {
                return None;
            }
            Some(Segment {
                text,
                start: event.t_start_ms as f64 / 1000.0,
                duration: event.d_duration_ms as f64 / 1000.0,
            })
        })
        .collect())
}

/// Fetches English captions with yt-dlp and caches the cleaned transcript
/// per URL.
pub struct YouTubeSource {
    cache_root: PathBuf,
    force: bool,
}

impl YouTubeSource {
    pub fn new(cache_root: PathBuf, force: bool) -> Self {
        Self { cache_root, force }
    }

    pub async fn fetch(&self, url: &str) -> Result<Transcript> {
        let video_id = extract_video_id(url)?;
        let cache_dir = get_cache_dir(&self.cache_root, url);
        fs::create_dir_all(&cache_dir).await?;

        let transcript_path = get_transcript_path(&cache_dir);
        if !self.force && fs::try_exists(&transcript_path).await? {
            debug!(path = %transcript_path.display(), "using cached transcript");
            return load_transcript(&transcript_path).await;
        }

        let captions_path = download_captions(url, &cache_dir).await?;
        let Some(captions_path) = captions_path else {
            return Err(TubenotesError::TranscriptUnavailable { video_id });
        };

        let segments = parse_json3(&fs::read_to_string(&captions_path).await?)?;
        if segments.is_empty() {
            return Err(TubenotesError::TranscriptUnavailable { video_id });
        }

        let transcript = Transcript {
            transcript: segments_to_text(&segments),
            video_id,
            language: "en".to_string(),
            segments,
        };
        info!(
            video_id = %transcript.video_id,
            segments = transcript.segments.len(),
            "transcript fetched"
        );

        fs::write(&transcript_path, serde_json::to_string_pretty(&transcript)?).await?;
        Ok(transcript)
    }
}

/// Download English captions (manual or automatic) without the video.
/// Returns `None` when the video has no English track.
async fn download_captions(url: &str, cache_dir: &Path) -> Result<Option<PathBuf>> {
    let output = Command::new("yt-dlp")
        .arg(url)
        .arg("--skip-download")
        .arg("--write-subs")
        .arg("--write-auto-subs")
        .arg("--sub-langs")
        .arg("en")
        .arg("--sub-format")
        .arg("json3")
        .arg("--extractor-args")
        .arg("youtube:player_client=android,web")
        .arg("-o")
        .arg(get_captions_template(cache_dir))
        .output()
        .await?;

    if !output.status.success() {
        return Err(TubenotesError::TranscriptFetchFailed {
            url: url.to_string(),
            reason: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let captions_path = get_captions_path(cache_dir);
    if fs::try_exists(&captions_path).await? {
        Ok(Some(captions_path))
    } else {
        Ok(None)
    }
}

/// Load a transcript from a cached file
pub async fn load_transcript(path: &Path) -> Result<Transcript> {
    let json_content = fs::read_to_string(path).await?;
    let transcript: Transcript = serde_json::from_str(&json_content)?;
    Ok(transcript)
}

/// Write `transcript.txt` (cleaned text) and `transcript.json` (text plus
/// segments) into `output_dir`.
pub async fn save_transcript_files(
    transcript: &Transcript,
    output_dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(output_dir).await?;

    let txt_path = output_dir.join("transcript.txt");
    fs::write(&txt_path, &transcript.transcript).await?;

    let json_path = output_dir.join("transcript.json");
    fs::write(&json_path, serde_json::to_string_pretty(transcript)?).await?;

    Ok((txt_path, json_path))
}

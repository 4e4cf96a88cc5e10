use std::{
    hash::{DefaultHasher, Hash, Hasher},
    path::{Path, PathBuf},
};

/// Get the cache directory for a given URL
pub fn get_cache_dir(root: &Path, url: &str) -> PathBuf {
    let mut hasher = DefaultHasher::new();
    url.hash(&mut hasher);
    let url_hash = hasher.finish();

    root.join(url_hash.to_string())
}

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("tubenotes")
}

/// Output template handed to yt-dlp for caption files
pub fn get_captions_template(cache_dir: &Path) -> PathBuf {
    cache_dir.join("captions.%(ext)s")
}

/// Path yt-dlp writes English json3 captions to
pub fn get_captions_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("captions.en.json3")
}

/// Get the path for a cached transcript file
pub fn get_transcript_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("transcript.json")
}

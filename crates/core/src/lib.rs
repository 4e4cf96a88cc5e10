//! Tubenotes Core Library
//!
//! Hierarchical summarization of long-form text: overlapping chunking,
//! per-chunk summaries, a final summary over the merged chunk summaries, and
//! the input sources and report derivation around them.

pub mod backend;
pub mod cache;
pub mod chunker;
pub mod error;
pub mod format;
pub mod provider;
pub mod report;
pub mod source;
pub mod summarizer;
pub mod types;

// Re-export commonly used items at crate root
pub use backend::{
    ChatBackend, HuggingFaceBackend, LeadBackend, SummarizationBackend, SummaryLengths,
};
pub use cache::{get_cache_dir, get_root_cache_dir, get_transcript_path};
pub use chunker::{Chunk, ChunkingConfig, chunk_text};
pub use error::{Result, TubenotesError};
pub use format::{format_full_notes, format_source, format_summary_only};
pub use provider::{Provider, ProviderConfig};
pub use report::{Report, compression_percent, key_points, word_count};
pub use source::{
    LoadedDocument, Locator, MIN_INPUT_CHARS, YouTubeSource, save_transcript_files,
};
pub use summarizer::{
    HierarchicalSummarizer, HierarchicalSummary, NoProgress, ProgressObserver, SummarizerConfig,
    summarize_hierarchically,
};
pub use types::{Document, Segment, SourceInfo, Transcript};

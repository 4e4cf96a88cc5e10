use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tubenotes_core::{
    Provider,
    chunker::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP},
};

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum CliProvider {
    #[default]
    Grok,
    Openai,
    Gemini,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Grok => Provider::Grok,
            CliProvider::Openai => Provider::Openai,
            CliProvider::Gemini => Provider::Gemini,
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum BackendKind {
    /// Hugging Face Inference API (BART by default)
    #[default]
    Huggingface,
    /// OpenAI-compatible chat completion provider
    Chat,
    /// Offline: keeps the leading sentences
    Lead,
}

#[derive(Parser)]
#[command(name = "tubenotes")]
#[command(
    about = "Summarize YouTube transcripts, pasted text, or files into notes and key points"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub options: Options,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize the English captions of a YouTube video
    Youtube {
        /// Video URL (youtube.com/watch?v=... or youtu.be/...)
        url: String,
    },
    /// Summarize pasted text; reads stdin when TEXT is omitted
    Text { text: Option<String> },
    /// Summarize a UTF-8 text file
    File { path: PathBuf },
}

#[derive(Args)]
pub struct Options {
    /// Chunk size in characters
    #[arg(
        long,
        global = true,
        env = "TUBENOTES_CHUNK_SIZE",
        default_value_t = DEFAULT_CHUNK_SIZE
    )]
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks
    #[arg(
        long,
        global = true,
        env = "TUBENOTES_OVERLAP",
        default_value_t = DEFAULT_OVERLAP
    )]
    pub overlap: usize,

    /// Summarization backend
    #[arg(long, global = true, env = "TUBENOTES_BACKEND", default_value = "huggingface")]
    pub backend: BackendKind,

    /// Chat provider used by the `chat` backend
    #[arg(
        short,
        long,
        global = true,
        env = "TUBENOTES_PROVIDER",
        default_value = "grok"
    )]
    pub provider: CliProvider,

    /// Model override for the selected backend
    #[arg(long, global = true, env = "TUBENOTES_MODEL")]
    pub model: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "TUBENOTES_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Chunk summaries requested at once
    #[arg(long, global = true, env = "TUBENOTES_CONCURRENCY", default_value_t = 1)]
    pub concurrency: usize,

    /// Print every chunk before summarizing
    #[arg(long, global = true)]
    pub show_chunks: bool,

    /// Print each chunk summary as soon as it arrives
    #[arg(long, global = true)]
    pub show_chunk_summaries: bool,

    /// Write the complete notes to this file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Write the summary and key points only to this file
    #[arg(long, global = true)]
    pub summary_output: Option<PathBuf>,

    /// Save transcript.txt and transcript.json of a video into this directory
    #[arg(long, global = true)]
    pub save_transcript: Option<PathBuf>,

    /// Fetch captions again even if a cached transcript exists
    #[arg(short, long, global = true)]
    pub force: bool,
}

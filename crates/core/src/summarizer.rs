//! Two-level summarization: every chunk is summarized on its own, then the
//! space-joined chunk summaries are summarized once more into the final
//! summary.

use futures::{StreamExt, stream};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::{
    backend::{SummarizationBackend, SummaryLengths},
    chunker::ChunkingConfig,
    error::{Result, TubenotesError},
};

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchicalSummary {
    /// One summary per chunk, in chunk order
    pub chunk_summaries: Vec<String>,
    pub final_summary: String,
}

/// Receives pipeline progress. Chunk notifications arrive in chunk order,
/// even when chunks are summarized concurrently.
pub trait ProgressObserver: Send + Sync {
    fn on_chunked(&self, _total: usize) {}
    fn on_chunk_summarized(&self, _index: usize, _total: usize, _summary: &str) {}
    fn on_final_started(&self) {}
    fn on_final_finished(&self, _summary: &str) {}
}

pub struct NoProgress;

impl ProgressObserver for NoProgress {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarizerConfig {
    pub chunking: ChunkingConfig,
    pub chunk_lengths: SummaryLengths,
    pub final_lengths: SummaryLengths,
    /// Chunk summaries in flight at once; 1 means strictly sequential
    pub max_concurrency: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            chunking: ChunkingConfig::default(),
            chunk_lengths: SummaryLengths::CHUNK,
            final_lengths: SummaryLengths::FINAL,
            max_concurrency: 1,
        }
    }
}

impl SummarizerConfig {
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()?;
        self.chunk_lengths.validate()?;
        self.final_lengths.validate()?;
        if self.max_concurrency == 0 {
            return Err(TubenotesError::invalid_config(
                "concurrency must be at least 1",
            ));
        }
        Ok(())
    }
}

pub struct HierarchicalSummarizer<B> {
    backend: B,
    config: SummarizerConfig,
}

impl<B: SummarizationBackend> HierarchicalSummarizer<B> {
    pub fn new(backend: B, config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { backend, config })
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn summarize(&self, text: &str) -> Result<HierarchicalSummary> {
        self.summarize_with(text, &NoProgress, &CancellationToken::new())
            .await
    }

    /// Run the pipeline, reporting progress to `observer` and stopping with
    /// `Cancelled` once `cancel` fires. Backend errors are returned as is and
    /// abort the run; nothing is retried.
    pub async fn summarize_with(
        &self,
        text: &str,
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> Result<HierarchicalSummary> {
        if text.trim().is_empty() {
            return Err(TubenotesError::EmptyDocument);
        }

        let span = info_span!(
            "summarize",
            run_id = %Uuid::new_v4(),
            backend = self.backend.name()
        );

        async move {
            let chunks = self.config.chunking.chunk(text)?;
            let total = chunks.len();
            info!(
                total,
                chunk_size = self.config.chunking.chunk_size,
                overlap = self.config.chunking.overlap,
                "text chunked"
            );
            observer.on_chunked(total);

            let lengths = self.config.chunk_lengths;
            let mut pending = stream::iter(chunks.iter())
                .map(|chunk| async move {
                    debug!(
                        index = chunk.index,
                        start = chunk.start,
                        len = chunk.len,
                        "summarizing chunk"
                    );
                    self.backend.summarize(chunk.text, lengths).await
                })
                .buffered(self.config.max_concurrency);

            let mut chunk_summaries = Vec::with_capacity(total);
            loop {
                let next = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        return Err(TubenotesError::Cancelled {
                            completed: chunk_summaries.len(),
                        });
                    }
                    next = pending.next() => next,
                };

                let Some(result) = next else {
                    break;
                };
                let index = chunk_summaries.len();
                let summary = result.inspect_err(|e| {
                    warn!(index, error = %e, "chunk summarization failed");
                })?;
                observer.on_chunk_summarized(index, total, &summary);
                chunk_summaries.push(summary);
            }
            drop(pending);

            let merged = chunk_summaries.join(" ");
            debug!(
                merged_chars = merged.chars().count(),
                "summarizing merged chunk summaries"
            );
            observer.on_final_started();

            let final_summary = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(TubenotesError::Cancelled {
                        completed: chunk_summaries.len(),
                    });
                }
                result = self.backend.summarize(&merged, self.config.final_lengths) => {
                    result.inspect_err(|e| warn!(error = %e, "final summarization failed"))?
                }
            };
            observer.on_final_finished(&final_summary);
            info!(chunks = total, "summary complete");

            Ok(HierarchicalSummary {
                chunk_summaries,
                final_summary,
            })
        }
        .instrument(span)
        .await
    }
}

/// Chunk `text`, summarize each chunk with the default per-chunk lengths, then
/// summarize the merged summaries with the default final lengths.
pub async fn summarize_hierarchically<B: SummarizationBackend>(
    text: &str,
    backend: &B,
    chunking: ChunkingConfig,
) -> Result<HierarchicalSummary> {
    let config = SummarizerConfig {
        chunking,
        ..SummarizerConfig::default()
    };
    HierarchicalSummarizer::new(backend, config)?
        .summarize(text)
        .await
}

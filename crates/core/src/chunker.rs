//! Fixed-size character windows with overlap.
//!
//! Offsets and lengths are measured in chars (Unicode scalar values), never in
//! bytes, so a window never splits a multi-byte character.

use crate::error::{Result, TubenotesError};

pub const DEFAULT_CHUNK_SIZE: usize = 1200;
pub const DEFAULT_OVERLAP: usize = 150;

/// One window of a document, borrowed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Position of the chunk in the sequence (0-based)
    pub index: usize,
    /// Char offset of the first character in the document
    pub start: usize,
    /// Number of chars in the chunk
    pub len: usize,
    pub text: &'a str,
}

impl Chunk<'_> {
    /// Char offset one past the last character
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        let config = Self {
            chunk_size,
            overlap,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(TubenotesError::invalid_config(
                "chunk size must be greater than 0",
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(TubenotesError::invalid_config(format!(
                "overlap ({}) must be smaller than chunk size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    /// Distance between the starts of two consecutive chunks
    pub fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// Rough chunk count shown before processing starts.
    pub fn estimated_chunks(&self, char_count: usize) -> usize {
        (char_count / self.chunk_size.max(1)).max(1)
    }

    pub fn chunk<'a>(&self, text: &'a str) -> Result<Vec<Chunk<'a>>> {
        self.validate()?;

        // Byte offset of every char, plus the end of the string.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        let step = self.step();
        let mut chunks = Vec::with_capacity(char_count / step + 1);
        let mut start = 0;

        while start < char_count {
            let end = (start + self.chunk_size).min(char_count);
            chunks.push(Chunk {
                index: chunks.len(),
                start,
                len: end - start,
                text: &text[boundaries[start]..boundaries[end]],
            });
            // A window reaching the end covers everything after it.
            if end == char_count {
                break;
            }
            start += step;
        }

        Ok(chunks)
    }
}

/// Split `text` into windows of `chunk_size` chars whose starts advance by
/// `chunk_size - overlap`, stopping at the first window that reaches the end
/// of the text. Empty text yields no chunks.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<Chunk<'_>>> {
    ChunkingConfig {
        chunk_size,
        overlap,
    }
    .chunk(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts(chunks: &[Chunk<'_>]) -> Vec<usize> {
        chunks.iter().map(|c| c.start).collect()
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let text = "A".repeat(1000);
        let chunks = chunk_text(&text, 1200, 150).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len, 1000);
        assert_eq!(chunks[0].text, text);
    }

    #[test]
    fn test_text_equal_to_chunk_size_is_single_chunk() {
        let text = "B".repeat(1200);
        let chunks = chunk_text(&text, 1200, 150).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
    }

    #[test]
    fn test_stepping_rule() {
        let text = "A".repeat(2500);
        let chunks = chunk_text(&text, 1200, 150).unwrap();

        assert_eq!(starts(&chunks), vec![0, 1050, 2100]);
        assert_eq!(chunks[0].len, 1200);
        assert_eq!(chunks[1].len, 1200);
        assert_eq!(chunks[2].len, 400);
    }

    #[test]
    fn test_no_chunk_starts_inside_the_final_window() {
        let text = "A".repeat(2200);
        let chunks = chunk_text(&text, 1200, 150).unwrap();

        assert_eq!(starts(&chunks), vec![0, 1050]);
        assert_eq!(chunks[1].len, 1150);
        assert_eq!(chunks[1].end(), 2200);
    }

    #[test]
    fn test_lengths_between_step_and_chunk_size_are_single_chunk() {
        for len in [1049, 1050, 1051, 1100, 1199, 1200] {
            let text = "C".repeat(len);
            let chunks = chunk_text(&text, 1200, 150).unwrap();

            assert_eq!(chunks.len(), 1, "len {len}");
            assert_eq!(chunks[0].text, text);
        }

        let text = "C".repeat(1201);
        let chunks = chunk_text(&text, 1200, 150).unwrap();
        assert_eq!(starts(&chunks), vec![0, 1050]);
        assert_eq!(chunks[1].len, 151);
    }

    #[test]
    fn test_every_chunk_adds_new_chars() {
        let text: String = ('a'..='z').cycle().take(977).collect();
        for (size, overlap) in [(10, 3), (64, 63), (100, 20), (300, 150)] {
            let chunks = chunk_text(&text, size, overlap).unwrap();
            for pair in chunks.windows(2) {
                assert!(pair[1].end() > pair[0].end(), "{size}/{overlap}");
            }
        }
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunks = chunk_text("", 1200, 150).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_zero_overlap_partitions_text() {
        let text = "abcdefghij";
        let chunks = chunk_text(text, 4, 0).unwrap();
        let texts: Vec<&str> = chunks.iter().map(|c| c.text).collect();

        assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_coverage_and_overlap_exactness() {
        let text: String = ('a'..='z').cycle().take(977).collect();
        for (size, overlap) in [(10, 3), (50, 0), (64, 63), (100, 20), (977, 10)] {
            let config = ChunkingConfig::new(size, overlap).unwrap();
            let chunks = config.chunk(&text).unwrap();

            assert_eq!(chunks[0].start, 0);
            assert_eq!(chunks.last().unwrap().end(), 977);
            for pair in chunks.windows(2) {
                assert_eq!(pair[1].start - pair[0].start, size - overlap);
                // no gap between consecutive chunks
                assert!(pair[1].start <= pair[0].end());
            }
            for chunk in &chunks {
                let expected: String = text.chars().skip(chunk.start).take(chunk.len).collect();
                assert_eq!(chunk.text, expected);
            }
        }
    }

    #[test]
    fn test_overlap_region_is_shared_by_neighbours() {
        let text: String = ('a'..='z').collect();
        let chunks = chunk_text(&text, 10, 4).unwrap();

        let tail: String = chunks[0].text.chars().skip(6).collect();
        let head: String = chunks[1].text.chars().take(4).collect();
        assert_eq!(tail, head);
    }

    #[test]
    fn test_multibyte_chars_are_counted_as_chars() {
        let text = "héllo wörld ünïcode ✓✓✓";
        let chunks = chunk_text(text, 5, 1).unwrap();

        assert_eq!(chunks[0].text, "héllo");
        assert_eq!(chunks[1].text, "o wör");
        let total: usize = text.chars().count();
        assert_eq!(chunks.last().unwrap().end(), total);
    }

    #[test]
    fn test_chunking_is_idempotent() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(80);
        let first = chunk_text(&text, 300, 45).unwrap();
        let second = chunk_text(&text, 300, 45).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            chunk_text("abc", 0, 0),
            Err(TubenotesError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            chunk_text("abc", 100, 100),
            Err(TubenotesError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            ChunkingConfig::new(100, 250),
            Err(TubenotesError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_estimated_chunks() {
        let config = ChunkingConfig::default();
        assert_eq!(config.estimated_chunks(0), 1);
        assert_eq!(config.estimated_chunks(1000), 1);
        assert_eq!(config.estimated_chunks(2500), 2);
    }
}

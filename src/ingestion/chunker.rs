//! Catalog text chunking with configurable splitting strategies

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::ChunkingConfig;
use crate::types::Chunk;

/// How chunk boundaries are chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStrategy {
    /// Try separators in priority order (paragraph, line, sentence, space,
    /// character) so boundaries land on semantic breakpoints
    #[default]
    Recursive,
    /// Fixed-stride character windows (stride = size - overlap); faster,
    /// coarser boundaries
    Fixed,
}

/// Text chunker with configurable size, overlap and strategy
///
/// Lengths are measured in characters and slicing always respects char
/// boundaries. Splitting is deterministic: no I/O, no external calls.
pub struct TextChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks
    overlap: usize,
    /// Splitting strategy
    strategy: ChunkStrategy,
}

impl TextChunker {
    /// Create a recursive chunker
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self::with_strategy(chunk_size, overlap, ChunkStrategy::Recursive)
    }

    /// Create a chunker with an explicit strategy
    pub fn with_strategy(chunk_size: usize, overlap: usize, strategy: ChunkStrategy) -> Self {
        Self {
            chunk_size,
            overlap,
            strategy,
        }
    }

    /// Create a chunker from the chunking config section
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::with_strategy(config.chunk_size, config.chunk_overlap, config.strategy)
    }

    /// Split source text into chunks
    ///
    /// Empty or whitespace-only text yields no chunks; text shorter than
    /// the chunk size yields a single chunk.
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let parts = match self.strategy {
            ChunkStrategy::Recursive => self.split_recursive(text),
            ChunkStrategy::Fixed => self.split_fixed(text),
        };

        parts
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .enumerate()
            .map(|(ordinal, part)| Chunk::new(part, ordinal as u32))
            .collect()
    }

    /// Separator-priority splitting: fragment the text into pieces no
    /// larger than the chunk size, then greedily reassemble them into
    /// chunks that carry an overlap tail across boundaries.
    fn split_recursive(&self, text: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        self.fragment(text, 0, &mut pieces);
        self.assemble(pieces)
    }

    /// Partition `text` into ordered pieces, each at most `chunk_size`
    /// chars, preferring the highest separator level that fits
    fn fragment(&self, text: &str, level: usize, out: &mut Vec<String>) {
        if char_len(text) <= self.chunk_size {
            out.push(text.to_string());
            return;
        }
        match level {
            0 => {
                for piece in text.split_inclusive("\n\n") {
                    self.fragment(piece, 1, out);
                }
            }
            1 => {
                for piece in text.split_inclusive('\n') {
                    self.fragment(piece, 2, out);
                }
            }
            2 => {
                for piece in text.split_sentence_bounds() {
                    self.fragment(piece, 3, out);
                }
            }
            3 => {
                for piece in text.split_inclusive(' ') {
                    self.fragment(piece, 4, out);
                }
            }
            _ => out.extend(self.char_windows(text)),
        }
    }

    /// Greedily merge pieces into chunks of at most `chunk_size` chars,
    /// seeding each new chunk with the overlap tail of the previous one
    fn assemble(&self, pieces: Vec<String>) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for piece in pieces {
            let piece_len = char_len(&piece);
            if !current.is_empty() && char_len(&current) + piece_len > self.chunk_size {
                chunks.push(current.trim().to_string());

                let tail = self.overlap_tail(&current);
                // Overlap is best-effort: drop the tail rather than
                // letting a chunk exceed the size limit.
                current = if char_len(&tail) + piece_len > self.chunk_size {
                    String::new()
                } else {
                    tail
                };
            }
            current.push_str(&piece);
        }

        if !current.trim().is_empty() {
            chunks.push(current.trim().to_string());
        }

        chunks
    }

    /// Last `overlap` chars of a chunk, snapped forward to a sentence or
    /// word start so the carried context begins cleanly
    fn overlap_tail(&self, text: &str) -> String {
        if self.overlap == 0 {
            return String::new();
        }
        let chars: Vec<char> = text.chars().collect();
        if chars.len() <= self.overlap {
            return text.to_string();
        }
        let tail: String = chars[chars.len() - self.overlap..].iter().collect();
        if let Some(pos) = tail.find(". ") {
            return tail[pos + 2..].to_string();
        }
        if let Some(pos) = tail.find(' ') {
            return tail[pos + 1..].to_string();
        }
        tail
    }

    /// Hard cut into windows of at most `chunk_size` chars
    fn char_windows(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(self.chunk_size.max(1))
            .map(|window| window.iter().collect())
            .collect()
    }

    /// Fixed-stride windows over the char sequence
    fn split_fixed(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let stride = self.chunk_size.saturating_sub(self.overlap).max(1);
        let mut out = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            out.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += stride;
        }
        out
    }
}

/// Length in chars, not bytes
fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunker = TextChunker::new(500, 100);
        assert!(chunker.split("").is_empty());
        assert!(chunker.split("   \n\n  \t").is_empty());
    }

    #[test]
    fn short_text_yields_single_chunk() {
        let chunker = TextChunker::new(500, 100);
        let chunks = chunker.split("Product: SmartWatch Pro X Price: ₹15,999");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Product: SmartWatch Pro X Price: ₹15,999");
        assert_eq!(chunks[0].ordinal, 0);
    }

    #[test]
    fn recursive_prefers_paragraph_boundaries() {
        let first = "The SmartWatch Pro X tracks sleep.";
        let second = "The Earbuds Elite cancel noise.";
        let text = format!("{}\n\n{}", first, second);

        let chunker = TextChunker::new(50, 0);
        let chunks = chunker.split(&text);
        assert_eq!(texts(&chunks), vec![first, second]);
    }

    #[test]
    fn recursive_overlap_carries_trailing_words() {
        let words: Vec<String> = (1..=40).map(|i| format!("w{:02}", i)).collect();
        let text = words.join(" ");

        let chunker = TextChunker::new(40, 12);
        let chunks = chunker.split(&text);

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let first_word = pair[1].text.split(' ').next().unwrap();
            assert!(
                pair[0].text.contains(first_word),
                "chunk {:?} does not carry overlap into {:?}",
                pair[0].text,
                pair[1].text
            );
        }
    }

    #[test]
    fn chunks_never_exceed_size() {
        let paragraph = "TechGear ships nationwide. Orders arrive in three days. \
                         Support is available all week. Returns are accepted."
            .to_string();
        let text = vec![paragraph; 20].join("\n\n");

        let chunker = TextChunker::new(120, 30);
        let chunks = chunker.split(&text);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.char_len() <= 120, "oversized chunk: {:?}", chunk.text);
        }
    }

    #[test]
    fn unbroken_text_falls_back_to_char_windows() {
        let text = "x".repeat(250);
        let chunker = TextChunker::new(100, 20);
        let chunks = chunker.split(&text);
        // 100 + 100 + (20-char tail + remaining 50)
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].char_len(), 100);
        assert_eq!(chunks[1].char_len(), 100);
        assert_eq!(chunks[2].char_len(), 70);
    }

    #[test]
    fn fixed_strategy_overlaps_exactly() {
        let text: String = ('a'..='z').chain('0'..='9').collect();
        let chunker = TextChunker::with_strategy(10, 4, ChunkStrategy::Fixed);
        let chunks = chunker.split(&text);

        for pair in chunks.windows(2) {
            let head_of_next: String = pair[1].text.chars().take(4).collect();
            assert!(pair[0].text.ends_with(&head_of_next));
        }
        let rebuilt: String = chunks
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i == 0 {
                    c.text.clone()
                } else {
                    c.text.chars().skip(4).collect()
                }
            })
            .collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn ordinals_are_consecutive() {
        let text = vec!["A paragraph of catalog text for the splitter."; 12].join("\n\n");
        let chunker = TextChunker::new(80, 10);
        let chunks = chunker.split(&text);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.ordinal, i as u32);
        }
    }

    #[test]
    fn splitting_is_deterministic() {
        let text = vec!["Catalog entries repeat across paragraphs here."; 15].join("\n\n");
        let chunker = TextChunker::new(90, 25);
        let first = chunker.split(&text);
        let second = chunker.split(&text);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn multibyte_text_is_sliced_on_char_boundaries() {
        let text = "₹15,999 ".repeat(40);
        let chunker = TextChunker::with_strategy(25, 5, ChunkStrategy::Fixed);
        let chunks = chunker.split(&text);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.char_len() <= 25);
        }
    }
}

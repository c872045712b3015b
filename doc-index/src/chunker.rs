//! Overlapping document chunking with natural-boundary preference.
//!
//! Goals:
//! - Produce stable, overlapping character windows: each chunk begins exactly
//!   `overlap` characters before the end of its predecessor, so concatenating
//!   chunks with overlaps removed reconstructs the document byte-for-byte.
//! - Cut at a paragraph break, then a sentence end, then a line break, then a
//!   word boundary before falling back to a hard cut at `max_chars`.
//! - Never split inside a UTF-8 code point; sizes are counted in characters.

use crate::error::IndexError;
use crate::record::{Chunk, Document, chunk_id};
use tracing::trace;

/// Boundary preference levels, tried in order before a hard cut.
/// A separator stays attached to the chunk it terminates.
const BOUNDARY_LEVELS: &[&[&str]] = &[&["\n\n"], &[". ", "! ", "? "], &["\n"], &[" "]];

/// Validated chunking parameters.
///
/// `max_chars` bounds each chunk's length in characters; `overlap` is the
/// number of trailing characters of one chunk repeated as the leading
/// characters of the next.
///
/// # Example
///
/// ```rust,ignore
/// let splitter = ChunkSplitter::new(1000, 200)?;
/// for chunk in splitter.chunks(&document) {
///     println!("{} {}", chunk.seq, chunk.text.len());
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChunkSplitter {
    max_chars: usize,
    overlap: usize,
}

impl ChunkSplitter {
    /// Creates a splitter after validating the parameters.
    ///
    /// # Errors
    /// Returns [`IndexError::InvalidConfiguration`] if either parameter is
    /// zero or if `overlap >= max_chars`. Validation happens here, before any
    /// splitting logic can run.
    pub fn new(max_chars: usize, overlap: usize) -> Result<Self, IndexError> {
        if max_chars == 0 || overlap == 0 {
            return Err(IndexError::InvalidConfiguration(
                "chunk size and overlap must both be positive".into(),
            ));
        }
        if overlap >= max_chars {
            return Err(IndexError::InvalidConfiguration(format!(
                "chunk overlap ({overlap}) must be smaller than chunk size ({max_chars})"
            )));
        }
        Ok(Self { max_chars, overlap })
    }

    /// Returns a lazy iterator over the document's chunks.
    ///
    /// The iterator is finite and restartable: each call produces a fresh
    /// sequence from the beginning. Empty input yields an empty sequence.
    pub fn chunks<'a>(&self, document: &'a Document) -> Chunks<'a> {
        Chunks {
            source: &document.source,
            text: &document.text,
            max_chars: self.max_chars,
            overlap: self.overlap,
            start: 0,
            seq: 0,
        }
    }
}

/// Lazy chunk iterator borrowed from a [`Document`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    source: &'a str,
    text: &'a str,
    max_chars: usize,
    overlap: usize,
    /// Byte offset of the next chunk's first character.
    start: usize,
    seq: u32,
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.start >= self.text.len() {
            return None;
        }

        let rest = &self.text[self.start..];
        let window_bytes = byte_len_of_chars(rest, self.max_chars);
        let at_end = window_bytes == rest.len();

        let cut_bytes = if at_end {
            window_bytes
        } else {
            natural_cut(&rest[..window_bytes], self.overlap).unwrap_or(window_bytes)
        };

        let chunk_text = &rest[..cut_bytes];
        let chunk = Chunk {
            id: chunk_id(self.source, self.seq, self.start, self.start + cut_bytes),
            seq: self.seq,
            text: chunk_text.to_string(),
        };
        trace!(seq = self.seq, chars = chunk_text.chars().count(), "emitted chunk");

        self.seq = self.seq.saturating_add(1);
        if at_end {
            self.start = self.text.len();
        } else {
            // The next chunk begins exactly `overlap` characters before this
            // cut; the cut always keeps more than `overlap` characters, so
            // forward progress is guaranteed.
            let kept = chunk_text.chars().count() - self.overlap;
            self.start += byte_len_of_chars(chunk_text, kept);
        }
        Some(chunk)
    }
}

/// Byte length of the first `n` characters of `s` (all of `s` if shorter).
fn byte_len_of_chars(s: &str, n: usize) -> usize {
    match s.char_indices().nth(n) {
        Some((idx, _)) => idx,
        None => s.len(),
    }
}

/// Finds the rightmost natural boundary in `window` that keeps more than
/// `overlap` characters in the current chunk, trying paragraph, sentence,
/// line, then word separators. Returns the cut as a byte offset into
/// `window`, or `None` when only a hard cut remains.
fn natural_cut(window: &str, overlap: usize) -> Option<usize> {
    for level in BOUNDARY_LEVELS {
        let best = level
            .iter()
            .filter_map(|sep| window.rfind(sep).map(|i| i + sep.len()))
            .max();
        if let Some(cut) = best {
            if window[..cut].chars().count() > overlap {
                return Some(cut);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::new("test.txt", text)
    }

    fn reconstruct(chunks: &[Chunk], overlap: usize) -> String {
        let mut out = String::new();
        for (i, c) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(&c.text);
            } else {
                out.extend(c.text.chars().skip(overlap));
            }
        }
        out
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(ChunkSplitter::new(0, 0).is_err());
        assert!(ChunkSplitter::new(100, 0).is_err());
        assert!(ChunkSplitter::new(100, 100).is_err());
        assert!(ChunkSplitter::new(100, 150).is_err());
        assert!(ChunkSplitter::new(100, 99).is_ok());
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        let splitter = ChunkSplitter::new(100, 20).unwrap();
        assert_eq!(splitter.chunks(&doc("")).count(), 0);
    }

    #[test]
    fn short_document_is_a_single_chunk() {
        let splitter = ChunkSplitter::new(1000, 200).unwrap();
        let chunks: Vec<_> = splitter
            .chunks(&doc("Paris is the capital of France."))
            .collect();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Paris is the capital of France.");
        assert_eq!(chunks[0].seq, 0);
    }

    #[test]
    fn adjacent_chunks_share_exactly_overlap_characters() {
        let text = "word ".repeat(200);
        let splitter = ChunkSplitter::new(50, 10).unwrap();
        let chunks: Vec<_> = splitter.chunks(&doc(&text)).collect();
        assert!(chunks.len() > 2);
        for pair in chunks.windows(2) {
            let tail: String = pair[0]
                .text
                .chars()
                .skip(pair[0].text.chars().count() - 10)
                .collect();
            let head: String = pair[1].text.chars().take(10).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn chunking_is_lossless() {
        let text = "First paragraph with several sentences. Another one here!\n\n\
                    Second paragraph follows, and it keeps going for a while to force \
                    multiple chunks. The quick brown fox jumps over the lazy dog. \
                    Pack my box with five dozen liquor jugs.\n\nThird paragraph.";
        let splitter = ChunkSplitter::new(80, 15).unwrap();
        let chunks: Vec<_> = splitter.chunks(&doc(text)).collect();
        assert!(chunks.len() > 1);
        assert_eq!(reconstruct(&chunks, 15), text);
    }

    #[test]
    fn lossless_with_multibyte_text() {
        let text = "Il était une fois, à Paris, une grande bibliothèque. \
                    Ses rayonnages débordaient de livres anciens. \
                    日本語のテキストも含まれています。それは問題ではありません。"
            .repeat(3);
        let splitter = ChunkSplitter::new(60, 12).unwrap();
        let chunks: Vec<_> = splitter.chunks(&doc(&text)).collect();
        assert!(chunks.len() > 1);
        assert_eq!(reconstruct(&chunks, 12), text);
        for c in &chunks {
            assert!(c.text.chars().count() <= 60);
        }
    }

    #[test]
    fn prefers_paragraph_boundary_over_hard_cut() {
        let text = format!("{}\n\n{}", "a".repeat(40), "b".repeat(60));
        let splitter = ChunkSplitter::new(50, 5).unwrap();
        let chunks: Vec<_> = splitter.chunks(&doc(&text)).collect();
        assert!(chunks[0].text.ends_with("\n\n"));
        assert_eq!(chunks[0].text.len(), 42);
    }

    #[test]
    fn prefers_sentence_boundary_when_no_paragraph_fits() {
        let text = "One short sentence. Then a much longer tail without any paragraph break at all here";
        let splitter = ChunkSplitter::new(40, 5).unwrap();
        let chunks: Vec<_> = splitter.chunks(&doc(&text)).collect();
        assert_eq!(chunks[0].text, "One short sentence. ");
    }

    #[test]
    fn hard_cut_when_no_boundary_exists() {
        let text = "x".repeat(120);
        let splitter = ChunkSplitter::new(50, 10).unwrap();
        let chunks: Vec<_> = splitter.chunks(&doc(&text)).collect();
        assert_eq!(chunks[0].text.len(), 50);
        assert_eq!(reconstruct(&chunks, 10), text);
    }

    #[test]
    fn iterator_is_restartable() {
        let text = "word ".repeat(100);
        let splitter = ChunkSplitter::new(60, 10).unwrap();
        let document = doc(&text);
        let first: Vec<_> = splitter.chunks(&document).collect();
        let second: Vec<_> = splitter.chunks(&document).collect();
        assert_eq!(first, second);
    }
}

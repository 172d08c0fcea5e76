//! Fixed-size character chunking.
//!
//! Chunks are measured in Unicode scalar values, never bytes, so a chunk
//! boundary cannot split a multi-byte character. Chunks are contiguous and
//! non-overlapping; concatenating them reproduces the input exactly.

use crate::SummarizationError;

/// Iterator over consecutive `size`-character slices of a string.
///
/// The last chunk may be shorter. An empty input yields nothing.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    size: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let end = self.rest.char_indices().nth(self.size).map_or(self.rest.len(), |(i, _)| i);
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}

/// Splits `text` into chunks of `size` characters.
///
/// # Errors
///
/// [`SummarizationError::InvalidChunkSize`] when `size` is zero.
pub fn chunk_text(text: &str, size: usize) -> Result<Chunks<'_>, SummarizationError> {
    if size == 0 {
        return Err(SummarizationError::InvalidChunkSize);
    }
    Ok(Chunks { rest: text, size })
}

/// Number of chunks `text` splits into: `ceil(chars / size)`.
pub fn chunk_count(text: &str, size: usize) -> Result<usize, SummarizationError> {
    if size == 0 {
        return Err(SummarizationError::InvalidChunkSize);
    }
    Ok(text.chars().count().div_ceil(size))
}

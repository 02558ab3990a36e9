//! Turns a streaming generation reply (newline-delimited JSON records)
//! into plain text emitted at word boundaries.

use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};
use tracing::{debug, warn};

use crate::domain::{ports::ByteStream, GenerationFragment};

/// Plain-text output stream. Every item ends on a space.
pub type WordStream = BoxStream<'static, Bytes>;

/// Accumulates generated text and releases it only up to the last space
/// seen, so a word is never split across two output chunks.
#[derive(Debug, Default)]
pub struct WordChunker {
    buffer: String,
}

impl WordChunker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text held back because it may be an incomplete word.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Consumes one raw read from upstream. Each read is decoded on its own
    /// and split into records; unparseable records are dropped.
    pub fn feed(&mut self, raw: &[u8]) -> Vec<Bytes> {
        let text = String::from_utf8_lossy(raw);
        let mut out = Vec::new();

        for record in text.trim().split('\n') {
            if record.trim().is_empty() {
                continue;
            }

            match GenerationFragment::parse(record) {
                Ok(fragment) => {
                    if let Some(chunk) = fragment.text().and_then(|t| self.push_text(t)) {
                        out.push(chunk);
                    }
                }
                Err(e) => warn!(error = %e, record, "skipping malformed generation record"),
            }
        }

        out
    }

    /// Appends text and returns every completed word, each followed by its
    /// space. The trailing fragment stays buffered.
    pub fn push_text(&mut self, text: &str) -> Option<Bytes> {
        self.buffer.push_str(text);

        let split_at = self.buffer.rfind(' ')? + 1;
        let rest = self.buffer.split_off(split_at);
        let words = std::mem::replace(&mut self.buffer, rest);
        Some(Bytes::from(words))
    }

    /// Releases whatever is still buffered, with a trailing space.
    pub fn finish(self) -> Option<Bytes> {
        if self.buffer.is_empty() {
            return None;
        }

        let mut last = self.buffer;
        last.push(' ');
        Some(Bytes::from(last))
    }
}

enum ChunkerState {
    Reading {
        upstream: ByteStream,
        chunker: WordChunker,
    },
    Closed,
}

/// Re-streams an upstream generation body as word-aligned text. The
/// returned stream pulls one upstream read at a time and ends after a
/// single final flush. An upstream read error ends the stream the same
/// way end-of-stream does.
pub fn rechunk(upstream: ByteStream) -> WordStream {
    let initial = ChunkerState::Reading {
        upstream,
        chunker: WordChunker::new(),
    };

    stream::unfold(initial, |state| async move {
        let ChunkerState::Reading {
            mut upstream,
            mut chunker,
        } = state
        else {
            return None;
        };

        match upstream.next().await {
            Some(Ok(raw)) => {
                let chunks = chunker.feed(&raw);
                Some((chunks, ChunkerState::Reading { upstream, chunker }))
            }
            Some(Err(e)) => {
                warn!(error = %e, "generation stream failed, closing");
                Some((chunker.finish().into_iter().collect(), ChunkerState::Closed))
            }
            None => {
                debug!("generation stream finished");
                Some((chunker.finish().into_iter().collect(), ChunkerState::Closed))
            }
        }
    })
    .flat_map(stream::iter)
    .boxed()
}

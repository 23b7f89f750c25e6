//! Streaming reply aggregation.
//!
//! The server brackets a multi-chunk reply with `stream_start`/`stream_end`.
//! While a stream is open, content accumulates here instead of producing one
//! transcript bubble per chunk.
//!
//! ```text
//!            stream_start (clears buffer)
//!   Idle ───────────────────────────────▶ Streaming ──┐ push(chunk)
//!    ▲                                        │  ◀────┘
//!    │  stream_end: finish() → one message    │
//!    └──────── error: abort() → nothing ──────┘
//! ```
//!
//! Invariant: the buffer is empty whenever the stream is inactive.

use log::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamBuffer {
    active: bool,
    content: String,
}

impl StreamBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Text accumulated so far (empty when idle).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Enter streaming mode with an empty buffer.
    ///
    /// A start while already streaming restarts the buffer.
    pub fn start(&mut self) {
        if self.active && !self.content.is_empty() {
            debug!(
                "stream_start while streaming, dropping {} buffered bytes",
                self.content.len()
            );
        }
        self.active = true;
        self.content.clear();
    }

    /// Append a chunk. Returns `false` (and stores nothing) when idle.
    pub fn push(&mut self, chunk: &str) -> bool {
        if !self.active {
            return false;
        }
        self.content.push_str(chunk);
        true
    }

    /// Leave streaming mode, handing back the accumulated reply if non-empty.
    pub fn finish(&mut self) -> Option<String> {
        let was_active = std::mem::replace(&mut self.active, false);
        let content = std::mem::take(&mut self.content);
        (was_active && !content.is_empty()).then_some(content)
    }

    /// Leave streaming mode, discarding the buffer. Returns the discarded length.
    pub fn abort(&mut self) -> usize {
        self.active = false;
        let dropped = self.content.len();
        self.content.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_concatenate_in_order() {
        let mut stream = StreamBuffer::new();
        stream.start();
        assert!(stream.push("Hel"));
        assert!(stream.push("lo, "));
        assert!(stream.push("world"));
        assert_eq!(stream.finish().as_deref(), Some("Hello, world"));
        assert!(!stream.is_active());
        assert!(stream.content().is_empty());
    }

    #[test]
    fn test_empty_stream_yields_nothing() {
        let mut stream = StreamBuffer::new();
        stream.start();
        assert_eq!(stream.finish(), None);
        assert!(!stream.is_active());
    }

    #[test]
    fn test_push_while_idle_is_refused() {
        let mut stream = StreamBuffer::new();
        assert!(!stream.push("stray"));
        assert!(stream.content().is_empty());
        assert_eq!(stream.finish(), None);
    }

    #[test]
    fn test_abort_discards_buffer() {
        let mut stream = StreamBuffer::new();
        stream.start();
        stream.push("partial");
        assert_eq!(stream.abort(), 7);
        assert!(!stream.is_active());
        assert_eq!(stream.finish(), None);
    }

    #[test]
    fn test_restart_clears_previous_chunks() {
        let mut stream = StreamBuffer::new();
        stream.start();
        stream.push("old");
        stream.start();
        stream.push("new");
        assert_eq!(stream.finish().as_deref(), Some("new"));
    }
}

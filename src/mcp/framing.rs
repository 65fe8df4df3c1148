//! Newline framing for the JSON-RPC byte stream.
//!
//! Input arrives as arbitrary-sized chunks. The framer accumulates them and
//! yields one line per `\n`; a trailing partial line stays buffered until its
//! newline shows up. Bytes that are not valid UTF-8 are replaced rather than
//! rejected, so the JSON decoder gets to produce the actual parse verdict.
//!
//! The buffer carries no upper bound: a peer that streams forever without a
//! newline grows it without limit.

/// Accumulates raw bytes and splits out newline-terminated lines.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Append a chunk of raw input.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Extract the next complete line, with the terminating newline stripped.
    /// Only `\n` terminates a line; a `\r` before it is left in place (the
    /// JSON decoder treats it as whitespace).
    pub fn next_line(&mut self) -> Option<String> {
        let newline = self.buffer.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.buffer.drain(..=newline).collect();
        line.pop();
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Number of buffered bytes still waiting for a newline.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

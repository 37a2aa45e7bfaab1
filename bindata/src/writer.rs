//! Streaming adapter from raw bytes to Rust array literal tokens.
use std::io::{self, Write};

/// Number of `0xNN,` tokens per output line.
const TOKENS_PER_LINE: usize = 12;

/// Writes every byte it receives to the inner writer as a `0xNN,` token.
///
/// Tokens are grouped twelve to a line, each line starting on a fresh line
/// with `indent`. At most one line of text is held before it reaches the
/// inner writer, so the writer can sit directly behind a compressor.
#[derive(Debug)]
pub struct ByteWriter<W: Write> {
    inner: W,
    indent: &'static str,
    written: usize,
    line: String,
    sink_failed: bool,
}

impl<W: Write> ByteWriter<W> {
    pub fn new(inner: W, indent: &'static str) -> Self {
        Self {
            inner,
            indent,
            written: 0,
            line: String::with_capacity(indent.len() + 1 + TOKENS_PER_LINE * 6),
            sink_failed: false,
        }
    }

    /// Number of byte tokens written so far.
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Whether a write to the inner writer has failed.
    pub const fn sink_failed(&self) -> bool {
        self.sink_failed
    }

    /// Ends the current line and returns the inner writer.
    ///
    /// # Errors
    /// Returns the inner writer's error if the final newline cannot be written.
    pub fn finish(mut self) -> io::Result<W> {
        self.emit("\n")?;
        Ok(self.inner)
    }

    /// Writes out and clears the pending line.
    fn emit_line(&mut self) -> io::Result<()> {
        if self.line.is_empty() {
            return Ok(());
        }
        let line = std::mem::take(&mut self.line);
        let result = self.emit(&line);
        self.line = line;
        self.line.clear();
        result
    }

    fn emit(&mut self, s: &str) -> io::Result<()> {
        self.inner.write_all(s.as_bytes()).inspect_err(|_| {
            self.sink_failed = true;
        })
    }
}

impl<W: Write> Write for ByteWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        use std::fmt::Write as _;

        self.line.clear();
        for &byte in buf {
            if self.written % TOKENS_PER_LINE == 0 {
                self.emit_line()?;
                self.line.push('\n');
                self.line.push_str(self.indent);
            } else {
                self.line.push(' ');
            }
            // Writing into a `String` cannot fail.
            let _ = write!(self.line, "0x{byte:02x},");
            self.written += 1;
        }
        self.emit_line()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().inspect_err(|_| {
            self.sink_failed = true;
        })
    }
}

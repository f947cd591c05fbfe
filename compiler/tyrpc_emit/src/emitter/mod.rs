//! Output Emitter
//!
//! Abstraction over where rendered schema text goes: an in-memory string or
//! any [`io::Write`] sink (the CLI streams into a temporary file).

use std::io::{self, Write};

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 2;

/// Trait for emitting rendered output.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation ([`INDENT_WIDTH`] spaces per level).
    fn emit_indent(&mut self, level: usize);

    /// Emit a single space.
    fn emit_space(&mut self) {
        self.emit(" ");
    }
}

/// String-based emitter for in-memory rendering.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the rendered output.
    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level * INDENT_WIDTH {
            self.buffer.push(' ');
        }
    }

    fn emit_space(&mut self) {
        self.buffer.push(' ');
    }
}

/// Emitter over an [`io::Write`] sink.
///
/// Emission itself cannot fail; the first write error is kept and reported
/// by [`finish`](Self::finish), after which further output is dropped.
pub struct WriteEmitter<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> WriteEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.writer.write_all(bytes) {
            self.error = Some(error);
        }
    }

    /// Flush and return the sink, or the first error hit while writing.
    ///
    /// # Errors
    ///
    /// Returns the first write error, or the error of the final flush.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> Emitter for WriteEmitter<W> {
    fn emit(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    fn emit_newline(&mut self) {
        self.write(b"\n");
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.write(&[b' '; INDENT_WIDTH]);
        }
    }
}

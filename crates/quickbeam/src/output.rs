//! Output sink for program-visible text
//!
//! The sink is write-only from the program's point of view: it receives
//! exactly the bytes produced by the printing natives, in call order.
//! - `Stdout`: the process's standard output (default)
//! - `Buffer`: captured in memory, for tests and embedding
//! - `Silent`: discarded

use std::io::{self, Write};

/// Where printing natives send their text.
#[derive(Debug, Default)]
pub enum OutputSink {
    /// Writes to stdout, flushing after each write.
    #[default]
    Stdout,
    /// Captures everything into a string.
    Buffer(String),
    /// Discards all output.
    Silent,
}

impl OutputSink {
    /// A sink that writes to stdout.
    pub fn stdout() -> Self {
        OutputSink::Stdout
    }

    /// A sink that captures output in memory.
    pub fn buffer() -> Self {
        OutputSink::Buffer(String::new())
    }

    /// A sink that discards output.
    pub fn silent() -> Self {
        OutputSink::Silent
    }

    /// Append `text` to the sink.
    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        match self {
            OutputSink::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()
            }
            OutputSink::Buffer(buf) => {
                buf.push_str(text);
                Ok(())
            }
            OutputSink::Silent => Ok(()),
        }
    }

    /// Everything captured so far; `None` for sinks that don't capture.
    pub fn captured(&self) -> Option<&str> {
        match self {
            OutputSink::Buffer(buf) => Some(buf),
            _ => None,
        }
    }

    /// Take the captured text, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        match self {
            OutputSink::Buffer(buf) => std::mem::take(buf),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_captures_in_order() {
        let mut sink = OutputSink::buffer();
        sink.write_str("a\n").unwrap();
        sink.write_str("b\n").unwrap();
        assert_eq!(sink.captured(), Some("a\nb\n"));
    }

    #[test]
    fn test_take_clears_buffer() {
        let mut sink = OutputSink::buffer();
        sink.write_str("x").unwrap();
        assert_eq!(sink.take(), "x");
        assert_eq!(sink.captured(), Some(""));
    }

    #[test]
    fn test_silent_captures_nothing() {
        let mut sink = OutputSink::silent();
        sink.write_str("ignored").unwrap();
        assert_eq!(sink.captured(), None);
        assert_eq!(sink.take(), "");
    }
}

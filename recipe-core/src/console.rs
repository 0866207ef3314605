//! Line-based text I/O used by the interactive parts of the recipe book.

use std::fmt;
use std::io::{self, BufRead, Write};

/// Parse a user-entered number. Surrounding whitespace is ignored.
pub fn parse_number(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok()
}

/// A prompt/answer pair of streams, typically stdin and stdout.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line without its line terminator.
    /// Returns `None` once the input is exhausted.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Write `label` on the current line and wait for the answer.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn say(&mut self, line: impl fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Write already line-terminated text as is.
    pub fn print(&mut self, text: impl fmt::Display) -> io::Result<()> {
        write!(self.output, "{text}")
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_number_trims() {
        assert_eq!(parse_number(" 2.5 "), Some(2.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("two"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_read_line_strips_terminators() {
        let mut c = Console::new(Cursor::new("one\r\ntwo\nthree"), Vec::new());
        assert_eq!(c.read_line().unwrap().as_deref(), Some("one"));
        assert_eq!(c.read_line().unwrap().as_deref(), Some("two"));
        assert_eq!(c.read_line().unwrap().as_deref(), Some("three"));
        assert_eq!(c.read_line().unwrap(), None);
    }

    #[test]
    fn test_prompt_writes_label_without_newline() {
        let mut c = Console::new(Cursor::new("Pasta\n"), Vec::new());
        let answer = c.prompt("Enter the recipe name: ").unwrap();
        assert_eq!(answer.as_deref(), Some("Pasta"));
        assert_eq!(c.into_output(), b"Enter the recipe name: ");
    }
}

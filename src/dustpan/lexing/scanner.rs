//! One-line-lookahead cursor over a text stream.

use std::io::{self, BufRead};
use std::sync::Arc;
use thiserror::Error;

use super::glyphs::is_blank;

const UTF8_BOM: char = '\u{FEFF}';

#[derive(Debug, Clone, Error)]
pub enum ScanError {
    #[error("read error: {0}")]
    Io(Arc<io::Error>),
    #[error("a line was already pushed back")]
    DoublePushBack,
    #[error("nothing to push back")]
    NothingToPushBack,
}

impl From<io::Error> for ScanError {
    fn from(err: io::Error) -> Self {
        ScanError::Io(Arc::new(err))
    }
}

/// Reads a stream line by line and lets the caller give back at most one line.
///
/// Line numbers are 1-based and always refer to the line most recently
/// handed out; pushing a line back steps the counter back with it.
pub struct LineScanner<R> {
    reader: R,
    last: Option<String>,
    pushed_back: bool,
    line: usize,
    at_start: bool,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            last: None,
            pushed_back: false,
            line: 0,
            at_start: true,
        }
    }

    /// Line number of the most recently returned line (0 before the first read).
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Next line without its terminator, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<String>, ScanError> {
        if self.pushed_back {
            if let Some(line) = &self.last {
                self.pushed_back = false;
                self.line += 1;
                return Ok(Some(line.clone()));
            }
        }

        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        if self.at_start {
            self.at_start = false;
            if buf.starts_with(UTF8_BOM) {
                buf.remove(0);
            }
        }

        self.last = Some(buf.clone());
        self.pushed_back = false;
        self.line += 1;
        Ok(Some(buf))
    }

    /// Give the last line back so the next `next_line` returns it again.
    pub fn push_back(&mut self) -> Result<(), ScanError> {
        if self.pushed_back {
            return Err(ScanError::DoublePushBack);
        }
        if self.last.is_none() {
            return Err(ScanError::NothingToPushBack);
        }
        self.pushed_back = true;
        self.line -= 1;
        Ok(())
    }

    /// Consume blank lines, leaving the first non-blank one unread.
    ///
    /// Returns the number of blank lines skipped.
    pub fn skip_blank_lines(&mut self) -> Result<usize, ScanError> {
        let mut skipped = 0;
        while let Some(line) = self.next_line()? {
            if !is_blank(&line) {
                self.push_back()?;
                break;
            }
            skipped += 1;
        }
        Ok(skipped)
    }
}

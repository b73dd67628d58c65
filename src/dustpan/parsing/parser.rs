//! Section / paragraph grammar
//!
//! ```text
//! document  := (blank* section)* blank*
//! section   := header body
//! header    := ws* MARKER name TERMINATOR inline-head?
//! body      := (line | blank)*          until the next MARKER line or end of input
//! ```
//!
//! Body lines are trimmed; blank lines split the body into paragraphs. Any
//! header error aborts the whole document, only end of input ends it.

use std::io::{BufRead, BufReader, Read};
use std::mem;
use tracing::warn;

use super::error::{GrammarError, ParseError};
use crate::dustpan::ast::{
    Document, DuplicatePolicy, Insertion, Paragraph, Section, SectionMap, TextLine,
};
use crate::dustpan::lexing::glyphs::{find_rune, trim_spaces, trim_start_spaces};
use crate::dustpan::lexing::{is_field_terminator, is_marker, normalize_spaces, LineScanner};

/// Document parser; holds the options that are not part of the grammar itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    duplicates: DuplicatePolicy,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    pub fn parse_str(&self, filename: &str, source: &str) -> Result<Document, ParseError> {
        self.parse_buffered(filename, source.as_bytes())
    }

    pub fn parse<R: Read>(&self, filename: &str, reader: R) -> Result<Document, ParseError> {
        self.parse_buffered(filename, BufReader::new(reader))
    }

    pub fn parse_buffered<R: BufRead>(
        &self,
        filename: &str,
        reader: R,
    ) -> Result<Document, ParseError> {
        let mut scanner = LineScanner::new(reader);
        let mut sections = SectionMap::new();

        loop {
            let (name, section) = match read_section(&mut scanner) {
                Ok(Some(found)) => found,
                Ok(None) => break,
                Err(cause) => {
                    return Err(ParseError::new(filename, scanner.line_number(), cause));
                }
            };
            let line = section.line;
            match sections.insert(name.clone(), section, self.duplicates) {
                Insertion::New => {}
                Insertion::Replaced | Insertion::Ignored => {
                    warn!(
                        filename,
                        line,
                        section = %name,
                        policy = %self.duplicates,
                        "duplicate section name"
                    );
                }
                Insertion::Rejected => {
                    return Err(ParseError::new(
                        filename,
                        line,
                        GrammarError::DuplicateSectionName(name),
                    ));
                }
            }
        }

        Ok(Document::new(filename, sections))
    }
}

/// Parse a document with the default options.
pub fn parse_document<R: Read>(filename: &str, reader: R) -> Result<Document, ParseError> {
    Parser::new().parse(filename, reader)
}

/// Parse an in-memory document with the default options.
pub fn parse_str(filename: &str, source: &str) -> Result<Document, ParseError> {
    Parser::new().parse_str(filename, source)
}

fn read_section<R: BufRead>(
    scanner: &mut LineScanner<R>,
) -> Result<Option<(String, Section)>, GrammarError> {
    scanner.skip_blank_lines()?;
    let Some(line) = scanner.next_line()? else {
        return Ok(None);
    };
    let header_line = scanner.line_number();

    let (name, head) = parse_header(&line)?;
    let head = head.map(|text| TextLine::new(text, header_line));
    let paragraphs = read_body(scanner, head)?;
    Ok(Some((name, Section::new(header_line, paragraphs))))
}

/// Split a header line into its normalized name and optional inline head.
fn parse_header(line: &str) -> Result<(String, Option<&str>), GrammarError> {
    let line = trim_start_spaces(line);
    let mut chars = line.chars();
    if !chars.next().is_some_and(is_marker) {
        return Err(GrammarError::NoSectionNamePrefix);
    }
    let rest = chars.as_str();

    let (end, width) =
        find_rune(rest, is_field_terminator).ok_or(GrammarError::NoSectionNameSuffix)?;
    let name = normalize_spaces(&rest[..end]);
    if name.is_empty() {
        return Err(GrammarError::SectionNameIsEmpty);
    }

    let head = trim_spaces(&rest[end + width..]);
    Ok((name, (!head.is_empty()).then_some(head)))
}

fn read_body<R: BufRead>(
    scanner: &mut LineScanner<R>,
    head: Option<TextLine>,
) -> Result<Vec<Paragraph>, GrammarError> {
    let mut paragraphs = Vec::new();
    let mut pending: Vec<TextLine> = head.into_iter().collect();

    while let Some(line) = scanner.next_line()? {
        let text = trim_spaces(&line);
        if text.is_empty() {
            if !pending.is_empty() {
                paragraphs.push(Paragraph::new(mem::take(&mut pending)));
            }
        } else if text.starts_with(is_marker) {
            scanner.push_back()?;
            break;
        } else {
            pending.push(TextLine::new(text, scanner.line_number()));
        }
    }

    if !pending.is_empty() {
        paragraphs.push(Paragraph::new(pending));
    }
    Ok(paragraphs)
}

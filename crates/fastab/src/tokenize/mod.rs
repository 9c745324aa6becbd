//! Byte-level tokenizer for delimited tables.
//!
//! A single linear scan over the input buffer drives a small state machine
//! that commits fields into column-major storage: one growable byte buffer
//! per column, each field terminated by a NUL byte. An empty field is stored
//! as the sentinel byte `0x01` followed by the terminator, so records are
//! never zero-length on the wire and end-of-buffer stays unambiguous. The
//! header pass writes names into a separate buffer terminated by a double
//! NUL.
//!
//! The input must end with a newline; [`crate::read::Reader`] guarantees
//! this when it acquires the source. An unterminated final line is dropped.
//! Fields may hold any byte except NUL, which is reserved as the record
//! terminator.

use memchr::memchr;

use crate::error::{Error, Result};

/// Sentinel byte standing in for an empty field inside column storage.
const EMPTY_FIELD: u8 = 0x01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    StartLine,
    StartField,
    StartQuotedField,
    Field,
    QuotedField,
    QuotedFieldNewline,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Header,
    Body,
    /// Consume rows without storing anything; used for line skipping.
    Skip,
}

/// Tokenizer over a borrowed input buffer.
///
/// Reusable across passes: a header pass discovers names, then a body pass
/// fills the per-column stores. Each call resets the read cursor and the
/// storage it writes to. Not shareable across threads while in use; callers
/// needing parallelism across inputs construct one tokenizer per input.
pub struct Tokenizer<'a> {
    source: &'a [u8],
    pos: usize,
    delimiter: u8,
    comment: Option<u8>,
    quotechar: u8,
    fill_extra_cols: bool,
    cols: Vec<Vec<u8>>,
    header: Vec<u8>,
    header_fields: usize,
    num_rows: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(
        source: &'a [u8],
        delimiter: u8,
        comment: Option<u8>,
        quotechar: u8,
        fill_extra_cols: bool,
    ) -> Self {
        Self {
            source,
            pos: 0,
            delimiter,
            comment,
            quotechar,
            fill_extra_cols,
            cols: Vec::new(),
            header: Vec::new(),
            header_fields: 0,
            num_rows: 0,
        }
    }

    /// Number of complete data rows committed by the last body pass.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Header pass: skip the first `skip_lines` non-comment, non-blank
    /// lines, tokenize the next retained line into the header buffer, and
    /// return its field names (lossy UTF-8).
    pub fn tokenize_header(&mut self, skip_lines: usize) -> Result<Vec<String>> {
        self.pos = 0;
        self.header.clear();
        self.header_fields = 0;
        self.skip_lines(skip_lines)?;
        self.scan(Mode::Header, Some(1), &[])?;
        if self.header_fields == 0 {
            return Err(Error::InvalidLine {
                line: skip_lines + 1,
                message: "no header line found".into(),
            });
        }
        self.header.push(0);
        Ok(self
            .header_records()
            .map(|f| String::from_utf8_lossy(f).into_owned())
            .collect())
    }

    /// Body pass: skip `skip_lines` as in the header pass, then tokenize
    /// rows until `max_rows` data rows are committed, or until end of input
    /// when `None`.
    ///
    /// `use_cols.len()` is the declared column count. Fields of columns
    /// flagged `false` are consumed but not stored; ragged-row accounting
    /// still spans the full logical width.
    pub fn tokenize(&mut self, skip_lines: usize, max_rows: Option<usize>, use_cols: &[bool]) -> Result<()> {
        self.pos = 0;
        self.num_rows = 0;
        let reserve = self.source.len() / use_cols.len().max(1);
        self.cols = use_cols
            .iter()
            .map(|&keep| Vec::with_capacity(if keep { reserve } else { 0 }))
            .collect();
        self.skip_lines(skip_lines)?;
        if max_rows == Some(0) {
            return Ok(());
        }
        self.scan(Mode::Body, max_rows, use_cols)
    }

    /// Iterate the committed fields of column `col`, in row order, with the
    /// empty-field sentinel stripped. Restartable any number of times
    /// without re-tokenizing.
    pub fn column_fields(&self, col: usize) -> FieldIter<'_> {
        FieldIter::new(&self.cols[col])
    }

    fn header_records(&self) -> FieldIter<'_> {
        // Drop the closing byte of the double-NUL terminator.
        let end = self.header.len().saturating_sub(1);
        FieldIter::new(&self.header[..end])
    }

    /// Advance the cursor past `n` newline-terminated lines, not counting
    /// blank lines or comment lines. Runs the same state machine as the
    /// tokenizing passes, so a quoted field with embedded newlines is
    /// skipped as a single row.
    fn skip_lines(&mut self, n: usize) -> Result<()> {
        if n == 0 {
            return Ok(());
        }
        self.scan(Mode::Skip, Some(n), &[])
    }

    fn scan(&mut self, mode: Mode, max_rows: Option<usize>, use_cols: &[bool]) -> Result<()> {
        let src = self.source;
        let mut state = State::StartLine;
        let mut field: Vec<u8> = Vec::new();
        let mut col = 0usize;
        let mut rows = 0usize;

        while self.pos < src.len() {
            let c = src[self.pos];
            match state {
                State::StartLine => {
                    if matches!(c, b'\n' | b' ' | b'\t') {
                        self.pos += 1;
                    } else if Some(c) == self.comment {
                        state = State::Comment;
                        self.pos += 1;
                    } else {
                        // Reprocess c as the start of the first field.
                        state = State::StartField;
                        col = 0;
                    }
                }
                State::StartField => {
                    if c == self.quotechar {
                        state = State::StartQuotedField;
                    } else if c == self.delimiter {
                        self.push_field(mode, &mut field, &mut col, use_cols)?;
                    } else if c == b'\n' {
                        self.push_field(mode, &mut field, &mut col, use_cols)?;
                        self.end_row(mode, &mut col, use_cols)?;
                        rows += 1;
                        state = State::StartLine;
                    } else {
                        field.push(c);
                        state = State::Field;
                    }
                    self.pos += 1;
                    if Some(rows) == max_rows {
                        break;
                    }
                }
                State::StartQuotedField => {
                    if c == self.quotechar {
                        // Closed immediately: empty quoted field, committed
                        // by the delimiter or newline that follows.
                        state = State::Field;
                    } else {
                        field.push(c);
                        state = State::QuotedField;
                    }
                    self.pos += 1;
                }
                State::Field => {
                    if c == self.delimiter {
                        self.push_field(mode, &mut field, &mut col, use_cols)?;
                        state = State::StartField;
                    } else if c == b'\n' {
                        self.push_field(mode, &mut field, &mut col, use_cols)?;
                        self.end_row(mode, &mut col, use_cols)?;
                        rows += 1;
                        state = State::StartLine;
                    } else {
                        field.push(c);
                    }
                    self.pos += 1;
                    if Some(rows) == max_rows {
                        break;
                    }
                }
                State::QuotedField | State::QuotedFieldNewline => {
                    if c == self.quotechar {
                        state = State::Field;
                    } else if c == b'\n' {
                        // Literal newline inside quotes; the dedicated state
                        // keeps line accounting separable from field bytes.
                        field.push(c);
                        state = State::QuotedFieldNewline;
                    } else {
                        field.push(c);
                        state = State::QuotedField;
                    }
                    self.pos += 1;
                }
                State::Comment => {
                    match memchr(b'\n', &src[self.pos..]) {
                        Some(i) => {
                            self.pos += i + 1;
                            state = State::StartLine;
                        }
                        None => self.pos = src.len(),
                    }
                }
            }
        }
        Ok(())
    }

    fn push_field(&mut self, mode: Mode, field: &mut Vec<u8>, col: &mut usize, use_cols: &[bool]) -> Result<()> {
        match mode {
            Mode::Header => {
                if field.is_empty() {
                    self.header.push(EMPTY_FIELD);
                } else {
                    self.header.extend_from_slice(field);
                }
                self.header.push(0);
                self.header_fields += 1;
            }
            Mode::Body => {
                if *col >= use_cols.len() {
                    return Err(Error::TooManyCols {
                        line: self.num_rows + 1,
                    });
                }
                if use_cols[*col] {
                    let out = &mut self.cols[*col];
                    if field.is_empty() {
                        out.push(EMPTY_FIELD);
                    } else {
                        out.extend_from_slice(field);
                    }
                    out.push(0);
                }
            }
            Mode::Skip => {}
        }
        field.clear();
        *col += 1;
        Ok(())
    }

    fn end_row(&mut self, mode: Mode, col: &mut usize, use_cols: &[bool]) -> Result<()> {
        if mode == Mode::Body {
            if *col < use_cols.len() {
                if !self.fill_extra_cols {
                    return Err(Error::NotEnoughCols {
                        line: self.num_rows + 1,
                    });
                }
                while *col < use_cols.len() {
                    if use_cols[*col] {
                        let out = &mut self.cols[*col];
                        out.push(EMPTY_FIELD);
                        out.push(0);
                    }
                    *col += 1;
                }
            }
            self.num_rows += 1;
        }
        *col = 0;
        Ok(())
    }
}

/// Cursor over one column's NUL-delimited records.
pub struct FieldIter<'t> {
    buf: &'t [u8],
    pos: usize,
}

impl<'t> FieldIter<'t> {
    fn new(buf: &'t [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// True once every record has been consumed.
    pub fn finished(&self) -> bool {
        self.pos >= self.buf.len()
    }
}

impl<'t> Iterator for FieldIter<'t> {
    type Item = &'t [u8];

    fn next(&mut self) -> Option<&'t [u8]> {
        if self.pos >= self.buf.len() {
            return None;
        }
        let end = memchr(0, &self.buf[self.pos..])
            .map(|i| self.pos + i)
            .unwrap_or(self.buf.len());
        let record = &self.buf[self.pos..end];
        self.pos = end + 1;
        if record == [EMPTY_FIELD] {
            Some(&[])
        } else {
            Some(record)
        }
    }
}

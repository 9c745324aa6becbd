//! Reader front-end: option validation, source acquisition, header
//! resolution, column selection, and materialization of the tokenized
//! columns under the int → float → string fallback chain.

use std::io;

use crate::column::{Column, ColumnData, Table};
use crate::convert::{parse_float, parse_int};
use crate::error::{Error, Result};
use crate::options::{FillValue, ReadOptions};
use crate::tokenize::Tokenizer;

pub struct Reader {
    opts: ReadOptions,
}

impl Reader {
    /// Validate options and build a reader. The structural bytes must be
    /// distinct and none of them may be the newline that terminates rows.
    pub fn new(opts: ReadOptions) -> Result<Self> {
        if opts.delimiter == b'\n' || opts.quotechar == b'\n' || opts.comment == Some(b'\n') {
            return Err(Error::Parameter(
                "newline cannot be used as delimiter, quote, or comment byte".into(),
            ));
        }
        if opts.delimiter == opts.quotechar {
            return Err(Error::Parameter(
                "delimiter and quote byte must differ".into(),
            ));
        }
        if opts.comment == Some(opts.delimiter) {
            return Err(Error::Parameter(
                "delimiter and comment byte must differ".into(),
            ));
        }
        Ok(Self { opts })
    }

    pub fn read_str(&self, input: &str) -> Result<Table> {
        self.read_bytes(input.as_bytes())
    }

    pub fn read_bytes(&self, input: &[u8]) -> Result<Table> {
        let source = normalize(input);
        self.read_source(&source)
    }

    pub fn read_from_reader<R: io::Read>(&self, mut reader: R) -> Result<Table> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        self.read_bytes(&raw)
    }

    fn read_source(&self, source: &[u8]) -> Result<Table> {
        let opts = &self.opts;
        let mut tok = Tokenizer::new(
            source,
            opts.delimiter,
            opts.comment,
            opts.quotechar,
            opts.fill_extra_cols,
        );

        let data_start = opts
            .data_start
            .unwrap_or_else(|| opts.header_start.map_or(0, |h| h + 1));

        let names: Vec<String> = if let Some(names) = &opts.names {
            names.clone()
        } else if let Some(header_start) = opts.header_start {
            tok.tokenize_header(header_start)?
        } else {
            // Width discovery: header-tokenize the first data line purely to
            // count its fields, then auto-name. Empty input means no columns.
            match tok.tokenize_header(data_start) {
                Ok(fields) => (1..=fields.len()).map(|i| format!("col{i}")).collect(),
                Err(Error::InvalidLine { .. }) => Vec::new(),
                Err(e) => return Err(e),
            }
        };

        let use_cols: Vec<bool> = names
            .iter()
            .map(|name| {
                let included = opts
                    .include_names
                    .as_ref()
                    .is_none_or(|inc| inc.iter().any(|n| n == name));
                let excluded = opts
                    .exclude_names
                    .as_ref()
                    .is_some_and(|exc| exc.iter().any(|n| n == name));
                included && !excluded
            })
            .collect();

        let max_rows = match opts.data_end {
            Some(end) if end >= 0 => Some((end as usize).saturating_sub(data_start)),
            _ => None,
        };
        tok.tokenize(data_start, max_rows, &use_cols)?;

        // Negative data_end truncates the tail during materialization only;
        // the tokenizer has already scanned to end of input.
        let target_rows = match opts.data_end {
            Some(end) if end < 0 => tok.num_rows().saturating_sub(end.unsigned_abs() as usize),
            _ => tok.num_rows(),
        };

        let mut table = Table::new();
        for (index, name) in names.iter().enumerate() {
            if !use_cols[index] {
                continue;
            }
            let fill = ColumnFill::new(opts, &names, name);
            let column = materialize(&tok, index, target_rows, &fill);
            table.push(name.clone(), column);
        }
        Ok(table)
    }
}

/// Normalize the acquired source: CRLF becomes LF and the buffer gains the
/// trailing newline the tokenizer relies on.
fn normalize(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() + 1);
    let mut i = 0usize;
    while i < input.len() {
        let b = input[i];
        if b == b'\r' && input.get(i + 1) == Some(&b'\n') {
            i += 1;
            continue;
        }
        out.push(b);
        i += 1;
    }
    if out.last() != Some(&b'\n') {
        out.push(b'\n');
    }
    out
}

/// Fill-value rules resolved against one column: each rule's bad bytes,
/// replacement bytes, and whether a hit masks the row here.
struct ColumnFill<'o> {
    rules: Vec<(&'o [u8], &'o [u8], bool)>,
}

impl<'o> ColumnFill<'o> {
    fn new(opts: &'o ReadOptions, names: &[String], col_name: &str) -> Self {
        let eligible = fill_eligible(opts, names, col_name);
        let rules = opts
            .fill_values
            .iter()
            .map(|rule: &'o FillValue| {
                let masks = if rule.names.is_empty() {
                    eligible
                } else {
                    rule.names.iter().any(|n| n == col_name)
                };
                (rule.bad.as_slice(), rule.replacement.as_bytes(), masks)
            })
            .collect();
        Self { rules }
    }

    /// Byte-exact lookup; returns the field to convert and the mask flag.
    fn apply<'f>(&self, raw: &'f [u8]) -> (&'f [u8], bool)
    where
        'o: 'f,
    {
        for &(bad, replacement, masks) in &self.rules {
            if bad == raw {
                return (replacement, masks);
            }
        }
        (raw, false)
    }
}

/// Membership in the global fill-eligible set: every column name,
/// intersected with `fill_include_names`, minus `fill_exclude_names`.
fn fill_eligible(opts: &ReadOptions, names: &[String], col_name: &str) -> bool {
    if !names.iter().any(|n| n == col_name) {
        return false;
    }
    let included = opts
        .fill_include_names
        .as_ref()
        .is_none_or(|inc| inc.iter().any(|n| n == col_name));
    let excluded = opts
        .fill_exclude_names
        .as_ref()
        .is_some_and(|exc| exc.iter().any(|n| n == col_name));
    included && !excluded
}

/// Materialize one column under the first type that converts every field:
/// integer, then float, then string. Each promotion restarts from row zero
/// by replaying the already-tokenized column store.
fn materialize(tok: &Tokenizer<'_>, col: usize, target_rows: usize, fill: &ColumnFill<'_>) -> Column {
    if let Some(column) = try_numeric(tok, col, target_rows, fill, parse_int, ColumnData::Int) {
        return column;
    }
    if let Some(column) = try_numeric(tok, col, target_rows, fill, parse_float, ColumnData::Float) {
        return column;
    }
    let mut values = Vec::with_capacity(target_rows);
    let mut mask = Vec::with_capacity(target_rows);
    for raw in tok.column_fields(col).take(target_rows) {
        let (bytes, masked) = fill.apply(raw);
        values.push(String::from_utf8_lossy(bytes).into_owned());
        mask.push(masked);
    }
    finish(ColumnData::Str(values), mask)
}

fn try_numeric<T>(
    tok: &Tokenizer<'_>,
    col: usize,
    target_rows: usize,
    fill: &ColumnFill<'_>,
    convert: fn(&[u8]) -> Result<T>,
    wrap: fn(Vec<T>) -> ColumnData,
) -> Option<Column> {
    let mut values = Vec::with_capacity(target_rows);
    let mut mask = Vec::with_capacity(target_rows);
    for raw in tok.column_fields(col).take(target_rows) {
        let (bytes, masked) = fill.apply(raw);
        // A single conversion failure abandons this candidate type.
        values.push(convert(bytes).ok()?);
        mask.push(masked);
    }
    Some(finish(wrap(values), mask))
}

fn finish(data: ColumnData, mask: Vec<bool>) -> Column {
    let mask = if mask.iter().any(|&m| m) {
        Some(mask)
    } else {
        None
    };
    Column { data, mask }
}

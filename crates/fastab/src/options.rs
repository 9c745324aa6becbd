/// A substitution rule applied during column materialization.
///
/// When a raw field matches `bad` byte-for-byte, `replacement` is converted
/// in its place. The row is additionally masked when `names` lists the
/// current column, or when `names` is empty and the column belongs to the
/// global fill-eligible set (see [`ReadOptions::fill_include_names`] and
/// [`ReadOptions::fill_exclude_names`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillValue {
    pub bad: Vec<u8>,
    pub replacement: String,
    pub names: Vec<String>,
}

impl FillValue {
    /// Rule that applies to every fill-eligible column.
    pub fn new(bad: impl Into<Vec<u8>>, replacement: impl Into<String>) -> Self {
        Self {
            bad: bad.into(),
            replacement: replacement.into(),
            names: Vec::new(),
        }
    }

    /// Rule restricted to the named columns.
    pub fn for_columns<I, S>(bad: impl Into<Vec<u8>>, replacement: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bad: bad.into(),
            replacement: replacement.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Field delimiter, one byte.
    pub delimiter: u8,
    /// Comment byte; a line whose first non-whitespace byte equals it is
    /// discarded entirely. `None` disables comment handling.
    pub comment: Option<u8>,
    /// Quote byte; delimiters and newlines inside a quoted field are literal.
    pub quotechar: u8,
    /// Row index of the header line (0-based, counting only non-comment
    /// lines). `None` auto-generates names `col1, col2, ...`.
    pub header_start: Option<usize>,
    /// Row index of the first data row (same counting). Defaults to the line
    /// after the header, or 0 when there is no header.
    pub data_start: Option<usize>,
    /// Non-negative: exclusive row bound in the same counting as
    /// `data_start`. Negative: drop that many trailing rows during
    /// materialization (the tokenizer still scans to end of input).
    pub data_end: Option<i64>,
    /// Explicit column names, overriding any header line.
    pub names: Option<Vec<String>>,
    /// Keep only these columns.
    pub include_names: Option<Vec<String>>,
    /// Drop these columns.
    pub exclude_names: Option<Vec<String>>,
    /// Substitution rules, matched byte-exact against raw fields.
    pub fill_values: Vec<FillValue>,
    /// Restrict the fill-eligible column set to these names.
    pub fill_include_names: Option<Vec<String>>,
    /// Remove these names from the fill-eligible column set.
    pub fill_exclude_names: Option<Vec<String>>,
    /// Pad rows with fewer fields than the declared column count with empty
    /// fields instead of reporting an error.
    pub fill_extra_cols: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            comment: None,
            quotechar: b'"',
            header_start: Some(0),
            data_start: None,
            data_end: None,
            names: None,
            include_names: None,
            exclude_names: None,
            fill_values: Vec::new(),
            fill_include_names: None,
            fill_exclude_names: None,
            fill_extra_cols: false,
        }
    }
}

impl ReadOptions {
    /// Comma-separated values. Short rows are padded with empty fields.
    pub fn csv() -> Self {
        Self {
            comment: Some(b'#'),
            fill_extra_cols: true,
            ..Self::default()
        }
    }

    /// Tab-separated values.
    pub fn tab() -> Self {
        Self {
            delimiter: b'\t',
            comment: Some(b'#'),
            ..Self::default()
        }
    }

    /// Space-delimited table.
    pub fn basic() -> Self {
        Self {
            delimiter: b' ',
            comment: Some(b'#'),
            ..Self::default()
        }
    }

    /// Table without a header line; names are auto-generated unless
    /// [`ReadOptions::names`] is set.
    pub fn no_header() -> Self {
        Self {
            header_start: None,
            data_start: Some(0),
            ..Self::default()
        }
    }
}

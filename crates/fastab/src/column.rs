/// Typed storage for one materialized column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Str(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A materialized column: dense values plus an optional row mask.
///
/// The mask is present only when at least one row was masked by a
/// fill-value rule; it always has the same length as the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub data: ColumnData,
    pub mask: Option<Vec<bool>>,
}

impl Column {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_masked(&self) -> bool {
        self.mask.is_some()
    }

    pub fn row_masked(&self, row: usize) -> bool {
        self.mask.as_ref().is_some_and(|m| m[row])
    }
}

/// Ordered mapping from column name to materialized column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    cols: Vec<(String, Column)>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: String, col: Column) {
        self.cols.push((name, col));
    }

    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    /// Row count, taken from the first column; zero for a columnless table.
    pub fn num_rows(&self) -> usize {
        self.cols.first().map_or(0, |(_, c)| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cols.iter().map(|(n, _)| n.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.cols
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.cols.iter().map(|(n, c)| (n.as_str(), c))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.cols.len()))?;
        for (name, col) in &self.cols {
            map.serialize_entry(name, col)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Column {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        match &self.data {
            ColumnData::Int(v) => {
                for (row, x) in v.iter().enumerate() {
                    if self.row_masked(row) {
                        seq.serialize_element(&None::<i64>)?;
                    } else {
                        seq.serialize_element(x)?;
                    }
                }
            }
            ColumnData::Float(v) => {
                for (row, x) in v.iter().enumerate() {
                    if self.row_masked(row) {
                        seq.serialize_element(&None::<f64>)?;
                    } else {
                        seq.serialize_element(x)?;
                    }
                }
            }
            ColumnData::Str(v) => {
                for (row, x) in v.iter().enumerate() {
                    if self.row_masked(row) {
                        seq.serialize_element(&None::<&str>)?;
                    } else {
                        seq.serialize_element(x)?;
                    }
                }
            }
        }
        seq.end()
    }
}

use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Table – raw rows of named string fields
// ---------------------------------------------------------------------------

/// A delimited file as read from disk: a header plus rows of raw strings.
/// Every row has exactly `headers.len()` fields (checked by the loader).
#[derive(Debug, Clone)]
pub struct Table {
    /// Where the table was read from, kept for error messages.
    pub source: PathBuf,
    /// Column names in file order.
    pub headers: Vec<String>,
    /// Data rows in file order (header excluded).
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(source: impl Into<PathBuf>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table {
            source: source.into(),
            headers,
            rows,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Iterate rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, fields)| Row { index, fields })
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Borrowed view of one data row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    /// Zero-based position among the data rows.
    pub index: usize,
    fields: &'a [String],
}

impl<'a> Row<'a> {
    /// Value at a column position from [`Table::column_index`].
    pub fn field(&self, column: usize) -> &'a str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    /// One-based row number as a user would count data lines.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

// ---------------------------------------------------------------------------
// Entity / Dataset – extracted feature vectors
// ---------------------------------------------------------------------------

/// One team: its label and numeric feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub label: String,
    pub features: Vec<f64>,
}

/// All extracted entities in input order. Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    entities: Vec<Entity>,
    /// Names of the feature columns, in vector order.
    feature_names: Vec<String>,
}

impl Dataset {
    pub fn new(entities: Vec<Entity>, feature_names: Vec<String>) -> Self {
        Dataset {
            entities,
            feature_names,
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Entity labels in order.
    pub fn labels(&self) -> Vec<String> {
        self.entities.iter().map(|e| e.label.clone()).collect()
    }

    /// Length shared by every feature vector.
    pub fn dimension(&self) -> usize {
        self.feature_names.len()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

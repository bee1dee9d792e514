//! Columns, rows and tables.
//!
//! A [`Table`] owns an ordered schema and an ordered sequence of rows. Row
//! order is fetch order; it matters for read output but not for
//! reconciliation. Columns are addressed by id inside rows and by title from
//! the outside, so every table keeps a title index built once at
//! construction.

use crate::{CellValue, ColumnId, Error, Result, RowId, SheetId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The kind a column is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnKind {
    Number,
    Text,
    Boolean,
    Date,
    #[serde(rename = "DATETIME")]
    DateTime,
    Unknown,
}

impl ColumnKind {
    /// Maps a Smartsheet column `type` to a kind.
    ///
    /// `TEXT_NUMBER` columns accept both, and are reported as text; the
    /// display schema of an assembled table narrows them further.
    #[must_use]
    pub fn from_api_type(api_type: &str) -> Self {
        match api_type {
            "CHECKBOX" => Self::Boolean,
            "TEXT_NUMBER" => Self::Text,
            "DATE" => Self::Date,
            "DATETIME" | "ABSTRACT_DATETIME" => Self::DateTime,
            _ => Self::Unknown,
        }
    }

    /// Returns true if the store declares no narrower type than text.
    #[must_use]
    pub const fn is_loosely_typed(self) -> bool {
        matches!(self, Self::Text | Self::Unknown)
    }
}

/// A column of a table. Identity is `id`; `title` is the display key and is
/// unique within a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
        }
    }
}

/// A row of a table.
///
/// `id` is set for rows that exist remotely. A column without an entry in
/// `cells` has no value, which is distinct from an explicit empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: Option<RowId>,
    pub cells: HashMap<ColumnId, CellValue>,
}

impl Row {
    /// Creates a row with no id and no cells.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty remote row.
    pub fn with_id(id: RowId) -> Self {
        Self {
            id: Some(id),
            cells: HashMap::new(),
        }
    }

    /// Builder-style cell setter.
    #[must_use]
    pub fn cell(mut self, column: ColumnId, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column, value.into());
        self
    }

    /// Sets a cell value.
    pub fn set(&mut self, column: ColumnId, value: CellValue) {
        self.cells.insert(column, value);
    }

    /// Returns the value under a column, if any.
    #[must_use]
    pub fn get(&self, column: ColumnId) -> Option<&CellValue> {
        self.cells.get(&column)
    }
}

/// An aggregate view's backing sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSheet {
    pub id: SheetId,
    pub name: String,
}

/// An ordered schema plus an ordered sequence of rows.
///
/// Invariant: every row's cells reference only column ids in the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
    by_title: HashMap<String, usize>,
    ids: HashSet<ColumnId>,
}

impl Table {
    /// Creates an empty table. Fails on duplicate titles or ids.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut by_title = HashMap::with_capacity(columns.len());
        let mut ids = HashSet::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            if !ids.insert(column.id) {
                return Err(Error::DuplicateColumnId(column.id));
            }
            if by_title.insert(column.title.clone(), idx).is_some() {
                return Err(Error::DuplicateColumnTitle(column.title.clone()));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
            by_title,
            ids,
        })
    }

    /// Creates a table from titles alone, assigning column ids positionally.
    /// Used for local tables, whose columns have no remote identity.
    pub fn from_titles<I, S>(titles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = titles
            .into_iter()
            .enumerate()
            .map(|(idx, title)| Column::new(ColumnId::new(idx as i64), title, ColumnKind::Unknown))
            .collect();
        Self::new(columns)
    }

    /// Appends a row, checking it only references known columns.
    pub fn push_row(&mut self, row: Row) -> Result<()> {
        if let Some(unknown) = row.cells.keys().find(|id| !self.has_column_id(**id)) {
            return Err(Error::UnknownColumn(*unknown));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Appends rows in order, stopping at the first invalid one.
    pub fn extend_rows(&mut self, rows: impl IntoIterator<Item = Row>) -> Result<()> {
        for row in rows {
            self.push_row(row)?;
        }
        Ok(())
    }

    /// Appends a local row given `(title, value)` pairs.
    pub fn push_values<'a, I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, CellValue)>,
    {
        let mut row = Row::new();
        for (title, value) in values {
            let column = self
                .column_by_title(title)
                .ok_or_else(|| Error::UnknownTitle(title.to_string()))?;
            row.set(column.id, value);
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column titles in schema order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.title.as_str())
    }

    /// Looks a column up by title.
    pub fn column_by_title(&self, title: &str) -> Option<&Column> {
        self.by_title.get(title).map(|idx| &self.columns[*idx])
    }

    /// Returns true if a column with this title exists.
    pub fn has_title(&self, title: &str) -> bool {
        self.by_title.contains_key(title)
    }

    fn has_column_id(&self, id: ColumnId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns the value of `row` under the column titled `title`.
    pub fn value<'a>(&self, row: &'a Row, title: &str) -> Option<&'a CellValue> {
        self.column_by_title(title).and_then(|c| row.get(c.id))
    }

    /// Iterates one column's values in row order.
    pub fn column_values(&self, id: ColumnId) -> impl Iterator<Item = Option<&CellValue>> {
        self.rows.iter().map(move |r| r.get(id))
    }
}

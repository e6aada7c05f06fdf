use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A loosely-typed spreadsheet cell, as produced by the workbook decoders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl Cell {
    /// True for missing cells and whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => n.is_nan(),
            Cell::Date(_) => false,
        }
    }

    /// Text form of the cell, trimmed. Numbers use the shortest round-trip
    /// representation (`100.0` renders as `100`), dates render day-first.
    pub fn render(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) if n.is_nan() => String::new(),
            Cell::Number(n) => n.to_string(),
            Cell::Date(dt) => dt.format("%d/%m/%Y").to_string(),
        }
    }

    /// The rendered text, or `None` when the cell is empty.
    pub fn text(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.render())
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::Date(value)
    }
}

/// Rows of cells of variable width, read-only to the extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGrid {
    rows: Vec<Vec<Cell>>,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, col)`; out-of-range reads yield `None`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

impl From<Vec<Vec<Cell>>> for RawGrid {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Self::new(rows)
    }
}

/// Builds a text-only grid, mostly handy in tests: `""` becomes an empty cell.
impl<const N: usize> From<Vec<[&str; N]>> for RawGrid {
    fn from(rows: Vec<[&str; N]>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Cell::from).collect())
                .collect(),
        )
    }
}

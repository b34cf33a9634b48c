//! Renderer-agnostic table model.

use serde::Serialize;

/// Placeholder shown for missing optional fields.
pub const PLACEHOLDER: &str = "-";

/// Visual tone of a badge cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    /// Highlighted (e.g. a running instance).
    Success,
    /// Everything else.
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "tone")]
pub enum CellStyle {
    Plain,
    /// Identifiers and addresses, shown in a fixed-width face.
    Mono,
    Badge(BadgeTone),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::Plain,
        }
    }

    pub fn mono(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::Mono,
        }
    }

    pub fn badge(text: impl Into<String>, tone: BadgeTone) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::Badge(tone),
        }
    }

    /// Plain cell for an optional value, `-` when absent.
    pub fn plain_or_dash(text: Option<&str>) -> Self {
        Self::plain(text.unwrap_or(PLACEHOLDER))
    }

    /// Mono cell for an optional value, `-` when absent.
    pub fn mono_or_dash(text: Option<&str>) -> Self {
        Self::mono(text.unwrap_or(PLACEHOLDER))
    }
}

/// One titled table: a header row plus one row per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableView {
    pub fn new(title: impl Into<String>, columns: Vec<&'static str>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Text of the cell at `row`/`column`, if both exist.
    pub fn cell_text(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| *c == column)?;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(index))
            .map(|cell| cell.text.as_str())
    }

    /// Display width of each column: the widest of the header and its cells.
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.text.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

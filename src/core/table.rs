//! Generic searchable tables.
//!
//! Every entity screen and report renders through the same pipeline: a slice
//! of typed rows, a set of search fields, and column descriptors go in; a
//! [`TableView`] of already-rendered cells comes out. The UI only has to lay
//! the cells out.

use chrono::NaiveDate;
use std::fmt;

/// Message shown in place of an empty table.
pub const EMPTY_MESSAGE: &str = "No data available.";

/// Placeholder rendered for missing or empty values.
pub const PLACEHOLDER: &str = "-";

/// A field value read off a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The row has no value for this field
    Missing,
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl Value {
    /// The text a search query is matched against, `None` when missing.
    ///
    /// Lists join without spaces and numbers print in shortest form, so
    /// `[50.0, 40.0]` searches as `"50,40"`.
    #[must_use]
    pub fn search_text(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Text(text) => Some(text.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::List(items) => Some(items.join(",")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// How a column renders when it has no custom renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Categorical badge keyed on the value's wording
    Status,
    /// Currency, two decimals
    Money,
    /// Swatch of the row's hex code
    ColorPreview,
    /// Text, lists comma-joined
    Plain,
}

/// A typed field key of some row type.
pub trait ColumnKey: Copy + Eq + fmt::Debug {
    /// The default rendering category of this field.
    fn cell_kind(self) -> CellKind {
        CellKind::Plain
    }
}

/// A record type that can be listed, searched and rendered.
pub trait Row {
    /// The closed set of fields this row exposes.
    type Field: ColumnKey;

    /// Reads one field.
    fn value(&self, field: Self::Field) -> Value;

    /// Hex color used by a color-preview column.
    fn hex_code(&self) -> Option<&str> {
        None
    }

    /// Date used by report date windows; `None` means undated.
    fn date(&self) -> Option<NaiveDate> {
        None
    }
}

/// Badge styles, in the UI library's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
    Outline,
}

impl BadgeVariant {
    /// Picks a style from the wording of a status label.
    #[must_use]
    pub fn for_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("completed") || lower.contains("in stock") {
            Self::Default
        } else if lower.contains("low") || lower.contains("pending") {
            Self::Secondary
        } else if lower.contains("out") {
            Self::Destructive
        } else {
            Self::Outline
        }
    }
}

/// One rendered table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Badge { variant: BadgeVariant, label: String },
    Money(f64),
    Swatch { hex: String },
    Placeholder,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Badge { label, .. } => f.write_str(label),
            Self::Money(amount) => write!(f, "${amount:.2}"),
            Self::Swatch { hex } => f.write_str(hex),
            Self::Placeholder => f.write_str(PLACEHOLDER),
        }
    }
}

/// Custom cell renderer for one column.
pub type Renderer<R> = fn(&R) -> Cell;

/// A column descriptor: which field, under which header, rendered how.
pub struct Column<R: Row> {
    pub field: R::Field,
    pub label: &'static str,
    pub render: Option<Renderer<R>>,
}

impl<R: Row> Column<R> {
    /// A column using the default rendering policy.
    #[must_use]
    pub const fn new(field: R::Field, label: &'static str) -> Self {
        Self {
            field,
            label,
            render: None,
        }
    }

    /// Replaces the default rendering with `render`.
    #[must_use]
    pub const fn with_renderer(mut self, render: Renderer<R>) -> Self {
        self.render = Some(render);
        self
    }

    /// Renders this column's cell for `row`.
    pub fn render(&self, row: &R) -> Cell {
        match self.render {
            Some(render) => render(row),
            None => default_cell(self.field, row),
        }
    }
}

impl<R: Row> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            label: self.label,
            render: self.render,
        }
    }
}

impl<R: Row> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("label", &self.label)
            .field("custom", &self.render.is_some())
            .finish()
    }
}

/// The default rendering policy, keyed on the field's [`CellKind`].
pub fn default_cell<R: Row>(field: R::Field, row: &R) -> Cell {
    let value = row.value(field);
    match field.cell_kind() {
        CellKind::Money => match value {
            Value::Number(amount) => Cell::Money(amount),
            Value::Text(text) => Cell::Money(text.trim().parse().unwrap_or(0.0)),
            Value::Missing | Value::List(_) => Cell::Money(0.0),
        },
        CellKind::Status => match value.search_text() {
            Some(label) if !label.is_empty() => Cell::Badge {
                variant: BadgeVariant::for_label(&label),
                label,
            },
            _ => Cell::Placeholder,
        },
        CellKind::ColorPreview => match row.hex_code() {
            Some(hex) if !hex.is_empty() => Cell::Swatch {
                hex: hex.to_string(),
            },
            _ => plain_cell(value),
        },
        CellKind::Plain => plain_cell(value),
    }
}

fn plain_cell(value: Value) -> Cell {
    match value {
        Value::Missing => Cell::Placeholder,
        Value::Text(text) if text.is_empty() => Cell::Placeholder,
        Value::Text(text) => Cell::Text(text),
        Value::Number(n) => Cell::Text(n.to_string()),
        Value::List(items) if items.is_empty() => Cell::Placeholder,
        Value::List(items) => Cell::Text(items.join(", ")),
    }
}

/// Whether any of `fields` of `row` contains the already-lowercased query.
pub fn matches_query<R: Row>(row: &R, fields: &[R::Field], lowered_query: &str) -> bool {
    fields.iter().any(|&field| {
        row.value(field)
            .search_text()
            .is_some_and(|text| text.to_lowercase().contains(lowered_query))
    })
}

/// Case-insensitive substring search over the designated fields.
///
/// An empty query returns every row. Order is always preserved.
pub fn search<'a, R: Row + 'a>(
    rows: impl IntoIterator<Item = &'a R>,
    fields: &[R::Field],
    query: &str,
) -> Vec<&'a R> {
    if query.is_empty() {
        return rows.into_iter().collect();
    }
    let lowered = query.to_lowercase();
    rows.into_iter()
        .filter(|row| matches_query(*row, fields, &lowered))
        .collect()
}

/// A filtered, rendered, read-only table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableView {
    /// Searches `rows` and renders every surviving row through `columns`.
    pub fn build<'a, R: Row + 'a>(
        rows: impl IntoIterator<Item = &'a R>,
        columns: &[Column<R>],
        search_fields: &[R::Field],
        query: &str,
    ) -> Self {
        let rendered = search(rows, search_fields, query)
            .into_iter()
            .map(|row| columns.iter().map(|column| column.render(row)).collect())
            .collect();

        Self {
            headers: columns.iter().map(|column| column.label).collect(),
            rows: rendered,
        }
    }

    /// Whether no row survived the search.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

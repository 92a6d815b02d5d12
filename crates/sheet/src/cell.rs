use crate::style::CellStyle;
use std::fmt;
use std::sync::Arc;

/// A static cell value; the variant doubles as the cell's type tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// Check if the value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Null or the empty string. Whitespace-only strings are not empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Borrow the value as text if it is a string
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a float
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(fl) => write!(f, "{fl}"),
            CellValue::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// A grid cell: either a real value or a placeholder inside a merged range
/// whose value lives on the range's anchor (top-left) cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Value {
        value: CellValue,
        style: Option<Arc<CellStyle>>,
    },
    MergeContinuation {
        style: Option<Arc<CellStyle>>,
    },
}

static NULL_VALUE: CellValue = CellValue::Null;

static EMPTY_CELL: Cell = Cell::Value {
    value: CellValue::Null,
    style: None,
};

impl Cell {
    /// A shared empty, unstyled cell returned for positions with no data
    pub fn empty() -> &'static Cell {
        &EMPTY_CELL
    }

    pub fn new<T: Into<CellValue>>(value: T) -> Self {
        Cell::Value {
            value: value.into(),
            style: None,
        }
    }

    pub fn styled<T: Into<CellValue>>(value: T, style: Arc<CellStyle>) -> Self {
        Cell::Value {
            value: value.into(),
            style: Some(style),
        }
    }

    #[must_use]
    pub fn is_merge_continuation(&self) -> bool {
        matches!(self, Cell::MergeContinuation { .. })
    }

    /// The cell value; placeholders read as null
    #[must_use]
    pub fn value(&self) -> &CellValue {
        match self {
            Cell::Value { value, .. } => value,
            Cell::MergeContinuation { .. } => &NULL_VALUE,
        }
    }

    #[must_use]
    pub fn style(&self) -> Option<&Arc<CellStyle>> {
        match self {
            Cell::Value { style, .. } | Cell::MergeContinuation { style } => style.as_ref(),
        }
    }

    pub fn set_style(&mut self, new_style: Option<Arc<CellStyle>>) {
        match self {
            Cell::Value { style, .. } | Cell::MergeContinuation { style } => *style = new_style,
        }
    }

    /// A null, unstyled value cell. Placeholders are never blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Value { value, style } => value.is_null() && style.is_none(),
            Cell::MergeContinuation { .. } => false,
        }
    }

    /// Turn this cell into a merge placeholder, keeping its style
    #[must_use]
    pub fn into_continuation(self) -> Cell {
        match self {
            Cell::Value { style, .. } => Cell::MergeContinuation { style },
            continuation @ Cell::MergeContinuation { .. } => continuation,
        }
    }
}

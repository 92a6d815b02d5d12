use crate::a1_notation::parse_a1;
use crate::cell::{Cell, CellValue};
use crate::error::{Result, SheetError};
use crate::merge::MergedRange;
use crate::style::CellStyle;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub header: f64,
    pub footer: f64,
}

impl Default for PageMargins {
    fn default() -> Self {
        PageMargins {
            left: 0.7,
            right: 0.7,
            top: 0.75,
            bottom: 0.75,
            header: 0.3,
            footer: 0.3,
        }
    }
}

/// A sparse, 1-based cell grid with merged ranges and size metadata
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u32), Cell>,
    merged: Vec<MergedRange>,
    column_widths: BTreeMap<u32, f64>,
    row_heights: BTreeMap<u32, f64>,
    default_row_height: Option<f64>,
    page_margins: Option<PageMargins>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            ..Sheet::default()
        }
    }

    /// Create a sheet from rows of values; `data[0][0]` lands in A1
    #[must_use]
    pub fn from_data<T: Into<CellValue> + Clone>(data: Vec<Vec<T>>) -> Self {
        let mut sheet = Sheet::new();
        for (r, row) in data.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                let value = value.into();
                if !value.is_null() {
                    sheet.set_value(r as u32 + 1, c as u32 + 1, value);
                }
            }
        }
        sheet
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    // ===== Cell Access =====

    /// The cell at (row, col); unset positions read as an empty cell
    #[must_use]
    pub fn cell(&self, row: u32, col: u32) -> &Cell {
        self.cells.get(&(row, col)).unwrap_or(Cell::empty())
    }

    /// Get a cell by A1 notation (e.g., "B3")
    pub fn get_a1(&self, notation: &str) -> Result<&Cell> {
        let (row, col) = parse_a1(notation)?;
        Ok(self.cell(row, col))
    }

    /// Replace the cell at (row, col)
    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) {
        if cell.is_blank() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), cell);
        }
    }

    /// Set a value, keeping the existing style of that position
    pub fn set_value<T: Into<CellValue>>(&mut self, row: u32, col: u32, value: T) {
        let style = self.cell(row, col).style().cloned();
        self.set_cell(
            row,
            col,
            Cell::Value {
                value: value.into(),
                style,
            },
        );
    }

    /// Set a value by A1 notation
    pub fn set_a1<T: Into<CellValue>>(&mut self, notation: &str, value: T) -> Result<()> {
        let (row, col) = parse_a1(notation)?;
        self.set_value(row, col, value);
        Ok(())
    }

    /// Set the style of a position, keeping its value
    pub fn set_style(&mut self, row: u32, col: u32, style: Option<Arc<CellStyle>>) {
        let mut cell = self.cell(row, col).clone();
        cell.set_style(style);
        self.set_cell(row, col, cell);
    }

    /// All non-blank cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u32), &Cell)> + '_ {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    /// Number of stored cells
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Highest row holding a stored cell (0 when empty)
    #[must_use]
    pub fn max_row(&self) -> u32 {
        self.cells.keys().next_back().map_or(0, |(row, _)| *row)
    }

    /// Highest column holding a stored cell (0 when empty)
    #[must_use]
    pub fn max_col(&self) -> u32 {
        self.cells.keys().map(|(_, col)| *col).max().unwrap_or(0)
    }

    // ===== Merged Ranges =====

    /// Merge a range: every non-anchor position becomes a placeholder
    /// keeping whatever style it had. Overlapping merges are rejected.
    pub fn merge(&mut self, range: MergedRange) -> Result<()> {
        if let Some(existing) = self.merged.iter().find(|m| !m.is_disjoint(&range)) {
            return Err(SheetError::MergeOverlap {
                range: range.to_string(),
                existing: existing.to_string(),
            });
        }

        for (row, col) in range.continuation_positions() {
            let cell = self
                .cells
                .remove(&(row, col))
                .map_or(Cell::MergeContinuation { style: None }, Cell::into_continuation);
            self.cells.insert((row, col), cell);
        }
        self.merged.push(range);
        Ok(())
    }

    /// Merge a range given in A1 notation (e.g., "B4:B6")
    pub fn merge_a1(&mut self, notation: &str) -> Result<()> {
        self.merge(MergedRange::parse(notation)?)
    }

    #[must_use]
    pub fn merged_ranges(&self) -> &[MergedRange] {
        &self.merged
    }

    /// The merged range a position belongs to, if any
    #[must_use]
    pub fn merged_range_at(&self, row: u32, col: u32) -> Option<&MergedRange> {
        self.merged.iter().find(|m| m.contains(row, col))
    }

    // ===== Size Metadata =====

    #[must_use]
    pub fn column_width(&self, col: u32) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn set_column_width(&mut self, col: u32, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.column_widths.iter().map(|(col, width)| (*col, *width))
    }

    #[must_use]
    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn row_heights(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.row_heights.iter().map(|(row, height)| (*row, *height))
    }

    #[must_use]
    pub fn default_row_height(&self) -> Option<f64> {
        self.default_row_height
    }

    pub fn set_default_row_height(&mut self, height: Option<f64>) {
        self.default_row_height = height;
    }

    #[must_use]
    pub fn page_margins(&self) -> Option<PageMargins> {
        self.page_margins
    }

    pub fn set_page_margins(&mut self, margins: Option<PageMargins>) {
        self.page_margins = margins;
    }
}

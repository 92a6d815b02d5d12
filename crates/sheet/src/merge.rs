use crate::a1_notation::{cell_address, parse_a1_range};
use crate::error::Result;
use std::fmt;

/// A merged rectangle, 1-based and inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MergedRange {
    pub min_row: u32,
    pub min_col: u32,
    pub max_row: u32,
    pub max_col: u32,
}

impl MergedRange {
    /// Build a range from two corners in any order.
    pub fn new(row1: u32, col1: u32, row2: u32, col2: u32) -> Self {
        MergedRange {
            min_row: row1.min(row2),
            min_col: col1.min(col2),
            max_row: row1.max(row2),
            max_col: col1.max(col2),
        }
    }

    /// Parse `"B4:B7"` style notation.
    pub fn parse(notation: &str) -> Result<Self> {
        let ((min_row, min_col), (max_row, max_col)) = parse_a1_range(notation)?;
        Ok(MergedRange {
            min_row,
            min_col,
            max_row,
            max_col,
        })
    }

    /// The top-left cell, which owns the range's value and style.
    pub fn anchor(&self) -> (u32, u32) {
        (self.min_row, self.min_col)
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.min_row..=self.max_row).contains(&row) && (self.min_col..=self.max_col).contains(&col)
    }

    pub fn is_disjoint(&self, other: &MergedRange) -> bool {
        self.max_row < other.min_row
            || other.max_row < self.min_row
            || self.max_col < other.min_col
            || other.max_col < self.min_col
    }

    pub fn is_single_cell(&self) -> bool {
        self.min_row == self.max_row && self.min_col == self.max_col
    }

    /// A one-column span covering more than one row.
    pub fn is_vertical_strip(&self) -> bool {
        self.min_col == self.max_col && self.min_row < self.max_row
    }

    /// Every (row, col) position except the anchor.
    pub fn continuation_positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.min_row..=self.max_row)
            .flat_map(move |row| (self.min_col..=self.max_col).map(move |col| (row, col)))
            .filter(move |&pos| pos != self.anchor())
    }
}

impl fmt::Display for MergedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            cell_address(self.min_row, self.min_col),
            cell_address(self.max_row, self.max_col)
        )
    }
}

//! Locating the group-label cell that ends a sheet's header.

use crate::detail::SheetDetail;
use xlsplit_sheet::{cell_address, Sheet};

/// Rows scanned for the group label (1..=10).
pub const SEARCH_ROWS: u32 = 10;
/// Columns scanned for the group label and copied as header (A..=BZ).
pub const HEADER_COLUMNS: u32 = 78;

/// Finds the group label in the top-left window of a sheet.
#[derive(Debug, Clone)]
pub struct HeaderDetector {
    label: String,
}

impl HeaderDetector {
    pub fn new(label: impl Into<String>) -> Self {
        HeaderDetector {
            label: label.into(),
        }
    }

    /// First `(row, col)` in row-major order whose string value, trimmed,
    /// equals the label. Merge placeholders never match.
    pub fn locate(&self, sheet: &Sheet) -> Option<(u32, u32)> {
        (1..=SEARCH_ROWS)
            .flat_map(|row| (1..=HEADER_COLUMNS).map(move |col| (row, col)))
            .find(|&(row, col)| {
                sheet
                    .cell(row, col)
                    .value()
                    .as_text()
                    .is_some_and(|text| text.trim() == self.label)
            })
    }

    /// Default sheet detail with header boundaries from the label position,
    /// or row 1 / `A1` when the label is absent.
    pub fn detect(&self, sheet: &Sheet) -> SheetDetail {
        match self.locate(sheet) {
            Some((row, col)) => {
                let key_cell = cell_address(row, col);
                tracing::debug!("sheet '{}': group label at {}", sheet.name(), key_cell);
                SheetDetail {
                    title_row2: row,
                    key_cell,
                    ..SheetDetail::default()
                }
            }
            None => {
                tracing::debug!(
                    "sheet '{}': group label '{}' not found, using A1",
                    sheet.name(),
                    self.label
                );
                SheetDetail::default()
            }
        }
    }
}

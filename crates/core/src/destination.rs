use crate::error::{SplitError, SplitResult};
use xlsplit_sheet::{Book, Cell};

/// One output workbook being filled during a generation run.
#[derive(Debug, Clone)]
pub struct DestinationDocument {
    identifier: String,
    book: Book,
    cursor: u32,
    dirty: bool,
    rows_written: usize,
}

impl DestinationDocument {
    /// Start from a copy of the header template book.
    pub fn new(identifier: &str, template: &Book) -> Self {
        let mut book = template.clone();
        book.set_name(identifier);
        DestinationDocument {
            identifier: identifier.to_string(),
            book,
            cursor: 1,
            dirty: false,
            rows_written: 0,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Whether any row was ever written.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Row the next `write_row` lands on.
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Make `sheet` active and move the cursor to `first_row`.
    pub fn begin_sheet(&mut self, sheet: &str, first_row: u32) -> SplitResult<()> {
        self.book
            .set_active_sheet(sheet)
            .map_err(|_| SplitError::UnknownSheet(sheet.to_string()))?;
        self.cursor = first_row;
        Ok(())
    }

    /// Write `(column, cell)` pairs on the cursor row of the active sheet.
    ///
    /// Positions covered by a header merge stay placeholders.
    pub fn write_row<I>(&mut self, cells: I) -> SplitResult<()>
    where
        I: IntoIterator<Item = (u32, Cell)>,
    {
        let row = self.cursor;
        let name = self.book.active_sheet_name().unwrap_or_default().to_string();
        let sheet = self
            .book
            .active_sheet_mut()
            .ok_or(SplitError::UnknownSheet(name))?;
        for (col, cell) in cells {
            if !sheet.cell(row, col).is_merge_continuation() {
                sheet.set_cell(row, col, cell);
            }
        }
        self.cursor += 1;
        self.dirty = true;
        self.rows_written += 1;
        Ok(())
    }
}

//! Header templates: the formatted header of a sheet, cloned once and
//! replayed into every destination.

use crate::detail::SheetDetail;
use crate::detect::HEADER_COLUMNS;
use crate::error::SplitResult;
use std::collections::BTreeSet;
use xlsplit_sheet::{Book, Cell, MergedRange, Sheet};

/// The cloned header of one sheet plus what the clone revealed about it.
#[derive(Debug, Clone)]
pub struct HeaderTemplate {
    pub sheet: Sheet,
    /// Rightmost header column holding a non-empty value, at least 1.
    pub title_column2: u32,
    /// Columns with a one-column merge crossing the header boundary.
    pub merged_carry_columns: BTreeSet<u32>,
}

/// Clones header rectangles `[title_row1..=title_row2] x [A..=BZ]`.
pub struct HeaderCloner;

impl HeaderCloner {
    /// Build the header template of `source`.
    pub fn clone_header(source: &Sheet, detail: &SheetDetail) -> SplitResult<HeaderTemplate> {
        let header = MergedRange::new(detail.title_row1, 1, detail.title_row2, HEADER_COLUMNS);
        let rows = header.min_row..=header.max_row;
        let mut sheet = Sheet::with_name(source.name());

        // Merges keep their full geometry even when they only clip the header
        for range in source.merged_ranges() {
            if !range.is_disjoint(&header) {
                sheet.merge(*range)?;
            }
        }

        let mut title_column2 = 1;
        for row in rows.clone() {
            for col in 1..=HEADER_COLUMNS {
                let cell = source.cell(row, col);
                if !cell.value().is_empty() {
                    title_column2 = title_column2.max(col);
                }
                copy_header_cell(cell, &mut sheet, row, col);
            }
        }

        for row in rows {
            if let Some(height) = source.row_height(row) {
                sheet.set_row_height(row, height);
            }
        }
        for col in 1..=HEADER_COLUMNS {
            if let Some(width) = source.column_width(col) {
                sheet.set_column_width(col, width);
            }
        }
        sheet.set_default_row_height(source.default_row_height());
        sheet.set_page_margins(source.page_margins());

        let merged_carry_columns = carry_columns(source, detail.title_row2);

        Ok(HeaderTemplate {
            sheet,
            title_column2,
            merged_carry_columns,
        })
    }

    /// A book holding every template in order, the seed of each destination.
    pub fn seed_book<'a, I>(templates: I) -> SplitResult<Book>
    where
        I: IntoIterator<Item = &'a HeaderTemplate>,
    {
        let mut book = Book::with_name("header");
        for template in templates {
            book.add_sheet(template.sheet.name(), template.sheet.clone())?;
        }
        Ok(book)
    }
}

/// Value and type for real cells; placeholders contribute their style only.
fn copy_header_cell(cell: &Cell, target: &mut Sheet, row: u32, col: u32) {
    match cell {
        Cell::Value { .. } => {
            if target.cell(row, col).is_merge_continuation() {
                target.set_style(row, col, cell.style().cloned());
            } else {
                target.set_cell(row, col, cell.clone());
            }
        }
        Cell::MergeContinuation { style } => {
            if style.is_some() {
                target.set_style(row, col, style.clone());
            }
        }
    }
}

/// Columns of single-column merges with `min_row <= title_row2 < max_row`.
fn carry_columns(source: &Sheet, title_row2: u32) -> BTreeSet<u32> {
    source
        .merged_ranges()
        .iter()
        .filter(|range| {
            range.is_vertical_strip() && range.min_row <= title_row2 && title_row2 < range.max_row
        })
        .map(|range| range.min_col)
        .collect()
}

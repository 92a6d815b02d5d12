//! Row routing: scanning a sheet's data block, classifying each row's
//! group key and copying matched rows into destinations.

use crate::config::SplitConfig;
use crate::destination::DestinationDocument;
use crate::detail::SheetDetail;
use crate::error::SplitResult;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use xlsplit_sheet::{Cell, Sheet};

/// Reverse index from trimmed group key to destination positions.
#[derive(Debug, Clone, Default)]
pub struct RoutingIndex {
    routes: HashMap<String, Vec<usize>>,
    ignored: HashSet<String>,
}

/// What a routed key resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// Positions of the destinations receiving the row, in export-map order.
    Mapped(&'a [usize]),
    Ignored,
    Unclassified,
}

impl RoutingIndex {
    /// Index the export map; positions follow `config.export_map` order.
    pub fn new(config: &SplitConfig) -> Self {
        let mut routes: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, target) in config.export_map.values().enumerate() {
            for key in target.keys() {
                let entry = routes.entry(key.trim().to_string()).or_default();
                if !entry.contains(&position) {
                    entry.push(position);
                }
            }
        }
        let ignored = config
            .ignore_list
            .iter()
            .map(|key| key.trim().to_string())
            .collect();
        RoutingIndex { routes, ignored }
    }

    pub fn classify(&self, key: &str) -> Route<'_> {
        match self.routes.get(key) {
            Some(positions) => Route::Mapped(positions),
            None if self.ignored.contains(key) => Route::Ignored,
            None => Route::Unclassified,
        }
    }
}

/// Why a data row was passed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The key cell is a merge placeholder; the row goes nowhere.
    MergedKey,
    /// The key cell holds a number or boolean.
    NotText,
    /// The key cell text is whitespace only.
    BlankKey,
}

/// Outcome of one scanned data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStep {
    Skip(SkipReason),
    /// Route the row under this trimmed key.
    Route(String),
    /// Empty, unmerged key cell: the data block ends here.
    Terminate,
}

/// Walks a sheet's data rows downward from a start row, yielding
/// `(row, step)` until and including the terminating row.
pub struct RowScanner<'a> {
    sheet: &'a Sheet,
    key_column: u32,
    row: u32,
    finished: bool,
}

impl<'a> RowScanner<'a> {
    pub fn new(sheet: &'a Sheet, key_column: u32, first_row: u32) -> Self {
        RowScanner {
            sheet,
            key_column,
            row: first_row,
            finished: false,
        }
    }

    /// Classify a key cell.
    pub fn step(cell: &Cell) -> RowStep {
        if cell.is_merge_continuation() {
            return RowStep::Skip(SkipReason::MergedKey);
        }
        let value = cell.value();
        if value.is_empty() {
            return RowStep::Terminate;
        }
        match value.as_text().map(str::trim) {
            None => RowStep::Skip(SkipReason::NotText),
            Some("") => RowStep::Skip(SkipReason::BlankKey),
            Some(key) => RowStep::Route(key.to_string()),
        }
    }
}

impl Iterator for RowScanner<'_> {
    type Item = (u32, RowStep);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let row = self.row;
        let step = Self::step(self.sheet.cell(row, self.key_column));
        match step {
            RowStep::Terminate => self.finished = true,
            _ => match row.checked_add(1) {
                Some(next) => self.row = next,
                None => self.finished = true,
            },
        }
        Some((row, step))
    }
}

/// Last non-placeholder cell seen per column while copying one sheet.
#[derive(Debug, Default)]
pub struct AnchorTracker {
    last_seen: HashMap<u32, Cell>,
}

impl AnchorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell whose content lands at `(row, col)`.
    ///
    /// Placeholders in carry columns resolve to the tracked cell, or to the
    /// nearest real cell above when the merge began inside the header. Any
    /// other cell is used as is and becomes the tracked cell for its column.
    pub fn resolve(
        &mut self,
        sheet: &Sheet,
        row: u32,
        col: u32,
        carry: bool,
    ) -> Cell {
        let cell = sheet.cell(row, col);
        if cell.is_merge_continuation() && carry {
            if let Some(anchor) = self.last_seen.get(&col) {
                return anchor.clone();
            }
            let anchor = (1..row)
                .rev()
                .map(|r| sheet.cell(r, col))
                .find(|c| !c.is_merge_continuation())
                .unwrap_or(Cell::empty())
                .clone();
            self.last_seen.insert(col, anchor.clone());
            return anchor;
        }
        self.last_seen.insert(col, cell.clone());
        cell.clone()
    }

    pub fn get(&self, col: u32) -> Option<&Cell> {
        self.last_seen.get(&col)
    }
}

/// Reduce a resolved cell to what data rows carry: value plus the
/// number format, alignment and RGB font color of its style.
fn data_cell(cell: &Cell) -> Cell {
    let style = cell
        .style()
        .map(|style| style.data_row_subset())
        .filter(|style| !style.is_default())
        .map(Arc::new);
    Cell::Value {
        value: cell.value().clone(),
        style,
    }
}

/// Copy columns `1..=title_column2` of source `row` into the destination's
/// current row and advance its cursor.
pub fn copy_row(
    source: &Sheet,
    row: u32,
    detail: &SheetDetail,
    tracker: &mut AnchorTracker,
    destination: &mut DestinationDocument,
) -> SplitResult<()> {
    let cells = (1..=detail.title_column2).map(|col| {
        let carry = detail.merged_carry_columns.contains(&col);
        (col, data_cell(&tracker.resolve(source, row, col, carry)))
    });
    destination.write_row(cells)
}

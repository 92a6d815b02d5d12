//! Per-sheet header boundaries and export flags.

use crate::error::{SplitError, SplitResult};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use xlsplit_sheet::parse_a1;

/// Header geometry and routing settings of one source sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetDetail {
    /// First header row.
    pub title_row1: u32,
    /// Last header row; data starts on the row below.
    pub title_row2: u32,
    /// Rightmost header column with content. Recomputed on every run.
    pub title_column2: u32,
    /// A1 address of the group-label cell; its column is the key column.
    pub key_cell: String,
    /// Whether the sheet takes part in generation.
    pub output: bool,
    /// Columns whose merge continuations inherit the value above them.
    /// Recomputed on every run.
    pub merged_carry_columns: BTreeSet<u32>,
}

impl Default for SheetDetail {
    fn default() -> Self {
        SheetDetail {
            title_row1: 1,
            title_row2: 1,
            title_column2: 1,
            key_cell: "A1".to_string(),
            output: false,
            merged_carry_columns: BTreeSet::new(),
        }
    }
}

impl SheetDetail {
    /// Column index of the key cell.
    pub fn key_column(&self, sheet: &str) -> SplitResult<u32> {
        parse_a1(&self.key_cell)
            .map(|(_, col)| col)
            .map_err(|_| SplitError::InvalidKeyCell {
                sheet: sheet.to_string(),
                cell: self.key_cell.clone(),
            })
    }

    /// First data row.
    pub fn first_data_row(&self) -> u32 {
        self.title_row2.saturating_add(1)
    }
}

/// Sheet details of one open document, keyed by sheet name in document order.
///
/// Every edit bumps `version`, so a caller can tell whether the details a
/// run reported are still current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetDetails {
    details: IndexMap<String, SheetDetail>,
    version: u64,
}

impl SheetDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, sheet: &str, detail: SheetDetail) {
        self.details.insert(sheet.to_string(), detail);
        self.version += 1;
    }

    /// Resolve run-computed fields without counting as an edit.
    pub(crate) fn get_mut(&mut self, sheet: &str) -> Option<&mut SheetDetail> {
        self.details.get_mut(sheet)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    pub fn get(&self, sheet: &str) -> Option<&SheetDetail> {
        self.details.get(sheet)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SheetDetail)> + '_ {
        self.details.iter().map(|(name, detail)| (name.as_str(), detail))
    }

    /// Names of the sheets flagged for output.
    pub fn selected(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter()
            .filter(|(_, detail)| detail.output)
            .map(|(name, _)| name)
    }

    /// Apply an edit to one sheet's detail.
    pub fn edit<F, R>(&mut self, sheet: &str, f: F) -> SplitResult<R>
    where
        F: FnOnce(&mut SheetDetail) -> R,
    {
        let detail = self
            .details
            .get_mut(sheet)
            .ok_or_else(|| SplitError::UnknownSheet(sheet.to_string()))?;
        let result = f(detail);
        self.version += 1;
        Ok(result)
    }

    /// Flag exactly the named sheets for output.
    pub fn select<'a, I>(&mut self, sheets: I) -> SplitResult<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let wanted: BTreeSet<&str> = sheets.into_iter().collect();
        if let Some(unknown) = wanted.iter().find(|name| !self.details.contains_key(**name)) {
            return Err(SplitError::UnknownSheet((*unknown).to_string()));
        }
        for (name, detail) in &mut self.details {
            detail.output = wanted.contains(name.as_str());
        }
        self.version += 1;
        Ok(())
    }
}

use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use indexmap::IndexMap;

/// A book containing multiple sheets (preserves insertion order)
#[derive(Debug, Clone)]
pub struct Book {
    name: String,
    sheets: IndexMap<String, Sheet>,
    active_sheet: Option<String>,
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

impl Book {
    /// Create a new empty book
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Book1")
    }

    /// Create a new empty book with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Book {
            name: name.to_string(),
            sheets: IndexMap::new(),
            active_sheet: None,
        }
    }

    /// Get the book name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the book name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    // ===== Sheet Access =====

    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets
            .get(name)
            .ok_or_else(|| SheetError::SheetNotFound {
                name: name.to_string(),
            })
    }

    /// Iterate sheets in document order
    pub fn sheets(&self) -> impl Iterator<Item = (&str, &Sheet)> + '_ {
        self.sheets.iter().map(|(name, sheet)| (name.as_str(), sheet))
    }

    /// Name of the active sheet
    #[must_use]
    pub fn active_sheet_name(&self) -> Option<&str> {
        self.active_sheet.as_deref()
    }

    /// Get the active sheet
    pub fn active_sheet(&self) -> Option<&Sheet> {
        self.active_sheet
            .as_ref()
            .and_then(|name| self.sheets.get(name))
    }

    /// Get the active sheet mutably
    pub fn active_sheet_mut(&mut self) -> Option<&mut Sheet> {
        let name = self.active_sheet.clone()?;
        self.sheets.get_mut(&name)
    }

    /// Set the active sheet by name
    pub fn set_active_sheet(&mut self, name: &str) -> Result<()> {
        if !self.sheets.contains_key(name) {
            return Err(SheetError::SheetNotFound {
                name: name.to_string(),
            });
        }
        self.active_sheet = Some(name.to_string());
        Ok(())
    }

    // ===== Sheet Management =====

    /// Add a sheet to the book
    pub fn add_sheet(&mut self, name: &str, sheet: Sheet) -> Result<()> {
        if self.sheets.contains_key(name) {
            return Err(SheetError::SheetAlreadyExists {
                name: name.to_string(),
            });
        }

        let mut sheet = sheet;
        sheet.set_name(name);
        self.sheets.insert(name.to_string(), sheet);

        // Set as active if first sheet
        if self.active_sheet.is_none() {
            self.active_sheet = Some(name.to_string());
        }

        Ok(())
    }
}

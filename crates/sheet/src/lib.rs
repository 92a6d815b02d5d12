//! Workbook model for xlsplit
//!
//! A sparse, 1-based cell grid that keeps what a header-preserving split
//! needs from an Excel file: cached values, per-cell styles, merged ranges,
//! column widths, row heights and page margins.
//!
//! # Examples
//!
//! ## Building a sheet
//!
//! ```
//! use xlsplit_sheet::{CellValue, Sheet};
//!
//! let mut sheet = Sheet::from_data(vec![
//!     vec!["Region", "Amount"],
//!     vec!["North", "10"],
//! ]);
//!
//! assert_eq!(sheet.get_a1("A2").unwrap().value(), &CellValue::from("North"));
//! assert_eq!(sheet.max_row(), 2);
//! ```
//!
//! ## Merged ranges
//!
//! Positions inside a merge other than its top-left anchor hold
//! placeholders; the value lives on the anchor.
//!
//! ```
//! use xlsplit_sheet::Sheet;
//!
//! let mut sheet = Sheet::new();
//! sheet.set_a1("B2", "Group").unwrap();
//! sheet.merge_a1("B2:B4").unwrap();
//!
//! assert!(sheet.get_a1("B3").unwrap().is_merge_continuation());
//! assert!(sheet.get_a1("B3").unwrap().value().is_null());
//! ```
//!
//! ## Working with books
//!
//! ```
//! use xlsplit_sheet::{Book, Sheet};
//!
//! let mut book = Book::new();
//! book.add_sheet("Data", Sheet::new()).unwrap();
//! book.add_sheet("Summary", Sheet::new()).unwrap();
//!
//! assert_eq!(book.sheet_names(), vec!["Data", "Summary"]);
//! ```
//!
//! ## Excel files
//!
//! ```no_run
//! use xlsplit_sheet::Book;
//!
//! let book = Book::from_xlsx("report.xlsx").unwrap();
//! book.save_as_xlsx("copy.xlsx").unwrap();
//! ```

mod a1_notation;
mod book;
mod cell;
mod error;
mod merge;
mod package;
mod sheet;
mod style;
mod xlsx;

/// Re-export A1 notation helpers.
pub use a1_notation::{
    cell_address, column_index_to_letters, parse_a1, parse_a1_range, MAX_ROWS,
};
/// Re-export book type.
pub use book::Book;
/// Re-export cell types.
pub use cell::{Cell, CellValue};
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export merged range type.
pub use merge::MergedRange;
/// Re-export sheet types.
pub use sheet::{PageMargins, Sheet};
/// Re-export style types.
pub use style::{
    AlignmentStyle, BorderLine, BorderStyle, CellStyle, ColorRef, FillPattern, FillStyle,
    FontStyle, HorizontalAlign, LineKind, ProtectionStyle, Underline, VerticalAlign,
};

//! # xlsplit-core
//!
//! Splits one workbook into several, routing each data row by the group
//! key in a designated column.
//!
//! This crate provides:
//! - Header detection from a configured group label
//! - Header templates cloned with values, styles, merges and sizes
//! - Row routing with merge-aware value carrying
//! - Staged, all-or-nothing output of non-empty destinations
//!
//! ```no_run
//! use xlsplit_core::{SplitConfig, Splitter};
//!
//! let config = SplitConfig::from_path("config.yml")?;
//! let mut splitter = Splitter::open("report.xlsx", config)?;
//! splitter.details_mut().select(["Orders"])?;
//! let report = splitter.generate(|event| println!("{event}"))?;
//! for key in &report.unclassified {
//!     println!("unclassified: {key}");
//! }
//! # Ok::<(), xlsplit_core::SplitError>(())
//! ```

/// YAML configuration.
pub mod config;
/// Destination workbooks filled during a run.
pub mod destination;
/// Per-sheet header boundaries.
pub mod detail;
/// Group-label detection.
pub mod detect;
/// Error types and result aliases.
pub mod error;
/// Persisting destinations.
pub mod output;
/// Progress events.
pub mod progress;
/// Row scanning, classification and copying.
pub mod router;
mod splitter;
/// Header templates.
pub mod template;

pub use config::{ExportTarget, SplitConfig};
pub use detail::{SheetDetail, SheetDetails};
/// Re-export core error types.
pub use error::{SplitError, SplitResult};
pub use progress::ProgressEvent;
pub use splitter::{GenerationReport, Splitter};

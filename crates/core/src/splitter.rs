use crate::config::SplitConfig;
use crate::destination::DestinationDocument;
use crate::detail::{SheetDetail, SheetDetails};
use crate::detect::HeaderDetector;
use crate::error::{SplitError, SplitResult};
use crate::output::OutputWriter;
use crate::progress::ProgressEvent;
use crate::router::{copy_row, AnchorTracker, Route, RoutingIndex, RowScanner, RowStep};
use crate::template::{HeaderCloner, HeaderTemplate};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use xlsplit_sheet::{Book, Sheet};

/// An open source workbook together with its configuration and the
/// editable per-sheet details.
#[derive(Debug, Clone)]
pub struct Splitter {
    book: Book,
    config: SplitConfig,
    details: SheetDetails,
}

/// Result of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Files written, in export-map order.
    pub written: Vec<PathBuf>,
    /// Destinations that received no rows.
    pub skipped: Vec<String>,
    /// Keys matching neither the export map nor the ignore list.
    pub unclassified: BTreeSet<String>,
    /// The details the run used, with `title_column2` and carry columns
    /// resolved for every exported sheet. Its version is the one the run
    /// started from.
    pub details: SheetDetails,
}

impl Splitter {
    /// Validate `config`, load the workbook and detect every sheet's header.
    pub fn open<P: AsRef<Path>>(path: P, config: SplitConfig) -> SplitResult<Self> {
        config.validate()?;
        let path = path.as_ref();
        let book = Book::from_xlsx(path).map_err(|source| SplitError::InvalidDocument {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_book(book, config)
    }

    /// Wrap an already loaded workbook.
    pub fn from_book(book: Book, config: SplitConfig) -> SplitResult<Self> {
        config.validate()?;
        let detector = HeaderDetector::new(config.group_label.clone());
        let mut details = SheetDetails::new();
        for (name, sheet) in book.sheets() {
            details.insert(name, detector.detect(sheet));
        }
        Ok(Splitter {
            book,
            config,
            details,
        })
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    pub fn details(&self) -> &SheetDetails {
        &self.details
    }

    /// Mutable access for editing details between runs.
    pub fn details_mut(&mut self) -> &mut SheetDetails {
        &mut self.details
    }

    /// Split every sheet flagged for output into the configured destinations.
    ///
    /// The run works on a snapshot of the sheet details taken at its start.
    pub fn generate<F>(&self, mut progress: F) -> SplitResult<GenerationReport>
    where
        F: FnMut(ProgressEvent),
    {
        let mut details = self.details.clone();

        progress(ProgressEvent::HeaderGeneration);
        let mut plan: Vec<(&Sheet, SheetDetail)> = Vec::new();
        let mut templates: Vec<HeaderTemplate> = Vec::new();
        for (name, sheet) in self.book.sheets() {
            let Some(detail) = details.get(name).filter(|d| d.output) else {
                continue;
            };
            let template = HeaderCloner::clone_header(sheet, detail)?;
            let resolved = match details.get_mut(name) {
                Some(d) => {
                    d.title_column2 = template.title_column2;
                    d.merged_carry_columns = template.merged_carry_columns.clone();
                    d.clone()
                }
                None => return Err(SplitError::UnknownSheet(name.to_string())),
            };
            if resolved.key_column(name)? > resolved.title_column2 {
                tracing::warn!(
                    "sheet '{}': key cell {} lies right of the last header column",
                    name,
                    resolved.key_cell
                );
            }
            plan.push((sheet, resolved));
            templates.push(template);
        }
        let seed = HeaderCloner::seed_book(&templates)?;
        tracing::info!("Generated headers for {} sheet(s)", templates.len());

        let index = RoutingIndex::new(&self.config);
        let mut destinations: Vec<DestinationDocument> = self
            .config
            .destinations()
            .map(|id| DestinationDocument::new(id, &seed))
            .collect();
        let mut unclassified = BTreeSet::new();

        let total = plan.len();
        for (sheet_index, (sheet, detail)) in plan.iter().enumerate() {
            let name = sheet.name();
            tracing::info!("Splitting sheet: {}", name);
            progress(ProgressEvent::SplittingSheet {
                index: sheet_index,
                total,
                sheet: name.to_string(),
            });

            let key_column = detail.key_column(name)?;
            for destination in &mut destinations {
                destination.begin_sheet(name, detail.first_data_row())?;
            }

            let mut tracker = AnchorTracker::new();
            for (row, step) in RowScanner::new(sheet, key_column, detail.first_data_row()) {
                let key = match step {
                    RowStep::Route(key) => key,
                    RowStep::Skip(reason) => {
                        tracing::debug!("sheet '{}': row {} skipped ({:?})", name, row, reason);
                        continue;
                    }
                    RowStep::Terminate => break,
                };
                match index.classify(&key) {
                    Route::Mapped(positions) => {
                        for &position in positions {
                            copy_row(sheet, row, detail, &mut tracker, &mut destinations[position])?;
                        }
                    }
                    Route::Ignored => {}
                    Route::Unclassified => {
                        if unclassified.insert(key.clone()) {
                            tracing::info!("Unclassified group: {}, {}", name, key);
                        }
                    }
                }
            }
        }

        let outcome = OutputWriter::new(&self.config.output_directory)
            .persist(&destinations, &mut progress)?;
        tracing::info!("Export finished: {} file(s) written", outcome.written.len());

        Ok(GenerationReport {
            written: outcome.written,
            skipped: outcome.skipped,
            unclassified,
            details,
        })
    }
}

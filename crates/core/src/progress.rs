use std::fmt;

/// Milestones reported to the caller's progress callback.
///
/// Indices count the items already finished, so the first sheet of three
/// reports `index: 0, total: 3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    HeaderGeneration,
    SplittingSheet {
        index: usize,
        total: usize,
        sheet: String,
    },
    SavingDestination {
        index: usize,
        total: usize,
        identifier: String,
    },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::HeaderGeneration => write!(f, "Generating headers.."),
            ProgressEvent::SplittingSheet {
                index,
                total,
                sheet,
            } => write!(f, "Splitting sheet {index}/{total}: {sheet}"),
            ProgressEvent::SavingDestination {
                index,
                total,
                identifier,
            } => write!(f, "Saving workbook {index}/{total}: {identifier}"),
        }
    }
}

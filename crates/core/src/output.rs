//! Persisting destinations.
//!
//! Files are written into a staging directory inside the output directory
//! and renamed into place only once every destination has been saved, so a
//! failed run leaves no new destination file behind. Files from an earlier
//! run are replaced on success and kept on failure.

use crate::destination::DestinationDocument;
use crate::error::SplitResult;
use crate::progress::ProgressEvent;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File extension of destination workbooks.
pub const OUTPUT_EXTENSION: &str = "xlsx";

/// Writes dirty destinations as `<identifier>.xlsx`.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    directory: PathBuf,
}

/// What a persist call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistOutcome {
    /// Final paths of the files written, in destination order.
    pub written: Vec<PathBuf>,
    /// Destinations that received no rows and produced no file.
    pub skipped: Vec<String>,
}

impl OutputWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        OutputWriter {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Final path of a destination's file.
    pub fn path_for(&self, identifier: &str) -> PathBuf {
        self.directory
            .join(format!("{identifier}.{OUTPUT_EXTENSION}"))
    }

    /// Save every dirty destination, reporting each one to `progress`.
    pub fn persist<F>(
        &self,
        destinations: &[DestinationDocument],
        progress: &mut F,
    ) -> SplitResult<PersistOutcome>
    where
        F: FnMut(ProgressEvent),
    {
        fs::create_dir_all(&self.directory)?;
        let staging = tempfile::Builder::new()
            .prefix(".xlsplit-")
            .tempdir_in(&self.directory)?;

        let total = destinations.len();
        let mut outcome = PersistOutcome::default();
        let mut staged = Vec::new();

        for (index, destination) in destinations.iter().enumerate() {
            progress(ProgressEvent::SavingDestination {
                index,
                total,
                identifier: destination.identifier().to_string(),
            });
            let target = self.path_for(destination.identifier());
            if !destination.is_dirty() {
                tracing::info!("Skipping empty workbook: {}", target.display());
                outcome.skipped.push(destination.identifier().to_string());
                continue;
            }
            let file_name = format!("{}.{OUTPUT_EXTENSION}", destination.identifier());
            let staged_path = staging.path().join(file_name);
            destination.book().save_as_xlsx(&staged_path)?;
            staged.push((staged_path, target));
        }

        let backup = staging.path().join("previous");
        fs::create_dir(&backup)?;
        let mut committed = Vec::new();
        for (staged_path, target) in staged {
            match commit(&staged_path, &target, &backup) {
                Ok(previous) => committed.push((target, previous)),
                Err(e) => {
                    rollback(&committed);
                    return Err(e.into());
                }
            }
        }

        for (target, _) in committed {
            tracing::info!("Saved workbook: {}", target.display());
            outcome.written.push(target);
        }
        Ok(outcome)
    }
}

/// Move `staged` onto `target`. A file already at `target` is first moved
/// into `backup` and its new path returned; it is put back if the move fails.
fn commit(staged: &Path, target: &Path, backup: &Path) -> io::Result<Option<PathBuf>> {
    let previous = match target.file_name() {
        Some(name) if target.exists() => {
            let previous = backup.join(name);
            fs::rename(target, &previous)?;
            Some(previous)
        }
        _ => None,
    };
    if let Err(e) = fs::rename(staged, target) {
        if let Some(previous) = &previous {
            restore(previous, target);
        }
        return Err(e);
    }
    Ok(previous)
}

/// Undo `commit` calls in reverse order.
fn rollback(committed: &[(PathBuf, Option<PathBuf>)]) {
    for (target, previous) in committed.iter().rev() {
        if let Err(e) = fs::remove_file(target) {
            tracing::warn!("Could not remove {}: {}", target.display(), e);
        }
        if let Some(previous) = previous {
            restore(previous, target);
        }
    }
}

fn restore(previous: &Path, target: &Path) {
    if let Err(e) = fs::rename(previous, target) {
        tracing::warn!("Could not restore {}: {}", target.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use xlsplit_sheet::{Book, Cell, Sheet};

    fn template() -> Book {
        let mut book = Book::new();
        book.add_sheet("S1", Sheet::new()).unwrap();
        book
    }

    fn dirty(identifier: &str) -> DestinationDocument {
        let mut destination = DestinationDocument::new(identifier, &template());
        destination.begin_sheet("S1", 2).unwrap();
        destination.write_row([(1, Cell::new("x"))]).unwrap();
        destination
    }

    #[test]
    fn test_only_dirty_destinations_are_written() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let writer = OutputWriter::new(&out);
        let destinations = vec![
            dirty("west"),
            DestinationDocument::new("east", &template()),
        ];

        let mut events = Vec::new();
        let outcome = writer
            .persist(&destinations, &mut |event| events.push(event))
            .unwrap();

        assert_eq!(outcome.written, vec![out.join("west.xlsx")]);
        assert_eq!(outcome.skipped, vec!["east"]);
        assert!(out.join("west.xlsx").exists());
        assert!(!out.join("east.xlsx").exists());
        // Staging directory is gone
        assert_eq!(fs::read_dir(&out).unwrap().count(), 1);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_failed_save_leaves_no_files() {
        let dir = tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());

        // A sheet name rust_xlsxwriter refuses makes the second save fail
        let mut bad_template = Book::new();
        bad_template.add_sheet("bad[name]", Sheet::new()).unwrap();
        let mut bad = DestinationDocument::new("bad", &bad_template);
        bad.begin_sheet("bad[name]", 1).unwrap();
        bad.write_row([(1, Cell::new("x"))]).unwrap();

        let destinations = vec![dirty("west"), bad];
        let result = writer.persist(&destinations, &mut |_| {});

        assert!(result.is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_run_keeps_earlier_output() {
        let dir = tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());
        let earlier = dir.path().join("west.xlsx");
        fs::write(&earlier, b"earlier run").unwrap();

        let mut bad_template = Book::new();
        bad_template.add_sheet("bad[name]", Sheet::new()).unwrap();
        let mut bad = DestinationDocument::new("bad", &bad_template);
        bad.begin_sheet("bad[name]", 1).unwrap();
        bad.write_row([(1, Cell::new("x"))]).unwrap();

        let result = writer.persist(&[dirty("west"), bad], &mut |_| {});
        assert!(result.is_err());
        assert_eq!(fs::read(&earlier).unwrap(), b"earlier run");
    }

    #[test]
    fn test_successful_run_replaces_earlier_output() {
        let dir = tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());
        let earlier = dir.path().join("west.xlsx");
        fs::write(&earlier, b"earlier run").unwrap();

        let outcome = writer.persist(&[dirty("west")], &mut |_| {}).unwrap();
        assert_eq!(outcome.written, vec![earlier.clone()]);
        assert_ne!(fs::read(&earlier).unwrap(), b"earlier run");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_commit_restores_target() {
        let dir = tempdir().unwrap();
        let backup = dir.path().join("backup");
        fs::create_dir(&backup).unwrap();
        let target = dir.path().join("west.xlsx");
        fs::write(&target, b"earlier run").unwrap();

        let missing = dir.path().join("never-staged.xlsx");
        assert!(commit(&missing, &target, &backup).is_err());
        assert_eq!(fs::read(&target).unwrap(), b"earlier run");
    }

    #[test]
    fn test_rollback_restores_replaced_files() {
        let dir = tempdir().unwrap();
        let backup = dir.path().join("backup");
        fs::create_dir(&backup).unwrap();

        let replaced = dir.path().join("west.xlsx");
        fs::write(&replaced, b"earlier run").unwrap();
        let staged = dir.path().join("staged-west.xlsx");
        fs::write(&staged, b"new run").unwrap();
        let previous = commit(&staged, &replaced, &backup).unwrap();
        assert!(previous.is_some());

        let fresh = dir.path().join("east.xlsx");
        let staged = dir.path().join("staged-east.xlsx");
        fs::write(&staged, b"new run").unwrap();
        assert_eq!(commit(&staged, &fresh, &backup).unwrap(), None);

        rollback(&[(replaced.clone(), previous), (fresh.clone(), None)]);
        assert_eq!(fs::read(&replaced).unwrap(), b"earlier run");
        assert!(!fresh.exists());
    }
}

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;
use xlsplit_core::{ProgressEvent, SplitConfig, SplitError, Splitter};
use xlsplit_sheet::{Book, Cell, CellStyle, CellValue, FontStyle, MergedRange, Sheet};

fn config(output: &Path, export_map: &str, ignore: &str) -> SplitConfig {
    SplitConfig::from_yaml_str(&format!(
        "group-label: Group\n\
         output-directory: '{}'\n\
         ignore-list: {ignore}\n\
         export-map:\n{export_map}",
        output.display()
    ))
    .unwrap()
}

fn bold() -> Arc<CellStyle> {
    Arc::new(CellStyle {
        font: Some(FontStyle {
            bold: true,
            ..FontStyle::default()
        }),
        ..CellStyle::default()
    })
}

/// Header rows 1-3 with the label at B3; data from row 4.
fn scenario_sheet() -> Sheet {
    let mut sheet = Sheet::with_name("S1");
    sheet.set_cell(1, 1, Cell::styled("Report", bold()));
    sheet.merge_a1("A1:C1").unwrap();
    sheet.set_a1("A3", "Item").unwrap();
    sheet.set_a1("B3", "Group").unwrap();
    sheet.set_a1("C3", "Qty").unwrap();
    sheet.set_row_height(1, 32.0);

    sheet.set_a1("A4", "apple").unwrap();
    sheet.set_a1("B4", "Fruit").unwrap();
    sheet.set_a1("C4", 3).unwrap();
    sheet.set_a1("A5", "pear").unwrap();
    sheet.merge_a1("B4:B5").unwrap();
    sheet.set_a1("C5", 4).unwrap();
    sheet.set_a1("A6", "leek").unwrap();
    sheet.set_a1("B6", "Veg").unwrap();
    sheet.set_a1("C6", 5).unwrap();
    // B7 is empty: the data block ends there
    sheet.set_a1("A8", "late").unwrap();
    sheet.set_a1("B8", "Fruit").unwrap();
    sheet
}

fn scenario_book() -> Book {
    let mut book = Book::with_name("source");
    book.add_sheet("S1", scenario_sheet()).unwrap();
    let mut notes = Sheet::new();
    notes.set_a1("A1", "no label here").unwrap();
    book.add_sheet("Notes", notes).unwrap();
    book
}

fn text(sheet: &Sheet, a1: &str) -> Option<String> {
    sheet.get_a1(a1).unwrap().value().as_text().map(str::to_string)
}

#[test]
fn test_detection_on_open() {
    let dir = tempdir().unwrap();
    let splitter = Splitter::from_book(
        scenario_book(),
        config(dir.path(), "  west: [Fruit]\n", "[]"),
    )
    .unwrap();

    let s1 = splitter.details().get("S1").unwrap();
    assert_eq!((s1.title_row1, s1.title_row2), (1, 3));
    assert_eq!(s1.key_cell, "B3");
    assert_eq!(s1.key_column("S1").unwrap(), 2);
    assert!(!s1.output);

    let notes = splitter.details().get("Notes").unwrap();
    assert_eq!(notes.title_row2, 1);
    assert_eq!(notes.key_cell, "A1");
}

#[test]
fn test_example_scenario() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    let mut splitter = Splitter::from_book(
        scenario_book(),
        config(
            &out,
            "  west: [Fruit, Veg]\n  east: [Fruit]\n  south: [Meat]\n",
            "[]",
        ),
    )
    .unwrap();
    splitter.details_mut().select(["S1"]).unwrap();

    let mut events = Vec::new();
    let report = splitter.generate(|event| events.push(event)).unwrap();

    assert_eq!(report.written, vec![out.join("west.xlsx"), out.join("east.xlsx")]);
    assert_eq!(report.skipped, vec!["south"]);
    assert!(report.unclassified.is_empty());
    assert!(!out.join("south.xlsx").exists());

    let resolved = report.details.get("S1").unwrap();
    assert_eq!(resolved.title_column2, 3);
    assert!(resolved.merged_carry_columns.is_empty());

    let west = Book::from_xlsx(out.join("west.xlsx")).unwrap();
    assert_eq!(west.sheet_names(), vec!["S1"]);
    let s1 = west.get_sheet("S1").unwrap();
    assert_eq!(text(s1, "A4").as_deref(), Some("apple"));
    assert_eq!(text(s1, "B4").as_deref(), Some("Fruit"));
    assert_eq!(s1.get_a1("C4").unwrap().value().as_float(), Some(3.0));
    // The merged-key row (pear) is dropped; leek follows apple directly
    assert_eq!(text(s1, "A5").as_deref(), Some("leek"));
    assert_eq!(text(s1, "B5").as_deref(), Some("Veg"));
    assert!(s1.get_a1("A6").unwrap().value().is_null());

    let east = Book::from_xlsx(out.join("east.xlsx")).unwrap();
    let s1 = east.get_sheet("S1").unwrap();
    assert_eq!(text(s1, "A4").as_deref(), Some("apple"));
    assert!(s1.get_a1("A5").unwrap().value().is_null());

    assert_eq!(
        events,
        vec![
            ProgressEvent::HeaderGeneration,
            ProgressEvent::SplittingSheet {
                index: 0,
                total: 1,
                sheet: "S1".to_string(),
            },
            ProgressEvent::SavingDestination {
                index: 0,
                total: 3,
                identifier: "west".to_string(),
            },
            ProgressEvent::SavingDestination {
                index: 1,
                total: 3,
                identifier: "east".to_string(),
            },
            ProgressEvent::SavingDestination {
                index: 2,
                total: 3,
                identifier: "south".to_string(),
            },
        ]
    );
}

#[test]
fn test_header_template_fidelity() {
    let dir = tempdir().unwrap();
    let mut splitter = Splitter::from_book(
        scenario_book(),
        config(dir.path(), "  west: [Fruit]\n", "[]"),
    )
    .unwrap();
    splitter.details_mut().select(["S1"]).unwrap();
    splitter.generate(|_| {}).unwrap();

    let west = Book::from_xlsx(dir.path().join("west.xlsx")).unwrap();
    let s1 = west.get_sheet("S1").unwrap();
    assert_eq!(s1.merged_ranges(), &[MergedRange::parse("A1:C1").unwrap()]);
    assert_eq!(text(s1, "A1").as_deref(), Some("Report"));
    assert!(s1.get_a1("A1").unwrap().style().unwrap().font.as_ref().unwrap().bold);
    assert_eq!(text(s1, "B3").as_deref(), Some("Group"));
    assert_eq!(s1.row_height(1), Some(32.0));
}

#[test]
fn test_termination_sentinel() {
    let dir = tempdir().unwrap();
    let mut splitter = Splitter::from_book(
        scenario_book(),
        config(dir.path(), "  west: [Fruit]\n", "[]"),
    )
    .unwrap();
    splitter.details_mut().select(["S1"]).unwrap();
    splitter.generate(|_| {}).unwrap();

    let west = Book::from_xlsx(dir.path().join("west.xlsx")).unwrap();
    let s1 = west.get_sheet("S1").unwrap();
    assert_eq!(text(s1, "A4").as_deref(), Some("apple"));
    // "late" sits below the empty key cell in B7 and is never reached
    assert!(s1.get_a1("A5").unwrap().value().is_null());
    assert!(s1.cells().all(|(_, cell)| cell.value() != &CellValue::from("late")));
}

#[test]
fn test_unclassified_keys_are_deduplicated() {
    let dir = tempdir().unwrap();
    let mut sheet = Sheet::with_name("Data");
    sheet.set_a1("A1", "Group").unwrap();
    for (row, key) in ["Meat", "Fish", " Meat ", "Misc", "Meat", "Fruit"]
        .into_iter()
        .enumerate()
    {
        sheet.set_value(row as u32 + 2, 1, key);
    }
    let mut book = Book::new();
    book.add_sheet("Data", sheet).unwrap();

    let mut splitter =
        Splitter::from_book(book, config(dir.path(), "  west: [Fruit]\n", "[Misc]")).unwrap();
    splitter.details_mut().select(["Data"]).unwrap();
    let report = splitter.generate(|_| {}).unwrap();

    assert_eq!(
        report.unclassified,
        BTreeSet::from(["Fish".to_string(), "Meat".to_string()])
    );
    assert_eq!(report.written.len(), 1);
}

#[test]
fn test_carry_column_propagates_merged_values() {
    let dir = tempdir().unwrap();
    let mut sheet = Sheet::with_name("Regions");
    // Column A merge crosses the header boundary, making A a carry column
    sheet.set_a1("A2", "Region").unwrap();
    sheet.merge_a1("A2:A5").unwrap();
    sheet.set_a1("B3", "Group").unwrap();
    sheet.set_a1("C3", "Name").unwrap();
    sheet.set_a1("A6", "north").unwrap();
    sheet.merge_a1("A6:A8").unwrap();
    sheet.set_a1("A9", "south").unwrap();
    for row in 4..=9 {
        sheet.set_value(row, 2, "Fruit");
        sheet.set_value(row, 3, format!("r{row}"));
    }
    let mut book = Book::new();
    book.add_sheet("Regions", sheet).unwrap();

    let mut splitter =
        Splitter::from_book(book, config(dir.path(), "  west: [Fruit]\n", "[]")).unwrap();
    splitter.details_mut().select(["Regions"]).unwrap();
    let report = splitter.generate(|_| {}).unwrap();
    assert_eq!(
        report.details.get("Regions").unwrap().merged_carry_columns,
        BTreeSet::from([1])
    );

    let west = Book::from_xlsx(dir.path().join("west.xlsx")).unwrap();
    let regions = west.get_sheet("Regions").unwrap();
    // Rows 4-5 stay inside the header merge cloned from A2:A5
    assert!(regions.get_a1("A4").unwrap().is_merge_continuation());
    for (a1, expected) in [("A6", "north"), ("A7", "north"), ("A8", "north"), ("A9", "south")] {
        assert_eq!(text(regions, a1).as_deref(), Some(expected), "{a1}");
    }
    assert_eq!(text(regions, "C9").as_deref(), Some("r9"));
}

#[test]
fn test_carry_skips_rows_that_were_not_copied() {
    let dir = tempdir().unwrap();
    let mut sheet = Sheet::with_name("Regions");
    sheet.set_a1("A2", "Region").unwrap();
    sheet.merge_a1("A2:A4").unwrap();
    sheet.set_a1("B3", "Group").unwrap();
    sheet.set_a1("C3", "Name").unwrap();
    // Row 4 sits inside the header merge. Then north is copied, south
    // starts a merge on an ignored row and east one on an unclassified
    // row; both continuations are copied
    sheet.set_a1("A5", "north").unwrap();
    sheet.set_a1("A6", "south").unwrap();
    sheet.merge_a1("A6:A7").unwrap();
    sheet.set_a1("A8", "east").unwrap();
    sheet.merge_a1("A8:A9").unwrap();
    for (row, key) in [
        (4, "Fruit"),
        (5, "Fruit"),
        (6, "Misc"),
        (7, "Fruit"),
        (8, "Meat"),
        (9, "Fruit"),
    ] {
        sheet.set_value(row, 2, key);
        sheet.set_value(row, 3, format!("r{row}"));
    }
    let mut book = Book::new();
    book.add_sheet("Regions", sheet).unwrap();

    let mut splitter =
        Splitter::from_book(book, config(dir.path(), "  west: [Fruit]\n", "[Misc]")).unwrap();
    splitter.details_mut().select(["Regions"]).unwrap();
    let report = splitter.generate(|_| {}).unwrap();
    assert_eq!(
        report.details.get("Regions").unwrap().merged_carry_columns,
        BTreeSet::from([1])
    );
    assert_eq!(report.unclassified, BTreeSet::from(["Meat".to_string()]));

    let west = Book::from_xlsx(dir.path().join("west.xlsx")).unwrap();
    let regions = west.get_sheet("Regions").unwrap();
    assert!(regions.get_a1("A4").unwrap().is_merge_continuation());
    assert_eq!(text(regions, "C4").as_deref(), Some("r4"));
    // Continuations take the last copied cell, not the anchors of the
    // merges that began on rows routed nowhere
    for (a1, region, name) in [
        ("5", "north", "r5"),
        ("6", "north", "r7"),
        ("7", "north", "r9"),
    ] {
        assert_eq!(text(regions, &format!("A{a1}")).as_deref(), Some(region), "A{a1}");
        assert_eq!(text(regions, &format!("C{a1}")).as_deref(), Some(name), "C{a1}");
    }
    assert!(regions.get_a1("A8").unwrap().value().is_null());
}

#[test]
fn test_non_text_and_blank_keys_reach_nothing() {
    let dir = tempdir().unwrap();
    let mut sheet = Sheet::with_name("Data");
    sheet.set_a1("A1", "Group").unwrap();
    sheet.set_a1("B1", "Name").unwrap();
    sheet.set_value(2, 1, "Fruit");
    sheet.set_value(3, 1, 42);
    sheet.set_value(4, 1, "   ");
    sheet.set_value(5, 1, true);
    sheet.set_value(6, 1, " Fruit ");
    for row in 2..=6 {
        sheet.set_value(row, 2, format!("r{row}"));
    }
    let mut book = Book::new();
    book.add_sheet("Data", sheet).unwrap();

    let mut splitter =
        Splitter::from_book(book, config(dir.path(), "  west: [Fruit]\n", "[]")).unwrap();
    splitter.details_mut().select(["Data"]).unwrap();
    let report = splitter.generate(|_| {}).unwrap();

    assert!(report.unclassified.is_empty());
    assert_eq!(report.written, vec![dir.path().join("west.xlsx")]);

    let west = Book::from_xlsx(dir.path().join("west.xlsx")).unwrap();
    let data = west.get_sheet("Data").unwrap();
    assert_eq!(text(data, "B2").as_deref(), Some("r2"));
    // Scanning continues past the skipped rows
    assert_eq!(text(data, "B3").as_deref(), Some("r6"));
    assert!(data.get_a1("B4").unwrap().value().is_null());
}

#[test]
fn test_every_selected_sheet_seeds_every_destination() {
    let dir = tempdir().unwrap();
    let mut book = scenario_book();
    let mut other = Sheet::new();
    other.set_a1("A1", "Group").unwrap();
    other.set_a1("A2", "Beans").unwrap();
    book.add_sheet("Other", other).unwrap();

    let mut splitter = Splitter::from_book(
        book,
        config(dir.path(), "  west: [Fruit]\n  east: [Beans]\n", "[]"),
    )
    .unwrap();
    splitter.details_mut().select(["S1", "Other"]).unwrap();
    splitter.generate(|_| {}).unwrap();

    let east = Book::from_xlsx(dir.path().join("east.xlsx")).unwrap();
    assert_eq!(east.sheet_names(), vec!["S1", "Other"]);
    assert_eq!(text(east.get_sheet("S1").unwrap(), "B3").as_deref(), Some("Group"));
    assert!(east.get_sheet("S1").unwrap().get_a1("A4").unwrap().value().is_null());
    assert_eq!(text(east.get_sheet("Other").unwrap(), "A2").as_deref(), Some("Beans"));
}

#[test]
fn test_generation_uses_edited_details() {
    let dir = tempdir().unwrap();
    let mut splitter = Splitter::from_book(
        scenario_book(),
        config(dir.path(), "  west: [apple]\n", "[]"),
    )
    .unwrap();
    let before = splitter.details().version();
    splitter.details_mut().select(["S1"]).unwrap();
    splitter
        .details_mut()
        .edit("S1", |d| d.key_cell = "A3".to_string())
        .unwrap();
    assert!(splitter.details().version() > before);

    let report = splitter.generate(|_| {}).unwrap();
    assert_eq!(report.details.version(), splitter.details().version());
    let west = Book::from_xlsx(dir.path().join("west.xlsx")).unwrap();
    assert_eq!(text(west.get_sheet("S1").unwrap(), "A4").as_deref(), Some("apple"));
}

#[test]
fn test_invalid_key_cell_aborts_without_output() {
    let dir = tempdir().unwrap();
    let mut splitter = Splitter::from_book(
        scenario_book(),
        config(dir.path(), "  west: [Fruit]\n", "[]"),
    )
    .unwrap();
    splitter.details_mut().select(["S1"]).unwrap();
    splitter
        .details_mut()
        .edit("S1", |d| d.key_cell = "not a cell".to_string())
        .unwrap();

    let err = splitter.generate(|_| {}).unwrap_err();
    assert!(matches!(err, SplitError::InvalidKeyCell { .. }));
    assert!(!dir.path().join("west.xlsx").exists());
}

#[test]
fn test_open_from_file() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source.xlsx");
    scenario_book().save_as_xlsx(&source).unwrap();

    let out = dir.path().join("out");
    let mut splitter = Splitter::open(&source, config(&out, "  west: [Fruit, Veg]\n", "[]")).unwrap();
    assert_eq!(splitter.book().sheet_names(), vec!["S1", "Notes"]);
    splitter.details_mut().select(["S1"]).unwrap();
    let report = splitter.generate(|_| {}).unwrap();
    assert_eq!(report.written, vec![out.join("west.xlsx")]);

    let west = Book::from_xlsx(out.join("west.xlsx")).unwrap();
    assert_eq!(text(west.get_sheet("S1").unwrap(), "A5").as_deref(), Some("leek"));
}

#[test]
fn test_open_rejects_invalid_document() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("broken.xlsx");
    std::fs::write(&source, b"not a spreadsheet").unwrap();

    let err = Splitter::open(&source, config(dir.path(), "  west: [Fruit]\n", "[]")).unwrap_err();
    assert!(matches!(err, SplitError::InvalidDocument { .. }));
}

use pretty_assertions::assert_eq;
use sheetsync_cli::{
    read_table, read_table_from_path, summary_line, write_table, write_table_to_path, CsvError,
};
use sheetsync_sync::SyncSummary;
use sheetsync_types::{CellValue, Column, ColumnId, ColumnKind, Row, Table};

// ── Reading ─────────────────────────────────────────────────────

#[test]
fn read_table_uses_header_row() {
    let csv = "ref,qty,note\nA,3.0,hello\nB,,\n";
    let table = read_table(csv.as_bytes()).unwrap();

    assert_eq!(table.titles().collect::<Vec<_>>(), vec!["ref", "qty", "note"]);
    assert_eq!(table.len(), 2);

    let first = &table.rows()[0];
    assert_eq!(table.value(first, "qty"), Some(&CellValue::text("3.0")));
    let second = &table.rows()[1];
    assert_eq!(table.value(second, "ref"), Some(&CellValue::text("B")));
    assert_eq!(table.value(second, "qty"), None);
    assert_eq!(table.value(second, "note"), None);
}

#[test]
fn read_table_handles_quoted_fields() {
    let csv = "ref,note\n\"A,1\",\"say \"\"hi\"\"\"\n";
    let table = read_table(csv.as_bytes()).unwrap();
    let row = &table.rows()[0];
    assert_eq!(table.value(row, "ref"), Some(&CellValue::text("A,1")));
    assert_eq!(table.value(row, "note"), Some(&CellValue::text("say \"hi\"")));
}

#[test]
fn read_table_rejects_duplicate_headers() {
    let err = read_table("ref,ref\n1,2\n".as_bytes()).unwrap_err();
    assert!(matches!(err, CsvError::Table(_)));
}

#[test]
fn read_table_rejects_ragged_rows() {
    let err = read_table("a,b\n1,2,3\n".as_bytes()).unwrap_err();
    assert!(matches!(err, CsvError::Csv(_)));
}

#[test]
fn read_table_headers_only() {
    let table = read_table("a,b\n".as_bytes()).unwrap();
    assert_eq!(table.columns().len(), 2);
    assert!(table.is_empty());
}

// ── Writing ─────────────────────────────────────────────────────

fn typed_table() -> Table {
    let mut table = Table::new(vec![
        Column::new(ColumnId::new(10), "ref", ColumnKind::Text),
        Column::new(ColumnId::new(11), "qty", ColumnKind::Number),
        Column::new(ColumnId::new(12), "done", ColumnKind::Boolean),
    ])
    .unwrap();
    table
        .push_row(
            Row::new()
                .cell(ColumnId::new(10), "A")
                .cell(ColumnId::new(11), 2.5)
                .cell(ColumnId::new(12), true),
        )
        .unwrap();
    table
        .push_row(Row::new().cell(ColumnId::new(10), "B"))
        .unwrap();
    table
}

#[test]
fn write_table_renders_values_and_blanks() {
    let mut out = Vec::new();
    write_table(&typed_table(), &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "ref,qty,done\nA,2.5,true\nB,,\n"
    );
}

#[test]
fn write_then_read_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.csv");

    write_table_to_path(&typed_table(), &path).unwrap();
    let table = read_table_from_path(&path).unwrap();

    assert_eq!(table.titles().collect::<Vec<_>>(), vec!["ref", "qty", "done"]);
    let first = &table.rows()[0];
    assert_eq!(table.value(first, "qty"), Some(&CellValue::text("2.5")));
    assert_eq!(table.value(&table.rows()[1], "done"), None);
}

#[test]
fn read_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_table_from_path(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, CsvError::Io(_)));
}

// ── Summary ─────────────────────────────────────────────────────

#[test]
fn summary_line_formats() {
    let summary = SyncSummary {
        updated: 3,
        created: 1,
        ..Default::default()
    };
    assert_eq!(summary_line(&summary), "3 updated, 1 created, 0 deleted");

    let cleared = SyncSummary {
        cleared: 4,
        created: 2,
        ..Default::default()
    };
    assert_eq!(
        summary_line(&cleared),
        "0 updated, 2 created, 0 deleted (after clearing 4 rows)"
    );
}

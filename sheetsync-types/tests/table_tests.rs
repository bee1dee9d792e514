use pretty_assertions::assert_eq;
use sheetsync_types::{CellValue, Column, ColumnId, ColumnKind, Error, Row, RowId, Table};

fn schema() -> Vec<Column> {
    vec![
        Column::new(ColumnId::new(100), "ref", ColumnKind::Text),
        Column::new(ColumnId::new(200), "x", ColumnKind::Number),
        Column::new(ColumnId::new(300), "done", ColumnKind::Boolean),
    ]
}

// ── ColumnKind ────────────────────────────────────────────────────

#[test]
fn column_kind_from_api_type() {
    assert_eq!(ColumnKind::from_api_type("CHECKBOX"), ColumnKind::Boolean);
    assert_eq!(ColumnKind::from_api_type("TEXT_NUMBER"), ColumnKind::Text);
    assert_eq!(ColumnKind::from_api_type("DATE"), ColumnKind::Date);
    assert_eq!(ColumnKind::from_api_type("DATETIME"), ColumnKind::DateTime);
    assert_eq!(ColumnKind::from_api_type("ABSTRACT_DATETIME"), ColumnKind::DateTime);
    assert_eq!(ColumnKind::from_api_type("PICKLIST"), ColumnKind::Unknown);
}

#[test]
fn column_kind_serde_names() {
    assert_eq!(serde_json::to_string(&ColumnKind::DateTime).unwrap(), "\"DATETIME\"");
    assert_eq!(serde_json::to_string(&ColumnKind::Boolean).unwrap(), "\"BOOLEAN\"");
    let kind: ColumnKind = serde_json::from_str("\"NUMBER\"").unwrap();
    assert_eq!(kind, ColumnKind::Number);
}

#[test]
fn loosely_typed_kinds() {
    assert!(ColumnKind::Text.is_loosely_typed());
    assert!(ColumnKind::Unknown.is_loosely_typed());
    assert!(!ColumnKind::Boolean.is_loosely_typed());
    assert!(!ColumnKind::Number.is_loosely_typed());
}

// ── Schema validation ─────────────────────────────────────────────

#[test]
fn table_rejects_duplicate_titles() {
    let columns = vec![
        Column::new(ColumnId::new(1), "a", ColumnKind::Text),
        Column::new(ColumnId::new(2), "a", ColumnKind::Text),
    ];
    assert!(matches!(Table::new(columns), Err(Error::DuplicateColumnTitle(t)) if t == "a"));
}

#[test]
fn table_rejects_duplicate_ids() {
    let columns = vec![
        Column::new(ColumnId::new(1), "a", ColumnKind::Text),
        Column::new(ColumnId::new(1), "b", ColumnKind::Text),
    ];
    assert!(matches!(Table::new(columns), Err(Error::DuplicateColumnId(_))));
}

#[test]
fn from_titles_assigns_positional_ids() {
    let table = Table::from_titles(["ref", "x"]).unwrap();
    assert_eq!(table.columns()[0].id, ColumnId::new(0));
    assert_eq!(table.columns()[1].id, ColumnId::new(1));
    assert_eq!(table.columns()[1].kind, ColumnKind::Unknown);
    assert_eq!(table.titles().collect::<Vec<_>>(), vec!["ref", "x"]);
}

// ── Rows ──────────────────────────────────────────────────────────

#[test]
fn push_row_keeps_order() {
    let mut table = Table::new(schema()).unwrap();
    table
        .extend_rows([
            Row::with_id(RowId::new(10)).cell(ColumnId::new(100), "A"),
            Row::with_id(RowId::new(11)).cell(ColumnId::new(100), "B"),
        ])
        .unwrap();

    let ids: Vec<_> = table.rows().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![Some(RowId::new(10)), Some(RowId::new(11))]);
    assert_eq!(table.len(), 2);
}

#[test]
fn push_row_rejects_unknown_column() {
    let mut table = Table::new(schema()).unwrap();
    let result = table.push_row(Row::new().cell(ColumnId::new(999), "?"));
    assert!(matches!(result, Err(Error::UnknownColumn(id)) if id == ColumnId::new(999)));
    assert!(table.is_empty());
}

#[test]
fn push_row_checks_ids_against_wide_schema() {
    let columns: Vec<Column> = (0..500_i64)
        .map(|i| Column::new(ColumnId::new(i * 3), format!("c{i}"), ColumnKind::Text))
        .collect();
    let mut table = Table::new(columns).unwrap();

    let full = (0..500_i64).fold(Row::new(), |row, i| row.cell(ColumnId::new(i * 3), i));
    for _ in 0..100 {
        table.push_row(full.clone()).unwrap();
    }
    assert_eq!(table.len(), 100);

    let stray = Row::new().cell(ColumnId::new(1), "x");
    assert!(matches!(
        table.push_row(stray),
        Err(Error::UnknownColumn(id)) if id == ColumnId::new(1)
    ));
    assert_eq!(table.len(), 100);
}

#[test]
fn push_values_by_title() {
    let mut table = Table::from_titles(["ref", "x"]).unwrap();
    table
        .push_values([("ref", CellValue::text("A")), ("x", CellValue::Int(1))])
        .unwrap();

    let row = &table.rows()[0];
    assert_eq!(row.id, None);
    assert_eq!(table.value(row, "ref"), Some(&CellValue::text("A")));
    assert_eq!(table.value(row, "x"), Some(&CellValue::Int(1)));
}

#[test]
fn push_values_unknown_title() {
    let mut table = Table::from_titles(["ref"]).unwrap();
    let result = table.push_values([("nope", CellValue::Int(1))]);
    assert!(matches!(result, Err(Error::UnknownTitle(t)) if t == "nope"));
}

#[test]
fn absent_cell_differs_from_empty_string() {
    let mut table = Table::new(schema()).unwrap();
    table
        .push_row(Row::new().cell(ColumnId::new(100), ""))
        .unwrap();
    let row = &table.rows()[0];
    assert_eq!(table.value(row, "ref"), Some(&CellValue::empty()));
    assert_eq!(table.value(row, "x"), None);
}

#[test]
fn column_lookup_by_title() {
    let table = Table::new(schema()).unwrap();
    assert_eq!(table.column_by_title("x").map(|c| c.id), Some(ColumnId::new(200)));
    assert!(table.has_title("done"));
    assert!(!table.has_title("missing"));
}

#[test]
fn column_values_in_row_order() {
    let mut table = Table::new(schema()).unwrap();
    table
        .extend_rows([
            Row::new().cell(ColumnId::new(200), 1_i64),
            Row::new(),
            Row::new().cell(ColumnId::new(200), 2.5),
        ])
        .unwrap();

    let values: Vec<_> = table.column_values(ColumnId::new(200)).collect();
    assert_eq!(
        values,
        vec![Some(&CellValue::Int(1)), None, Some(&CellValue::Float(2.5))]
    );
}

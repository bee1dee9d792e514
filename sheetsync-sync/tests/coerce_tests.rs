use sheetsync_sync::{coerce, numeric_form};
use sheetsync_types::{CellValue, ColumnKind};

fn text(s: &str) -> CellValue {
    CellValue::text(s)
}

// ── Blank values ─────────────────────────────────────────────────

#[test]
fn missing_value_becomes_empty_string() {
    assert_eq!(coerce(None, ColumnKind::Number), CellValue::empty());
    assert_eq!(coerce(None, ColumnKind::Boolean), CellValue::empty());
}

#[test]
fn empty_string_stays_empty() {
    assert_eq!(coerce(Some(&text("")), ColumnKind::Text), CellValue::empty());
}

#[test]
fn nan_becomes_empty_string_not_zero() {
    let nan = CellValue::Float(f64::NAN);
    assert_eq!(coerce(Some(&nan), ColumnKind::Number), CellValue::empty());
}

// ── Numeric fallback chain ───────────────────────────────────────

#[test]
fn whole_float_text_becomes_integer() {
    assert_eq!(coerce(Some(&text("3.0")), ColumnKind::Number), CellValue::Int(3));
}

#[test]
fn fractional_text_becomes_float() {
    assert_eq!(coerce(Some(&text("3.5")), ColumnKind::Number), CellValue::Float(3.5));
}

#[test]
fn integer_text_becomes_integer() {
    assert_eq!(coerce(Some(&text(" 42 ")), ColumnKind::Text), CellValue::Int(42));
    assert_eq!(coerce(Some(&text("-7")), ColumnKind::Unknown), CellValue::Int(-7));
}

#[test]
fn whole_float_becomes_integer() {
    let value = CellValue::Float(12.0);
    assert_eq!(coerce(Some(&value), ColumnKind::Number), CellValue::Int(12));
}

#[test]
fn large_integers_survive_exactly() {
    let value = text("9007199254740993");
    assert_eq!(
        coerce(Some(&value), ColumnKind::Number),
        CellValue::Int(9_007_199_254_740_993)
    );
}

#[test]
fn huge_float_stays_float() {
    let value = CellValue::Float(1e300);
    assert_eq!(coerce(Some(&value), ColumnKind::Number), CellValue::Float(1e300));
}

#[test]
fn non_numeric_text_falls_back_to_text() {
    assert_eq!(coerce(Some(&text("abc")), ColumnKind::Number), text("abc"));
    assert_eq!(coerce(Some(&text("2024-01-31")), ColumnKind::Date), text("2024-01-31"));
}

#[test]
fn infinity_falls_back_to_text() {
    let value = CellValue::Float(f64::INFINITY);
    assert_eq!(coerce(Some(&value), ColumnKind::Number), text("inf"));
    assert_eq!(coerce(Some(&text("inf")), ColumnKind::Number), text("inf"));
}

#[test]
fn boolean_into_non_boolean_column_reads_as_number() {
    assert_eq!(coerce(Some(&CellValue::Bool(true)), ColumnKind::Text), CellValue::Int(1));
    assert_eq!(coerce(Some(&CellValue::Bool(false)), ColumnKind::Number), CellValue::Int(0));
}

// ── Boolean columns ──────────────────────────────────────────────

#[test]
fn boolean_column_truthiness() {
    let cases = [
        (CellValue::Bool(true), true),
        (CellValue::Bool(false), false),
        (CellValue::Int(1), true),
        (CellValue::Int(0), false),
        (CellValue::Float(0.5), true),
        (CellValue::Float(0.0), false),
        (text("x"), true),
        (text("true"), true),
        (text("False"), false),
        (text("no"), false),
        (text("0"), false),
        (text("0.0"), false),
        (text("2"), true),
        (text("   "), false),
    ];
    for (raw, expected) in cases {
        assert_eq!(
            coerce(Some(&raw), ColumnKind::Boolean),
            CellValue::Bool(expected),
            "raw value {raw:?}"
        );
    }
}

#[test]
fn boolean_column_blank_is_still_empty_string() {
    assert_eq!(coerce(Some(&text("")), ColumnKind::Boolean), CellValue::empty());
}

// ── numeric_form ─────────────────────────────────────────────────

#[test]
fn numeric_form_readings() {
    assert_eq!(numeric_form(&text("1e3")), Some(CellValue::Int(1000)));
    assert_eq!(numeric_form(&text("0.25")), Some(CellValue::Float(0.25)));
    assert_eq!(numeric_form(&text("NaN")), None);
    assert_eq!(numeric_form(&text("12abc")), None);
    assert_eq!(numeric_form(&CellValue::Int(5)), Some(CellValue::Int(5)));
}

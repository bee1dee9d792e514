use sheetsync_types::CellValue;

// ── Blank detection ───────────────────────────────────────────────

#[test]
fn empty_string_is_blank() {
    assert!(CellValue::empty().is_blank());
    assert!(CellValue::text("").is_blank());
}

#[test]
fn nan_is_blank() {
    assert!(CellValue::Float(f64::NAN).is_blank());
}

#[test]
fn scalars_are_not_blank() {
    assert!(!CellValue::Int(0).is_blank());
    assert!(!CellValue::Bool(false).is_blank());
    assert!(!CellValue::text(" ").is_blank());
    assert!(!CellValue::Float(0.0).is_blank());
}

// ── Display ───────────────────────────────────────────────────────

#[test]
fn display_forms() {
    assert_eq!(CellValue::Bool(true).to_string(), "true");
    assert_eq!(CellValue::Int(-3).to_string(), "-3");
    assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
    assert_eq!(CellValue::text("abc").to_string(), "abc");
}

#[test]
fn text_accessor() {
    assert_eq!(CellValue::text("abc").as_str(), Some("abc"));
    assert_eq!(CellValue::empty().as_str(), Some(""));
    assert_eq!(CellValue::Int(1).as_str(), None);
}

// ── Wire format ───────────────────────────────────────────────────

#[test]
fn serializes_untagged() {
    assert_eq!(serde_json::to_string(&CellValue::Bool(true)).unwrap(), "true");
    assert_eq!(serde_json::to_string(&CellValue::Int(12)).unwrap(), "12");
    assert_eq!(serde_json::to_string(&CellValue::Float(1.5)).unwrap(), "1.5");
    assert_eq!(serde_json::to_string(&CellValue::text("x")).unwrap(), "\"x\"");
}

#[test]
fn deserializes_integers_before_floats() {
    let v: CellValue = serde_json::from_str("12").unwrap();
    assert_eq!(v, CellValue::Int(12));
    let v: CellValue = serde_json::from_str("12.25").unwrap();
    assert_eq!(v, CellValue::Float(12.25));
    let v: CellValue = serde_json::from_str("false").unwrap();
    assert_eq!(v, CellValue::Bool(false));
    let v: CellValue = serde_json::from_str("\"12\"").unwrap();
    assert_eq!(v, CellValue::text("12"));
}

#[test]
fn conversions() {
    assert_eq!(CellValue::from(3_i64), CellValue::Int(3));
    assert_eq!(CellValue::from(0.5), CellValue::Float(0.5));
    assert_eq!(CellValue::from(true), CellValue::Bool(true));
    assert_eq!(CellValue::from("a"), CellValue::text("a"));
    assert_eq!(CellValue::from(String::from("b")).as_str(), Some("b"));
}

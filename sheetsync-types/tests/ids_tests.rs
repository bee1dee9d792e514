use sheetsync_types::{ColumnId, RowId, SheetId};
use std::collections::HashSet;
use std::str::FromStr;

// ── Construction ──────────────────────────────────────────────────

#[test]
fn id_new_and_get() {
    let id = RowId::new(4_521_337_891_234);
    assert_eq!(id.get(), 4_521_337_891_234);
}

#[test]
fn id_from_i64() {
    let id: ColumnId = 77_i64.into();
    assert_eq!(id, ColumnId::new(77));
}

// ── Parsing & display ─────────────────────────────────────────────

#[test]
fn id_display_and_parse() {
    let id = SheetId::new(5_911_621_122_975_620);
    let s = id.to_string();
    assert_eq!(s, "5911621122975620");
    assert_eq!(SheetId::parse(&s).unwrap(), id);
}

#[test]
fn id_parse_trims_whitespace() {
    assert_eq!(SheetId::parse(" 42\n").unwrap(), SheetId::new(42));
}

#[test]
fn id_from_str_invalid() {
    assert!(RowId::from_str("not-a-number").is_err());
    assert!(RowId::parse("").is_err());
}

// ── Traits ────────────────────────────────────────────────────────

#[test]
fn id_hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(RowId::new(1));
    set.insert(RowId::new(1)); // duplicate
    set.insert(RowId::new(2));
    assert_eq!(set.len(), 2);
}

#[test]
fn id_serializes_as_bare_number() {
    let json = serde_json::to_string(&ColumnId::new(123)).unwrap();
    assert_eq!(json, "123");
    let parsed: ColumnId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, ColumnId::new(123));
}

//! Cell value coercion against a target column kind.
//!
//! The remote store is loosely typed per cell. Values written back are
//! narrowed with an ordered fallback: whole numbers become integers, other
//! numbers floats, and anything else stays text. Every input yields a value.

use sheetsync_types::{CellValue, ColumnKind};

/// Text values read as `false` by a checkbox column.
const FALSE_WORDS: &[&str] = &["false", "no", "n", "off"];

/// Converts a raw cell value to the form written to a column of `kind`.
///
/// - A missing or blank value becomes the empty string, which clears the
///   remote cell. It is never a numeric zero.
/// - Boolean columns get a boolean by truthiness.
/// - Everything else goes through [`numeric_form`], falling back to the
///   value's text.
///
/// The result is stable: coercing an already coerced value against the same
/// kind returns it unchanged.
pub fn coerce(raw: Option<&CellValue>, kind: ColumnKind) -> CellValue {
    let Some(raw) = raw.filter(|v| !v.is_blank()) else {
        return CellValue::empty();
    };

    if kind == ColumnKind::Boolean {
        return CellValue::Bool(is_truthy(raw));
    }

    numeric_form(raw).unwrap_or_else(|| CellValue::Text(raw.to_string()))
}

/// Returns the numeric reading of a value, if it has one.
///
/// Integers are preferred whenever the float form has no fractional part, so
/// `"3.0"` reads as `3` while `"3.5"` reads as `3.5`. Booleans read as `0`/`1`.
/// Infinite and NaN values have no numeric reading.
pub fn numeric_form(value: &CellValue) -> Option<CellValue> {
    match value {
        CellValue::Bool(b) => Some(CellValue::Int(i64::from(*b))),
        CellValue::Int(i) => Some(CellValue::Int(*i)),
        CellValue::Float(f) => from_float(*f),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<i64>() {
                Ok(i) => Some(CellValue::Int(i)),
                Err(_) => trimmed.parse::<f64>().ok().and_then(from_float),
            }
        }
    }
}

fn from_float(f: f64) -> Option<CellValue> {
    if !f.is_finite() {
        return None;
    }
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(CellValue::Int(f as i64))
    } else {
        Some(CellValue::Float(f))
    }
}

fn is_truthy(value: &CellValue) -> bool {
    match value {
        CellValue::Bool(b) => *b,
        CellValue::Int(i) => *i != 0,
        CellValue::Float(f) => *f != 0.0,
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if FALSE_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w)) {
                return false;
            }
            match numeric_form(value) {
                Some(CellValue::Int(i)) => i != 0,
                Some(CellValue::Float(f)) => f != 0.0,
                _ => !trimmed.is_empty(),
            }
        }
    }
}

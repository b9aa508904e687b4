//! Number recognition used by the profiler.
//!
//! Two deliberately different rules are used:
//!
//! - [`parse_float_prefix`] is loose: it reads the longest numeric prefix and ignores trailing
//!   text (`"12px"` -> `12`). Type sniffing uses it.
//! - [`coerce_number`] is strict: the whole token must be a number. Statistics use it.
//!
//! [`looks_numeric`] and [`coerce_cell`] apply these rules to typed [`Cell`]s: JSON numbers are
//! always numeric, `true` coerces to 1, `false` and `null` to 0, and neither booleans nor `null`
//! look numeric.

use crate::types::Cell;

/// Parse the longest decimal-number prefix of `s`, after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fractional part, an optional exponent, and the
/// literal `Infinity`. Returns `None` when no number starts the string.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    if s[i..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j.min(bytes.len())..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    s[..i].parse::<f64>().ok()
}

/// Strictly coerce a whole token to a finite number.
///
/// Surrounding whitespace is ignored and a whitespace-only token coerces to `0`. Unsigned `0x`,
/// `0o` and `0b` integer literals are accepted. Anything else must parse as a complete decimal
/// number; infinities and NaN yield `None`.
pub fn coerce_number(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return Some(0.0);
    }

    if let Some(v) = parse_radix_literal(t) {
        return Some(v);
    }

    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Loose numeric test used by type sniffing.
pub fn looks_numeric(cell: &Cell) -> bool {
    match cell {
        Cell::Text(s) => !s.is_empty() && parse_float_prefix(s).is_some(),
        Cell::Number(_) => true,
        Cell::Bool(_) | Cell::Null => false,
    }
}

/// Strict numeric value used by statistics.
pub fn coerce_cell(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Text(s) | Cell::Number(s) => coerce_number(s),
        Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Cell::Null => Some(0.0),
    }
}

fn parse_radix_literal(t: &str) -> Option<f64> {
    if t.len() <= 2 || !t.is_char_boundary(2) {
        return None;
    }
    let (prefix, digits) = t.split_at(2);
    let radix = match prefix.to_ascii_lowercase().as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    // Accumulate in f64 so literals wider than any integer type still yield a value.
    digits
        .chars()
        .try_fold(0f64, |acc, c| c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d)))
        .filter(|v| v.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::{coerce_cell, coerce_number, looks_numeric, parse_float_prefix};
    use crate::types::Cell;

    #[test]
    fn prefix_parse_tolerates_trailing_text() {
        assert_eq!(parse_float_prefix("12px"), Some(12.0));
        assert_eq!(parse_float_prefix("  -3.5e2kg"), Some(-350.0));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix(".25"), Some(0.25));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("2e+x"), Some(2.0));
        assert_eq!(parse_float_prefix("Infinity and beyond"), Some(f64::INFINITY));
    }

    #[test]
    fn prefix_parse_rejects_non_numbers() {
        for s in ["", "   ", "abc", ".", "-", "+.", "e5", "$12", "inf", "NaN"] {
            assert_eq!(parse_float_prefix(s), None, "input {s:?}");
        }
    }

    #[test]
    fn strict_coercion_requires_the_whole_token() {
        assert_eq!(coerce_number(" 42 "), Some(42.0));
        assert_eq!(coerce_number("1e3"), Some(1000.0));
        assert_eq!(coerce_number("0x1A"), Some(26.0));
        assert_eq!(coerce_number("0b101"), Some(5.0));
        assert_eq!(coerce_number("   "), Some(0.0));
        assert_eq!(coerce_number("12px"), None);
        assert_eq!(coerce_number("Infinity"), None);
        assert_eq!(coerce_number("1e400"), None);
        assert_eq!(coerce_number("0xZZ"), None);
    }

    #[test]
    fn wide_radix_literals_still_coerce() {
        let hex = format!("0x{}", "f".repeat(40));
        let v = coerce_number(&hex).unwrap();
        assert!((v / 2f64.powi(160) - 1.0).abs() < 1e-12);

        let bin = format!("0b{}", "1".repeat(200));
        let v = coerce_number(&bin).unwrap();
        assert!((v / 2f64.powi(200) - 1.0).abs() < 1e-12);

        // Past f64 range the value is dropped like any other infinity.
        assert_eq!(coerce_number(&format!("0x{}", "f".repeat(300))), None);
    }

    #[test]
    fn typed_cells_follow_json_coercion() {
        assert!(looks_numeric(&Cell::number(3.5)));
        assert!(looks_numeric(&Cell::from("7 days")));
        assert!(!looks_numeric(&Cell::from("")));
        assert!(!looks_numeric(&Cell::Bool(true)));
        assert!(!looks_numeric(&Cell::Null));

        assert_eq!(coerce_cell(&Cell::Bool(true)), Some(1.0));
        assert_eq!(coerce_cell(&Cell::Bool(false)), Some(0.0));
        assert_eq!(coerce_cell(&Cell::Null), Some(0.0));
        assert_eq!(coerce_cell(&Cell::number(1e2)), Some(100.0));
        assert_eq!(coerce_cell(&Cell::from("abc")), None);
    }
}

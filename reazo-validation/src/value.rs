// Value coercions shared by the rule handlers.
//
// Form values arrive as loosely typed JSON. These helpers pin down how a
// value is judged present, rendered as text and read as a number.

use serde_json::Value;

/// Whether a value counts as filled in.
///
/// `null`, the empty string, `false` and numeric zero are all missing.
/// Arrays and objects are always present, even when empty.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a value for pattern, length and character checks.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        other => other.to_string(),
    }
}

/// Integral floats within the exactly representable range print without a
/// fraction, so `1.0` reads as `1`.
fn number_text(n: &serde_json::Number) -> String {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

/// Strict numeric conversion: the whole (trimmed) text must be a number.
///
/// Empty and whitespace-only strings convert to `0`, `null` and `false` to
/// `0`, `true` to `1`. Anything unparsable is NaN.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => string_to_number(s),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Lenient numeric conversion: the longest numeric prefix of the text,
/// leading whitespace skipped. NaN when there is none.
pub fn parse_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_float_str(s),
        other => parse_float_str(&stringify(other)),
    }
}

fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return match u64::from_str_radix(digits, radix) {
                Ok(n) if !digits.is_empty() => n as f64,
                _ => f64::NAN,
            };
        }
    }

    match decimal_prefix_len(s) {
        Some(len) if len == s.len() => parse_decimal(s),
        _ => f64::NAN,
    }
}

fn parse_float_str(s: &str) -> f64 {
    let s = s.trim_start();
    match decimal_prefix_len(s) {
        Some(len) => parse_decimal(&s[..len]),
        None => f64::NAN,
    }
}

fn parse_decimal(s: &str) -> f64 {
    let unsigned = s.trim_start_matches(['+', '-']);
    if unsigned == "Infinity" {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    s.parse().unwrap_or(f64::NAN)
}

/// Length of the longest prefix of `s` that is a decimal literal:
/// optional sign, then `Infinity` or digits with an optional fraction and
/// exponent. `None` if no digits are present.
fn decimal_prefix_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    if s[i..].starts_with("Infinity") {
        return Some(i + "Infinity".len());
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return None;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    Some(i)
}

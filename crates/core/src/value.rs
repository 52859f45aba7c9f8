//! Coercion of the raw `value` input into a JSON payload.
//!
//! Precedence: empty input becomes the current timestamp (ms), then JSON,
//! then a loose numeric literal, then the raw string itself.

use serde_json::{Number, Value};

/// Largest integer a double represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Coerce the raw input using the current wall-clock time for the
/// empty case.
pub fn coerce_value(raw: Option<&str>) -> Value {
    coerce_value_at(raw, chrono::Utc::now().timestamp_millis())
}

/// Coerce the raw input, using `now_millis` when it is empty.
pub fn coerce_value_at(raw: Option<&str>, now_millis: i64) -> Value {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            tracing::info!(timestamp = now_millis, "No value given, writing current timestamp");
            return Value::from(now_millis);
        }
    };

    if let Ok(parsed) = serde_json::from_str::<Value>(raw) {
        tracing::debug!("Value parsed as JSON");
        return parsed;
    }

    if let Some(number) = parse_loose_number(raw).and_then(number_value) {
        tracing::debug!("Value parsed as number");
        return number;
    }

    Value::String(raw.to_string())
}

/// Parse a numeric literal the way a lenient string-to-number
/// conversion would: surrounding whitespace ignored, unsigned
/// `0x`/`0o`/`0b` integers, and decimal forms JSON rejects such as
/// `007`, `.5`, `5.` or `+3`.
pub fn parse_loose_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&s[2..], radix);
    }

    // `f64::from_str` also accepts "inf", "nan" and friends; only plain
    // decimal literals are wanted here.
    let decimal = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
    if !decimal {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Turn a float into a JSON number, preferring an integer when the
/// value is integral and exactly representable.
///
/// Returns `None` for non-finite values, which JSON cannot carry.
pub fn number_value(n: f64) -> Option<Value> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Some(Value::from(n as i64));
    }
    Number::from_f64(n).map(Value::Number)
}

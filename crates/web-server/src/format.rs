// In crates/web-server/src/format.rs

//! Display formatting shared by the dashboard and the CLI report.

use std::fmt::Display;

/// Shown wherever a statistic or cell is undefined.
pub const NOT_AVAILABLE: &str = "N/A";

/// `$187.12`
pub fn currency(value: f64) -> String {
    signed(value, |v| format!("${v:.2}"))
}

/// `$1,234.56`
pub fn currency_grouped(value: f64) -> String {
    signed(value, |v| format!("${}", group_thousands(&format!("{v:.2}"))))
}

/// A fraction rendered as a percentage with two decimals: `0.1234` -> `12.34%`.
pub fn percent(value: Option<f64>) -> String {
    percent_with(value, 2)
}

/// A fraction rendered as a percentage with `decimals` places, or "N/A".
pub fn percent_with(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}%", decimals, v * 100.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Any displayable number with comma thousand separators, e.g. volumes.
pub fn grouped<T: Display>(value: T) -> String {
    let text = value.to_string();
    match text.strip_prefix('-') {
        Some(rest) => format!("-{}", group_thousands(rest)),
        None => group_thousands(&text),
    }
}

/// Inserts commas into the integer part of an unsigned decimal string.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn signed(value: f64, fmt: impl Fn(f64) -> String) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    if value < 0.0 {
        format!("-{}", fmt(-value))
    } else {
        fmt(value)
    }
}

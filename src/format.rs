//! Display formatting for amounts and dates

use chrono::{DateTime, Utc};

/// Format a US-dollar amount with thousands separators
///
/// Shows at most `max_fraction_digits` decimals and drops trailing zeros,
/// so `format_usd(1234.5, 2)` is `$1,234.5` and `format_usd(2278.7, 0)` is
/// `$2,279`.
pub fn format_usd(value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return format!("${}", value);
    }

    // Halves round away from zero, as `round_currency` does
    let factor = 10f64.powi(max_fraction_digits.min(15) as i32);
    let scaled = value.abs() * factor;
    let rounded = if scaled.is_finite() { scaled.round() / factor } else { value.abs() };

    let formatted = format!("{:.*}", max_fraction_digits, rounded);
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, fraction.trim_end_matches('0')),
        None => (formatted.as_str(), ""),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let is_zero = whole.chars().all(|c| c == '0') && fraction.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if fraction.is_empty() {
        format!("{}${}", sign, grouped)
    } else {
        format!("{}${}.{}", sign, grouped, fraction)
    }
}

/// Whole-dollar amount, as the savings calculator shows it
pub fn format_currency(value: f64) -> String {
    format_usd(value, 0)
}

/// History timestamp as the dashboard lists it (`May 1, 2024, 12:00 PM`)
pub fn format_history_date(timestamp: &str) -> Option<String> {
    let at = DateTime::parse_from_rfc3339(timestamp).ok()?.with_timezone(&Utc);
    Some(at.format("%b %-d, %Y, %I:%M %p").to_string())
}

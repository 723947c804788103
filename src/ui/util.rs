use rust_decimal::Decimal;
use std::str::FromStr;

/// Format a raw amount entry as a currency string: thousands separators,
/// two decimal places. Text that does not parse displays as zero; the
/// stored string itself is never touched.
pub(crate) fn format_amount(raw: &str) -> String {
    format_decimal(Decimal::from_str(raw.trim()).unwrap_or_default())
}

/// `1234567.89` → `"$1,234,567.89"`, `-5` → `"-$5.00"`.
pub(crate) fn format_decimal(value: Decimal) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits = int_part.len();
    let mut grouped = String::with_capacity(digits + digits / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < Decimal::ZERO {
        format!("-${grouped}.{dec_part}")
    } else {
        format!("${grouped}.{dec_part}")
    }
}

/// Truncate a string to `max` visible characters, ending in "…" when cut.
/// Counts characters, not bytes, so multi-byte text stays intact.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

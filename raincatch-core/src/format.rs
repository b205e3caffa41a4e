use chrono::Month;

/// Symbol used when no currency is configured.
pub const DEFAULT_CURRENCY: &str = "₹";

/// Abbreviates large numbers with K and M suffixes.
pub fn format_number(value: f64, decimals: usize) -> String {
    if value >= 1_000_000.0 {
        format!("{:.*}M", decimals, value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.*}K", decimals, value / 1_000.0)
    } else {
        format!("{:.*}", decimals, value)
    }
}

pub fn format_currency(amount: f64, symbol: &str) -> String {
    format!("{} {}", symbol, format_number(amount, 0))
}

/// Short month names for 1-based month numbers; out-of-range numbers are skipped.
pub fn format_months(months: &[u8]) -> String {
    months
        .iter()
        .filter_map(|&m| Month::try_from(m).ok())
        .map(|m| m.name()[..3].to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

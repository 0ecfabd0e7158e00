//! Display helpers. The engine reports raw currency amounts and decimal rates.

/// `12.3456` -> `$12.35`
pub fn format_currency(value: f64) -> String {
    format!("${value:.2}")
}

/// `0.05` -> `5.00%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

//! Text formatting for amounts and sizes.

/// Format an amount as Brazilian reais, e.g. `R$ 1.234,56`.
///
/// # Example
///
/// ```
/// use furniture::format_currency;
///
/// assert_eq!(format_currency(328.35), "R$ 328,35");
/// assert_eq!(format_currency(1234567.8), "R$ 1.234.567,80");
/// assert_eq!(format_currency(-15.0), "-R$ 15,00");
/// ```
#[must_use]
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = cents as u64;
    let units = (cents / 100).to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{:02}", cents % 100)
}

/// Format a byte count with one decimal and a binary unit, e.g. `1.5 MB`.
///
/// # Example
///
/// ```
/// use furniture::format_size;
///
/// assert_eq!(format_size(512), "512.0 B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// assert_eq!(format_size(500 * 1024 * 1024), "500.0 MB");
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}

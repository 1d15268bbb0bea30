//! Shared presentation helpers for table output.

/// Print a separator line of the given width.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format a count with thousands separators for readability.
///
/// Totals in the millions are the common case here, and `10,000,000` reads
/// much better than `10000000`.
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a price given in cents as a dollar amount.
#[must_use]
pub fn format_price(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

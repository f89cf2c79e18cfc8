//! Shared formatting helpers for report rendering.

/// Formats a duration in whole seconds as `"{d}d {h}h {m}m"`.
///
/// Negative inputs are clamped to zero.
#[must_use]
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let minutes = (seconds / 60) % 60;
    let hours = (seconds / 3600) % 24;
    let days = seconds / 86_400;
    format!("{days}d {hours}h {minutes}m")
}

/// Formats a quote-currency amount as `"$ {value:.2}"`.
#[must_use]
pub fn format_quote(value: rust_decimal::Decimal) -> String {
    format!("$ {:.2}", value)
}

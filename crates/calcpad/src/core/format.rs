//! Bounded-precision result formatting

use crate::core::ERROR_MARKER;

/// Fractional digits kept when a result is displayed
pub const DEFAULT_PRECISION: usize = 5;

/// Formats a result rounded to `precision` fractional digits.
///
/// Trailing fractional zeros and a dangling decimal point are removed, and
/// negative zero prints as `0`. Non-finite values print as [`ERROR_MARKER`].
#[must_use]
pub fn format_result(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return ERROR_MARKER.to_string();
    }

    let mut text = format!("{value:.precision$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }

    if text == "-0" {
        text.remove(0);
    }
    text
}

//! Time representation.
//!
//! The assignment model works in fractional minutes after midnight on
//! the service day, for both clock times and durations: every weight in
//! the cost tables is expressed per minute, so keeping a single `f64`
//! unit avoids conversions in the inner costing loop. Times past 24:00
//! are legal and denote service running past midnight.

/// Fractional minutes after midnight (clock time) or elapsed minutes
/// (duration).
pub type Minutes = f64;

/// Format a clock time as "HH:MM", wrapping past-midnight values onto
/// the next day.
///
/// Fractional minutes are rounded to the nearest whole minute for
/// display only.
///
/// # Examples
///
/// ```
/// use assign_core::domain::format_hhmm;
///
/// assert_eq!(format_hhmm(480.0), "08:00");
/// assert_eq!(format_hhmm(509.5), "08:30");
/// assert_eq!(format_hhmm(1500.0), "01:00");
/// ```
pub fn format_hhmm(time: Minutes) -> String {
    let total = time.round().rem_euclid(24.0 * 60.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

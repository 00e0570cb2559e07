//! Wall-clock display formatting.

use chrono::Timelike;

/// Formats a time of day as `hh:mm:ss AM` / `hh:mm:ss PM`.
///
/// Hours are zero-padded and midnight/noon show as `12`.
#[must_use]
pub fn format_12h<T: Timelike>(time: &T) -> String {
    let (is_pm, hour) = time.hour12();
    format!(
        "{hour:02}:{:02}:{:02} {}",
        time.minute(),
        time.second(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// Current local time, formatted with [`format_12h`].
#[must_use]
pub fn now_12h() -> String {
    format_12h(&chrono::Local::now())
}

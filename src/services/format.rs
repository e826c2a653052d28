//! Kilobyte rounding and local timestamp formatting

use std::time::SystemTime;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Convert a byte count to kilobytes rounded to two decimals
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bytes_to_kb(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}

/// Offset of the local timezone, or UTC when it cannot be determined
///
/// On Unix the local offset is only available while the process is
/// single-threaded, so it is resolved once and reused.
#[must_use]
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or_else(|err| {
        log::warn!("Local UTC offset unavailable ({err}); timestamps are reported in UTC");
        UtcOffset::UTC
    })
}

/// Format a timestamp as `DD/MM/YYYY HH:MM:SS` in the given offset
pub fn format_timestamp(
    time: SystemTime,
    offset: UtcOffset,
) -> Result<String, time::error::Format> {
    let format = format_description!("[day]/[month]/[year] [hour]:[minute]:[second]");
    OffsetDateTime::from(time).to_offset(offset).format(&format)
}

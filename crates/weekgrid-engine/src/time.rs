//! Wall-clock time arithmetic on minutes-of-day.
//!
//! All scheduling math happens on integer minutes since midnight. The value
//! `1440`, written `"24:00"`, is the reserved end-of-day sentinel: it lets a
//! block reach the end of its day while every interval stays half-open.

/// Minutes since midnight, `0..=1440`.
pub type Minute = u16;

/// The end-of-day sentinel: 24 hours in minutes.
pub const MINUTES_PER_DAY: Minute = 1440;

/// Parse an `"HH:MM"` string into minutes since midnight.
///
/// `"24:00"` parses to the end-of-day sentinel `1440`. An empty or
/// malformed string parses to `0`: interactive callers rely on this never
/// failing, so garbage coerces to midnight instead of erroring. Fields
/// past the first two are ignored (`"09:30:00"` reads as `"09:30"`), and
/// the arithmetic saturates rather than overflowing on absurd hours.
///
/// # Examples
/// ```
/// use weekgrid_engine::time::to_minutes;
///
/// assert_eq!(to_minutes("09:30"), 570);
/// assert_eq!(to_minutes("24:00"), 1440);
/// assert_eq!(to_minutes("not a time"), 0);
/// ```
pub fn to_minutes(time: &str) -> Minute {
    if time == "24:00" {
        return MINUTES_PER_DAY;
    }

    let mut fields = time.split(':');
    match (
        fields.next().and_then(|h| h.parse::<Minute>().ok()),
        fields.next().and_then(|m| m.parse::<Minute>().ok()),
    ) {
        (Some(hours), Some(minutes)) => hours.saturating_mul(60).saturating_add(minutes),
        _ => 0,
    }
}

/// Render minutes since midnight as a zero-padded `"HH:MM"` string.
///
/// Every value at or above [`MINUTES_PER_DAY`] collapses to the `"24:00"`
/// sentinel; there is no wrap-around into a next day.
///
/// # Examples
/// ```
/// use weekgrid_engine::time::to_time;
///
/// assert_eq!(to_time(570), "09:30");
/// assert_eq!(to_time(0), "00:00");
/// assert_eq!(to_time(1440), "24:00");
/// ```
pub fn to_time(minutes: Minute) -> String {
    if minutes >= MINUTES_PER_DAY {
        return String::from("24:00");
    }
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Rewrite a time string for display on a block label.
///
/// The `"24:00"` sentinel renders as `"00:00"`: visually the block ends at
/// midnight. Everything else, including the empty string, passes through.
pub fn display_time(time: &str) -> String {
    if time == "24:00" {
        String::from("00:00")
    } else {
        time.to_string()
    }
}

use chrono::{DateTime, Local, Utc};

const SECOND: i64 = 1;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Formats how long ago `time` was, e.g. "2 hours ago", "last week". Returns
/// "now" for anything under 30 seconds, including times in the future.
pub fn format_since(time: DateTime<Utc>) -> String {
    format_since_at(time, Utc::now())
}

fn format_since_at(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = (now - time).num_seconds().max(0);

    let unit: &str;
    let value: i64;
    if duration < MINUTE {
        unit = "second";
        if duration < 30 {
            return String::from("now");
        }
        value = duration;
    } else if duration < HOUR {
        unit = "minute";
        value = duration / MINUTE;
    } else if duration < DAY {
        unit = "hour";
        value = duration / HOUR;
    } else if duration < WEEK {
        unit = "day";
        value = duration / DAY;
    } else if duration < MONTH {
        unit = "week";
        value = duration / WEEK;
    } else if duration < YEAR {
        unit = "month";
        value = duration / MONTH;
    } else {
        unit = "year";
        value = duration / YEAR;
    }

    if value > 1 {
        format!("{value} {unit}s ago")
    } else {
        format!("last {unit}")
    }
}

/// Formats a timestamp as local wall-clock time, e.g. "08:00:12".
pub fn format_local_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%H:%M:%S").to_string()
}

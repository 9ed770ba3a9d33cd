//! Publication time formatting.

use chrono::{DateTime, Utc};

use crate::config::TIME_AGO_THRESHOLD_SECS;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Pick singular or plural unit and render `"{n} {unit}"`.
fn count(n: i64, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Divide and round to the nearest whole unit, never below one.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn units(diff: i64, unit: i64) -> i64 {
    ((diff as f64 / unit as f64).round() as i64).max(1)
}

/// Human-readable distance between two instants ("5 mins", "2 hours").
///
/// The order of the arguments does not matter.
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use newsdesk_excerpt::time::human_time_diff;
///
/// let now = Utc::now();
/// assert_eq!(human_time_diff(now - Duration::minutes(5), now), "5 mins");
/// assert_eq!(human_time_diff(now - Duration::hours(1), now), "1 hour");
/// ```
pub fn human_time_diff(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let diff = (to - from).num_seconds().abs();

    if diff < HOUR {
        count(units(diff, MINUTE), "min", "mins")
    } else if diff < DAY {
        count(units(diff, HOUR), "hour", "hours")
    } else if diff < WEEK {
        count(units(diff, DAY), "day", "days")
    } else if diff < MONTH {
        count(units(diff, WEEK), "week", "weeks")
    } else if diff < YEAR {
        count(units(diff, MONTH), "month", "months")
    } else {
        count(units(diff, YEAR), "year", "years")
    }
}

/// Long-form publication date, e.g. "March 1, 2024".
pub fn format_date(published: DateTime<Utc>) -> String {
    published.format("%B %-d, %Y").to_string()
}

/// Machine-readable timestamp for `datetime` attributes.
pub fn format_iso(published: DateTime<Utc>) -> String {
    published.to_rfc3339()
}

/// Publication time as shown next to a post.
///
/// Posts published less than a day before `now` get a "time ago" span;
/// older posts show their date.
pub fn post_time(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if (now - published).num_seconds() < TIME_AGO_THRESHOLD_SECS {
        format!(
            r#"<span class="time-ago">{} ago</span>"#,
            human_time_diff(published, now)
        )
    } else {
        format_date(published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_human_time_diff_minutes() {
        assert_eq!(human_time_diff(now(), now()), "1 min");
        assert_eq!(human_time_diff(now() - Duration::seconds(20), now()), "1 min");
        assert_eq!(human_time_diff(now() - Duration::seconds(90), now()), "2 mins");
        assert_eq!(human_time_diff(now() - Duration::minutes(59), now()), "59 mins");
    }

    #[test]
    fn test_human_time_diff_hours_and_days() {
        assert_eq!(human_time_diff(now() - Duration::minutes(60), now()), "1 hour");
        assert_eq!(human_time_diff(now() - Duration::minutes(150), now()), "3 hours");
        assert_eq!(human_time_diff(now() - Duration::hours(30), now()), "1 day");
        assert_eq!(human_time_diff(now() - Duration::days(6), now()), "6 days");
    }

    #[test]
    fn test_human_time_diff_long_ranges() {
        assert_eq!(human_time_diff(now() - Duration::days(14), now()), "2 weeks");
        assert_eq!(human_time_diff(now() - Duration::days(95), now()), "3 months");
        assert_eq!(human_time_diff(now() - Duration::days(800), now()), "2 years");
    }

    #[test]
    fn test_human_time_diff_is_symmetric() {
        let earlier = now() - Duration::hours(5);
        assert_eq!(human_time_diff(earlier, now()), human_time_diff(now(), earlier));
    }

    #[test]
    fn test_post_time_recent_shows_time_ago() {
        assert_eq!(
            post_time(now() - Duration::hours(2), now()),
            r#"<span class="time-ago">2 hours ago</span>"#
        );
    }

    #[test]
    fn test_post_time_old_shows_date() {
        assert_eq!(post_time(now() - Duration::days(1), now()), "February 29, 2024");
        assert_eq!(post_time(now() - Duration::days(40), now()), "January 21, 2024");
    }

    #[test]
    fn test_format_iso() {
        assert_eq!(format_iso(now()), "2024-03-01T12:00:00+00:00");
    }
}

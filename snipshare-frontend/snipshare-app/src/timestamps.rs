use chrono::NaiveDateTime;
use timeago::Formatter;

pub const UNKNOWN_TIME: &str = "Unknown time";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses the server's `YYYY-MM-DD HH:MM:SS` UTC timestamps.
pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(timestamp.trim(), TIMESTAMP_FORMAT).ok()
}

/// "5 minutes ago" style label for `timestamp` as seen at `now`.
pub fn time_ago(timestamp: &str, now: NaiveDateTime) -> String {
    let Some(then) = parse_timestamp(timestamp) else {
        log::error!("Invalid Date: {timestamp}");
        return UNKNOWN_TIME.to_string();
    };
    match (now - then).to_std() {
        Ok(elapsed) if elapsed.as_secs() >= 1 => {
            let label = Formatter::new().convert(elapsed);
            match label.as_str() {
                "1 day ago" => "yesterday".to_string(),
                "1 week ago" => "last week".to_string(),
                "1 month ago" => "last month".to_string(),
                "1 year ago" => "last year".to_string(),
                _ => label,
            }
        }
        _ => "just now".to_string(),
    }
}

/// Absolute time for the element's tooltip.
pub fn absolute_label(timestamp: &str) -> Option<String> {
    parse_timestamp(timestamp).map(|t| t.format("%b %-d, %Y %H:%M UTC").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> NaiveDateTime {
        parse_timestamp("2024-03-10 12:00:00").unwrap()
    }

    #[test]
    fn formats_relative_times() {
        let stamp = |d: Duration| (now() - d).format(TIMESTAMP_FORMAT).to_string();
        assert_eq!(time_ago(&stamp(Duration::minutes(5)), now()), "5 minutes ago");
        assert_eq!(time_ago(&stamp(Duration::hours(1)), now()), "1 hour ago");
        assert_eq!(time_ago(&stamp(Duration::days(3)), now()), "3 days ago");
    }

    #[test]
    fn single_calendar_units_read_naturally() {
        let stamp = |d: Duration| (now() - d).format(TIMESTAMP_FORMAT).to_string();
        assert_eq!(time_ago(&stamp(Duration::days(1)), now()), "yesterday");
        assert_eq!(time_ago(&stamp(Duration::days(8)), now()), "last week");
        assert_eq!(time_ago(&stamp(Duration::days(400)), now()), "last year");
        assert_eq!(time_ago(&stamp(Duration::minutes(1)), now()), "1 minute ago");
    }

    #[test]
    fn recent_and_future_times_are_just_now() {
        assert_eq!(time_ago("2024-03-10 12:00:00", now()), "just now");
        assert_eq!(time_ago("2024-03-10 12:05:00", now()), "just now");
    }

    #[test]
    fn invalid_timestamps_fall_back() {
        assert_eq!(time_ago("yesterday-ish", now()), UNKNOWN_TIME);
        assert_eq!(time_ago("", now()), UNKNOWN_TIME);
        assert_eq!(absolute_label("nope"), None);
    }

    #[test]
    fn absolute_label_is_utc() {
        assert_eq!(
            absolute_label("2024-03-10 09:05:00").as_deref(),
            Some("Mar 10, 2024 09:05 UTC")
        );
    }
}

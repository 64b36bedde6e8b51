use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO8601_DURATION: Regex =
        Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("valid duration pattern");
}

/// Longest duration (inclusive) still counted as a short-form video.
pub const SHORT_FORM_MAX_SECONDS: u64 = 60;

/// Parse ISO8601 duration string (PT1H2M3S) to total seconds.
///
/// Absent, empty or malformed input yields 0. Missing components count as 0.
pub fn parse_iso8601_duration_to_seconds(duration: Option<&str>) -> u64 {
    let Some(duration_str) = duration.filter(|d| !d.is_empty()) else {
        return 0;
    };

    let Some(captures) = ISO8601_DURATION.captures(duration_str) else {
        return 0;
    };

    // matched digits that overflow saturate
    let component = |index: usize| -> u64 {
        captures
            .get(index)
            .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
            .unwrap_or(0)
    };

    component(1)
        .saturating_mul(3600)
        .saturating_add(component(2).saturating_mul(60))
        .saturating_add(component(3))
}

pub fn is_short_form(duration_seconds: u64) -> bool {
    duration_seconds > 0 && duration_seconds <= SHORT_FORM_MAX_SECONDS
}

/// RFC 3339 timestamp `period_days` before `now`, as the `publishedAfter` filter expects it.
pub fn published_after(now: DateTime<Utc>, period_days: u32) -> Option<String> {
    let lookback = TimeDelta::try_days(i64::from(period_days))?;
    now.checked_sub_signed(lookback)
        .map(|start| start.to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Date portion (YYYY-MM-DD) of an upstream timestamp.
pub fn date_portion(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

/// View counts arrive as strings; anything unparsable ranks as zero.
pub fn parse_count(count: &str) -> u64 {
    count.trim().parse::<u64>().unwrap_or(0)
}

/// Order-preserving dedup, used before batching ids into one lookup.
pub fn distinct_in_order<I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

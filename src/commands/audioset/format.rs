//! Parsing and display helpers shared by the settings commands.

use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::LazyLock;
use thousands::Separable;

use crate::settings::Scope;

/// Accepted `/audioset * volume` ceilings, in percent.
pub const VOLUME_RANGE: RangeInclusive<u64> = 10..=500;

/// Accepted `/audioset * maxqueue` sizes, in tracks.
pub const QUEUE_RANGE: RangeInclusive<u64> = 10..=20_000;

static CLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(\d+):)?([0-5]?\d):([0-5]\d)$").unwrap());

/// Parses `hh:mm:ss`, `mm:ss` or a plain number of seconds.
pub fn parse_duration(input: &str) -> Option<u64> {
    let input = input.trim();
    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        return input.parse().ok();
    }

    let captures = CLOCK_REGEX.captures(input)?;
    let hours: u64 = match captures.get(1) {
        Some(hours) => hours.as_str().parse().ok()?,
        None => 0,
    };
    let minutes: u64 = captures[2].parse().ok()?;
    let seconds: u64 = captures[3].parse().ok()?;
    hours
        .checked_mul(3600)?
        .checked_add(minutes * 60 + seconds)
}

/// Formats seconds as `h:mm:ss`, or `m:ss` under an hour.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// A limit where 0 means unbounded.
pub fn format_limit(value: u64, unit: &str) -> String {
    if value == 0 {
        "no limit".to_string()
    } else {
        format!("{} {}", value.separate_with_commas(), unit)
    }
}

pub fn format_length_limit(value: u64) -> String {
    if value == 0 {
        "no limit".to_string()
    } else {
        format_duration(value)
    }
}

pub fn format_toggle(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

/// "server", or "server (set by global)" when another scope won.
pub fn format_source(source: Scope, requested: Scope) -> String {
    if source == requested {
        source.to_string()
    } else {
        format!("{} (set by {})", requested, source)
    }
}

/// Splits a comma separated argument into trimmed, non-empty entries.
pub fn split_list(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

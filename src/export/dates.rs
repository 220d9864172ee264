use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static ISO_DATETIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{1,2}-\d{1,2})T").expect("valid regex"));

static WEEKDAY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+").expect("valid regex")
});

static ORDINAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("valid regex"));

static TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\s*[,@-]\s*|\s+at\s+|\s+)\d{1,2}(?::\d{2}){1,2}\s*(?:[ap]\.?m\.?)?(?:\s+[a-z]{2,4})?$",
    )
    .expect("valid regex")
});

// Two-digit years before four-digit ones: `%Y` would read "24" as year 24.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

/// Read the free-text date shown on a results page.
///
/// Weekday prefixes, ordinal suffixes and a trailing kick-off time are
/// ignored. Returns `None` for anything else, such as `"TBD"`.
pub fn parse_match_date(text: &str) -> Option<NaiveDate> {
    let mut text = WHITESPACE_REGEX.replace_all(text, " ").trim().to_string();
    if let Some(caps) = ISO_DATETIME_REGEX.captures(&text) {
        text = caps[1].to_string();
    }
    let text = WEEKDAY_REGEX.replace(&text, "");
    let text = ORDINAL_REGEX.replace_all(&text, "$1");
    let text = TIME_REGEX.replace(&text, "");
    let text = text.trim().trim_end_matches(',');

    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

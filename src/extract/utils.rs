use crate::browser::Element;
use crate::error::{Result, ScrapeError};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

const APPEARANCES_MARKER: &str = "Appearances:";
pub(super) const NO_APPEARANCES: &str = "0";

/// Trimmed attribute value; absent or blank is an error.
pub(super) fn required_attr<E: Element>(el: &E, selector: &str, attr: &str) -> Result<String> {
    el.attribute(attr)?
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ScrapeError::missing_attribute(selector, attr))
}

pub(super) fn resolve_link(page_url: &str, href: &str) -> Result<String> {
    let base = Url::parse(page_url).map_err(|e| ScrapeError::Parse(format!("{page_url}: {e}")))?;
    base.join(href.trim())
        .map(String::from)
        .map_err(|e| ScrapeError::Parse(format!("team link {href}: {e}")))
}

/// Collapse runs of whitespace to one space and trim.
pub(super) fn clean_text(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Rejoin a name the page splits across lines.
///
/// `"Jane\nDoe"` becomes `"Jane Doe"`.
pub fn join_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count following the `Appearances:` marker, or `"0"` without one.
pub fn parse_appearances(text: &str) -> String {
    match text.split_once(APPEARANCES_MARKER) {
        Some((_, rest)) if !rest.trim().is_empty() => rest.trim().to_string(),
        _ => NO_APPEARANCES.to_string(),
    }
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A required attribute was absent (or blank) on a matched element.
    #[error("missing attribute `{attribute}` on `{selector}`")]
    MissingAttribute { selector: String, attribute: String },

    #[error("missing element `{selector}`")]
    MissingElement { selector: String },

    /// A condition wait gave up before the element appeared.
    #[error("timed out after {timeout_ms}ms waiting for `{selector}`")]
    Timeout { selector: String, timeout_ms: u64 },

    #[error("parse error: {0}")]
    Parse(String),

    /// One table/list row was malformed; callers skip it.
    #[error("row {row}: {reason}")]
    ExtractionRow { row: usize, reason: String },

    /// A conference/team path the operation requires is absent.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    pub fn missing_attribute(selector: &str, attribute: &str) -> Self {
        ScrapeError::MissingAttribute {
            selector: selector.to_string(),
            attribute: attribute.to_string(),
        }
    }

    pub fn missing_element(selector: &str) -> Self {
        ScrapeError::MissingElement {
            selector: selector.to_string(),
        }
    }

    /// Row-level errors never abort a pass.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ScrapeError::ExtractionRow { .. })
    }
}

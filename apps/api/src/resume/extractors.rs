//! Field Extractors: stateless pattern detectors shared by the contact pass
//! and the education/experience date inference.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b")
        .expect("email regex is valid")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?[0-9\s()-]{10,}").expect("phone regex is valid"));

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)[0-9]{2}\b").expect("year regex is valid"));

/// Tried in order; the first pattern with any match wins.
static DURATION_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"\b[0-9]{4}\s*-\s*[0-9]{4}\b").expect("year range regex is valid"),
        Regex::new(r"(?i)\b[0-9]{4}\s*-\s*present\b").expect("open range regex is valid"),
        Regex::new(r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\w*\s+[0-9]{4}")
            .expect("month-year regex is valid"),
    ]
});

pub fn extract_email(line: &str) -> Option<&str> {
    EMAIL_PATTERN.find(line).map(|m| m.as_str())
}

/// Optional `+`, then at least 10 digits/spaces/hyphens/parentheses.
/// Surrounding whitespace picked up by the character class is trimmed, and
/// runs that are nothing but whitespace are skipped.
pub fn extract_phone(line: &str) -> Option<&str> {
    PHONE_PATTERN
        .find_iter(line)
        .map(|m| m.as_str().trim())
        .find(|phone| !phone.is_empty())
}

pub fn extract_year(text: &str) -> Option<&str> {
    YEAR_PATTERN.find(text).map(|m| m.as_str())
}

/// `YYYY-YYYY`, `YYYY-present`, or `<month> YYYY`, in that priority.
pub fn extract_duration(text: &str) -> Option<&str> {
    DURATION_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str())
}

//! Line Normalizer: turns raw extracted text into trimmed, non-empty lines.

/// Splits on `\n`, `\r\n` and bare `\r`, trims each line and drops blanks.
/// Relative order is preserved; empty input yields an empty vector.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

//! Entry layout heuristics for the education and experience sections.
//!
//! The parser hands a layout a *block*: the entry's head line followed by the
//! lines that precede the next section marker. The layout decides which of
//! those lines belong to the entry and reports how many it consumed.

use crate::models::resume::{EducationEntry, ExperienceEntry};
use crate::resume::extractors::{extract_duration, extract_year};

pub trait SectionLayout {
    /// `block[0]` is the head line. Returns the entry and the number of lines
    /// it consumed (at least 1).
    fn education(&self, block: &[String]) -> (EducationEntry, usize);

    fn experience(&self, block: &[String]) -> (ExperienceEntry, usize);
}

/// Position-based layout: the line after the head is the institution/company,
/// the line after that is the role description.
///
/// Lookahead lines are only read, so a long institution or company line can
/// still head the next entry. The exception is the line the year/duration
/// came from: the entry consumes everything up to and including it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalLayout;

impl SectionLayout for PositionalLayout {
    fn education(&self, block: &[String]) -> (EducationEntry, usize) {
        let attached = &block[..block.len().min(2)];
        let (year, consumed) = first_match(attached, extract_year);

        (
            EducationEntry {
                degree: line_at(attached, 0),
                institution: line_at(attached, 1),
                year,
            },
            consumed,
        )
    }

    fn experience(&self, block: &[String]) -> (ExperienceEntry, usize) {
        let attached = &block[..block.len().min(3)];
        let (duration, consumed) = first_match(attached, extract_duration);

        (
            ExperienceEntry {
                title: line_at(attached, 0),
                company: line_at(attached, 1),
                duration,
                description: line_at(attached, 2),
            },
            consumed,
        )
    }
}

fn line_at(lines: &[String], index: usize) -> String {
    lines.get(index).cloned().unwrap_or_default()
}

/// First extractor hit scanning the lines in order, with the number of lines
/// read to reach it (1 when nothing matched).
fn first_match(lines: &[String], extract: fn(&str) -> Option<&str>) -> (String, usize) {
    lines
        .iter()
        .enumerate()
        .find_map(|(index, line)| extract(line).map(|found| (found.to_string(), index + 1)))
        .unwrap_or_else(|| (String::new(), 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_education_year_falls_back_to_institution() {
        let (entry, consumed) =
            PositionalLayout.education(&block(&["BS Computer Science", "MIT 2015", "extra"]));
        assert_eq!(entry.degree, "BS Computer Science");
        assert_eq!(entry.institution, "MIT 2015");
        assert_eq!(entry.year, "2015");
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_education_year_prefers_degree_line() {
        let (entry, _) =
            PositionalLayout.education(&block(&["MSc Physics 2012", "Oxford 2010"]));
        assert_eq!(entry.year, "2012");
    }

    #[test]
    fn test_education_head_only() {
        let (entry, consumed) = PositionalLayout.education(&block(&["PhD in Linguistics"]));
        assert_eq!(entry.institution, "");
        assert_eq!(entry.year, "");
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_experience_full_block() {
        let (entry, consumed) = PositionalLayout.experience(&block(&[
            "Software Engineer",
            "Acme Corp",
            "2019-2022 built APIs",
            "next entry",
        ]));
        assert_eq!(entry.title, "Software Engineer");
        assert_eq!(entry.company, "Acme Corp");
        assert_eq!(entry.duration, "2019-2022");
        assert_eq!(entry.description, "2019-2022 built APIs");
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_experience_duration_from_head() {
        let (entry, consumed) =
            PositionalLayout.experience(&block(&["Data Analyst Jan 2018", "Globex"]));
        assert_eq!(entry.duration, "Jan 2018");
        assert_eq!(entry.company, "Globex");
        assert_eq!(entry.description, "");
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_undated_entry_consumes_only_its_head() {
        let (entry, consumed) = PositionalLayout.education(&block(&[
            "BS Computer Science",
            "MS Computer Science",
        ]));
        assert_eq!(entry.institution, "MS Computer Science");
        assert_eq!(entry.year, "");
        assert_eq!(consumed, 1);

        let (entry, consumed) = PositionalLayout.experience(&block(&[
            "Software Engineer at Acme",
            "Data Engineer at Globex",
            "Intern at Initech Labs",
        ]));
        assert_eq!(entry.company, "Data Engineer at Globex");
        assert_eq!(entry.description, "Intern at Initech Labs");
        assert_eq!(consumed, 1);
    }
}

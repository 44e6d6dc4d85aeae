//! Resume Structuring Parser: drives the section state machine over
//! normalised lines and assembles a `ResumeProfile`.
//!
//! Never fails: text without recognisable structure yields empty fields.

use tracing::debug;

use crate::models::resume::ResumeProfile;
use crate::resume::extractors::{extract_email, extract_phone};
use crate::resume::layout::{PositionalLayout, SectionLayout};
use crate::resume::normalizer::normalize_lines;
use crate::resume::skills::detect_skills;

/// Education and experience are each capped at this many entries.
pub const MAX_SECTION_ENTRIES: usize = 5;

/// Entry head lines must be longer than this many characters.
const MIN_ENTRY_LINE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Education,
    Experience,
}

/// Returns the section a marker line switches to, if the line is a marker.
fn section_marker(line: &str) -> Option<Section> {
    let lower = line.to_lowercase();
    if lower.contains("education") || lower.contains("academic") {
        Some(Section::Education)
    } else if lower.contains("experience") || lower.contains("work") || lower.contains("employment")
    {
        Some(Section::Experience)
    } else {
        None
    }
}

pub struct ResumeParser<L = PositionalLayout> {
    layout: L,
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new(PositionalLayout)
    }
}

impl<L: SectionLayout> ResumeParser<L> {
    pub fn new(layout: L) -> Self {
        Self { layout }
    }

    pub fn parse(&self, lines: &[String]) -> ResumeProfile {
        let name = lines.first().cloned().unwrap_or_default();

        let mut email = String::new();
        let mut phone = String::new();
        for line in lines {
            if email.is_empty() {
                if let Some(found) = extract_email(line) {
                    email = found.to_string();
                }
            }
            if phone.is_empty() {
                if let Some(found) = extract_phone(line) {
                    phone = found.to_string();
                }
            }
        }

        let skills = detect_skills(lines);

        let mut education = Vec::new();
        let mut experience = Vec::new();
        let mut section = Section::Preamble;
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];

            if let Some(next) = section_marker(line) {
                section = next;
                i += 1;
                continue;
            }

            if section == Section::Preamble || line.chars().count() <= MIN_ENTRY_LINE_CHARS {
                i += 1;
                continue;
            }

            // Lookahead stops at the next marker line.
            let end = lines[i + 1..]
                .iter()
                .position(|l| section_marker(l).is_some())
                .map_or(lines.len(), |offset| i + 1 + offset);
            let block = &lines[i..end];

            let consumed = match section {
                Section::Education => {
                    let (entry, consumed) = self.layout.education(block);
                    education.push(entry);
                    consumed
                }
                Section::Experience => {
                    let (entry, consumed) = self.layout.experience(block);
                    experience.push(entry);
                    consumed
                }
                Section::Preamble => 1,
            };
            i += consumed.max(1);
        }

        education.truncate(MAX_SECTION_ENTRIES);
        experience.truncate(MAX_SECTION_ENTRIES);

        debug!(
            lines = lines.len(),
            skills = skills.len(),
            education = education.len(),
            experience = experience.len(),
            "parsed resume"
        );

        ResumeProfile {
            name,
            email,
            phone,
            skills,
            education,
            experience,
        }
    }
}

/// Normalises raw extracted text and parses it with the default layout.
pub fn parse_resume_text(text: &str) -> ResumeProfile {
    ResumeParser::default().parse(&normalize_lines(text))
}

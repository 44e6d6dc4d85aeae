use serde::{Deserialize, Serialize};

/// Placeholder used for name/affiliation when the profile page omits them.
pub const UNKNOWN: &str = "Unknown";

/// Academic profile as scraped from a public citation profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScholarProfile {
    pub name: String,
    pub affiliation: String,
    pub research_interests: Vec<String>,
    /// At most 10 entries.
    pub publications: Vec<Publication>,
    pub total_citations: u32,
    pub h_index: u32,
    pub i10_index: u32,
}

impl Default for ScholarProfile {
    fn default() -> Self {
        Self {
            name: UNKNOWN.to_string(),
            affiliation: UNKNOWN.to_string(),
            research_interests: Vec::new(),
            publications: Vec::new(),
            total_citations: 0,
            h_index: 0,
            i10_index: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub title: String,
    pub authors: String,
    pub venue: String,
    pub year: String,
    pub citations: u32,
}

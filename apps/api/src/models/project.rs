use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A pre-authored project recommendation, as declared in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    pub required_skills: Vec<String>,
    pub tags: Vec<String>,
}

/// A scored descriptor handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSuggestion {
    pub id: String,
    #[serde(flatten)]
    pub project: ProjectDescriptor,
    /// 20..=95 for overlap-scored entries, 90 for interest-derived entries.
    pub match_score: u32,
}

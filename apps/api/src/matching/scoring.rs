//! Matching & Scoring Engine: ranks catalogue projects against a resume
//! and/or scholar profile.
//!
//! Algorithm:
//! 1. skills = resume skills, interests = scholar research interests
//! 2. For every applicable template (catalogue order), for every project:
//!    overlap = required skills contained (case-insensitively) in some user skill
//!    score   = round(clamp(overlap / required × 100, 20, 95))
//! 3. One fixed-score (90) research project per scholar interest
//! 4. Stable sort by score descending, keep the top 8

use std::sync::{Arc, LazyLock};

use chrono::Utc;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::matching::catalogue::Catalogue;
use crate::models::project::{Difficulty, ProjectDescriptor, ProjectSuggestion};
use crate::models::resume::ResumeProfile;
use crate::models::scholar::ScholarProfile;

pub const MIN_MATCH_SCORE: u32 = 20;
pub const MAX_MATCH_SCORE: u32 = 95;
pub const RESEARCH_MATCH_SCORE: u32 = 90;
pub const MAX_SUGGESTIONS: usize = 8;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("No data provided for suggestions")]
    NoInput,
}

/// The project matcher trait. `AppState` carries it as `Arc<dyn ProjectMatcher>`.
pub trait ProjectMatcher: Send + Sync {
    fn suggest(
        &self,
        resume: Option<&ResumeProfile>,
        scholar: Option<&ScholarProfile>,
    ) -> Result<Vec<ProjectSuggestion>, MatchError>;
}

/// Default matcher: skill-overlap scoring over a shared catalogue, with the
/// current Unix-millisecond time as the id disambiguator.
pub struct SkillOverlapMatcher {
    catalogue: Arc<Catalogue>,
}

impl SkillOverlapMatcher {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self { catalogue }
    }
}

impl ProjectMatcher for SkillOverlapMatcher {
    fn suggest(
        &self,
        resume: Option<&ResumeProfile>,
        scholar: Option<&ScholarProfile>,
    ) -> Result<Vec<ProjectSuggestion>, MatchError> {
        score_projects(
            &self.catalogue,
            resume,
            scholar,
            Utc::now().timestamp_millis(),
        )
    }
}

/// Scores the catalogue; `stamp` is appended to template-derived ids.
pub fn score_projects(
    catalogue: &Catalogue,
    resume: Option<&ResumeProfile>,
    scholar: Option<&ScholarProfile>,
    stamp: i64,
) -> Result<Vec<ProjectSuggestion>, MatchError> {
    if resume.is_none() && scholar.is_none() {
        return Err(MatchError::NoInput);
    }

    let skills: &[String] = resume.map(|r| r.skills.as_slice()).unwrap_or_default();
    let interests: &[String] = scholar
        .map(|s| s.research_interests.as_slice())
        .unwrap_or_default();

    let mut suggestions: Vec<ProjectSuggestion> = catalogue
        .templates()
        .iter()
        .filter(|template| template.applicability.applies(skills, interests))
        .flat_map(|template| template.projects.iter())
        .map(|project| ProjectSuggestion {
            id: format!("{}-{stamp}", slugify(&project.title)),
            match_score: match_score(&project.required_skills, skills),
            project: project.clone(),
        })
        .collect();

    suggestions.extend(
        interests
            .iter()
            .enumerate()
            .map(|(index, interest)| research_suggestion(interest, index)),
    );

    let considered = suggestions.len();
    // Vec::sort_by is stable: equal scores keep emission order.
    suggestions.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    suggestions.truncate(MAX_SUGGESTIONS);

    debug!(
        skills = skills.len(),
        interests = interests.len(),
        considered,
        returned = suggestions.len(),
        "scored project suggestions"
    );

    Ok(suggestions)
}

/// Number of required skills contained, case-insensitively, in any user skill.
pub fn overlap_count(required: &[String], skills: &[String]) -> usize {
    let skills: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();
    required
        .iter()
        .filter(|req| {
            let req = req.to_lowercase();
            skills.iter().any(|skill| skill.contains(&req))
        })
        .count()
}

/// Overlap percentage clamped to 20..=95. No required skills counts as 0%.
pub fn match_score(required: &[String], skills: &[String]) -> u32 {
    let raw = if required.is_empty() {
        0.0
    } else {
        overlap_count(required, skills) as f64 / required.len() as f64 * 100.0
    };
    raw.clamp(MIN_MATCH_SCORE as f64, MAX_MATCH_SCORE as f64)
        .round() as u32
}

fn research_suggestion(interest: &str, index: usize) -> ProjectSuggestion {
    let slug = slugify(interest);
    ProjectSuggestion {
        id: format!("research-{slug}-{index}"),
        project: ProjectDescriptor {
            title: format!("{interest} Research Project"),
            description: format!(
                "Develop a project specifically focused on {interest} based on your research background and publications."
            ),
            category: "Research".to_string(),
            difficulty: Difficulty::Advanced,
            estimated_time: "12-16 weeks".to_string(),
            required_skills: vec![
                interest.to_string(),
                "Research Methodology".to_string(),
                "Academic Writing".to_string(),
            ],
            tags: vec!["research".to_string(), "academic".to_string(), slug],
        },
        match_score: RESEARCH_MATCH_SCORE,
    }
}

/// Lowercases and replaces each whitespace run with `-`.
pub fn slugify(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&text.to_lowercase(), "-")
        .into_owned()
}

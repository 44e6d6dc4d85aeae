//! Template Catalogue: ordered, declarative project templates.
//!
//! Each template pairs an applicability rule with one or more project
//! descriptors. The built-in table can be replaced by a JSON file with the
//! same shape (see `Catalogue::from_path`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::project::{Difficulty, ProjectDescriptor};

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("Failed to read catalogue file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalogue JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalogue has no unconditional fallback template")]
    NoFallback,

    #[error("Template '{0}' declares no projects")]
    EmptyTemplate(String),
}

/// When a template contributes its projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Applicability {
    Always,
    /// Some profile skill is exactly one of `skills`.
    AnySkill { skills: Vec<String> },
    /// As `AnySkill`, or some lowercased interest contains one of `interest_terms`.
    AnySkillOrInterest {
        skills: Vec<String>,
        interest_terms: Vec<String>,
    },
}

impl Applicability {
    pub fn applies(&self, skills: &[String], interests: &[String]) -> bool {
        match self {
            Applicability::Always => true,
            Applicability::AnySkill { skills: wanted } => has_any_skill(skills, wanted),
            Applicability::AnySkillOrInterest {
                skills: wanted,
                interest_terms,
            } => {
                has_any_skill(skills, wanted)
                    || interests.iter().any(|interest| {
                        let lower = interest.to_lowercase();
                        interest_terms
                            .iter()
                            .any(|term| lower.contains(&term.to_lowercase()))
                    })
            }
        }
    }
}

fn has_any_skill(skills: &[String], wanted: &[String]) -> bool {
    skills.iter().any(|skill| wanted.contains(skill))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTemplate {
    pub name: String,
    pub applicability: Applicability,
    pub projects: Vec<ProjectDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    templates: Vec<ProjectTemplate>,
}

impl Catalogue {
    /// Builds a catalogue, rejecting tables without an `Always` template or
    /// with templates that declare no projects.
    pub fn new(templates: Vec<ProjectTemplate>) -> Result<Self, CatalogueError> {
        if let Some(empty) = templates.iter().find(|t| t.projects.is_empty()) {
            return Err(CatalogueError::EmptyTemplate(empty.name.clone()));
        }
        if !templates
            .iter()
            .any(|t| t.applicability == Applicability::Always)
        {
            return Err(CatalogueError::NoFallback);
        }
        Ok(Self { templates })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let raw: Catalogue = serde_json::from_str(json)?;
        Self::new(raw.templates)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogueError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn templates(&self) -> &[ProjectTemplate] {
        &self.templates
    }

    pub fn builtin() -> Self {
        Self {
            templates: vec![
                ProjectTemplate {
                    name: "web-development".to_string(),
                    applicability: Applicability::AnySkill {
                        skills: strings(&["JavaScript", "React", "TypeScript", "Node.js"]),
                    },
                    projects: vec![
                        project(
                            "E-Learning Platform",
                            "Build a comprehensive online learning platform with course management, video streaming, and progress tracking.",
                            "Web Development",
                            Difficulty::Intermediate,
                            "8-12 weeks",
                            &["React", "Node.js", "JavaScript", "SQL"],
                            &["education", "full-stack", "responsive-design"],
                        ),
                        project(
                            "Real-time Collaboration Tool",
                            "Create a real-time collaborative workspace with document editing, chat, and video calls.",
                            "Web Development",
                            Difficulty::Advanced,
                            "12-16 weeks",
                            &["React", "Node.js", "WebSocket", "TypeScript"],
                            &["real-time", "collaboration", "websockets"],
                        ),
                    ],
                },
                ProjectTemplate {
                    name: "machine-learning".to_string(),
                    applicability: Applicability::AnySkillOrInterest {
                        skills: strings(&["Python", "Machine Learning", "AI", "Data Science"]),
                        interest_terms: strings(&["machine learning", "ai"]),
                    },
                    projects: vec![
                        project(
                            "Academic Paper Recommendation System",
                            "Develop an AI system that recommends relevant academic papers based on research interests and citation patterns.",
                            "Machine Learning",
                            Difficulty::Advanced,
                            "10-14 weeks",
                            &["Python", "Machine Learning", "NLP", "Data Science"],
                            &["recommendation-system", "nlp", "academic-research"],
                        ),
                        project(
                            "Research Trend Analysis Tool",
                            "Create a tool that analyzes trends in academic research using publication data and citation networks.",
                            "Data Science",
                            Difficulty::Intermediate,
                            "6-10 weeks",
                            &["Python", "Data Science", "Machine Learning"],
                            &["data-analysis", "visualization", "research-trends"],
                        ),
                    ],
                },
                ProjectTemplate {
                    name: "cloud-devops".to_string(),
                    applicability: Applicability::AnySkill {
                        skills: strings(&["AWS", "Docker", "Git"]),
                    },
                    projects: vec![project(
                        "Automated Research Environment",
                        "Build a cloud-based platform for researchers with automated environment setup and collaboration tools.",
                        "Cloud Computing",
                        Difficulty::Advanced,
                        "8-12 weeks",
                        &["AWS", "Docker", "Git", "CI/CD"],
                        &["cloud", "automation", "research-tools"],
                    )],
                },
                ProjectTemplate {
                    name: "database".to_string(),
                    applicability: Applicability::AnySkill {
                        skills: strings(&["SQL", "Database"]),
                    },
                    projects: vec![project(
                        "Academic Publication Database",
                        "Design and implement a comprehensive database system for managing academic publications and citations.",
                        "Database",
                        Difficulty::Intermediate,
                        "6-8 weeks",
                        &["SQL", "Database Design", "Data Modeling"],
                        &["database", "academic", "data-management"],
                    )],
                },
                ProjectTemplate {
                    name: "general".to_string(),
                    applicability: Applicability::Always,
                    projects: vec![
                        project(
                            "Personal Research Portfolio",
                            "Create a professional website showcasing your research work, publications, and academic achievements.",
                            "Web Development",
                            Difficulty::Beginner,
                            "3-5 weeks",
                            &["HTML", "CSS", "JavaScript"],
                            &["portfolio", "personal-branding", "responsive"],
                        ),
                        project(
                            "Citation Network Visualizer",
                            "Build an interactive tool to visualize citation networks and research collaboration patterns.",
                            "Data Visualization",
                            Difficulty::Intermediate,
                            "6-8 weeks",
                            &["JavaScript", "D3.js", "Data Visualization"],
                            &["visualization", "network-analysis", "citations"],
                        ),
                        project(
                            "Research Collaboration Platform",
                            "Develop a platform connecting researchers with similar interests for potential collaborations.",
                            "Web Development",
                            Difficulty::Advanced,
                            "10-12 weeks",
                            &["Full-stack Development", "Database", "API Development"],
                            &["collaboration", "networking", "research"],
                        ),
                    ],
                },
            ],
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn project(
    title: &str,
    description: &str,
    category: &str,
    difficulty: Difficulty,
    estimated_time: &str,
    required_skills: &[&str],
    tags: &[&str],
) -> ProjectDescriptor {
    ProjectDescriptor {
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        difficulty,
        estimated_time: estimated_time.to_string(),
        required_skills: strings(required_skills),
        tags: strings(tags),
    }
}

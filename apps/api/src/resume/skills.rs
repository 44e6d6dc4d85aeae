/// Skill keywords, in detection priority. Matching is case-insensitive substring
/// containment, so short entries like "AI" and "Java" also fire inside longer words.
pub const SKILL_KEYWORDS: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "React",
    "Node.js",
    "Machine Learning",
    "Data Science",
    "AI",
    "TypeScript",
    "SQL",
    "AWS",
    "Docker",
    "Git",
];

/// Collects keywords across `lines`, each keyword at most once, appended in
/// the order they are first seen (line by line, catalogue order within a line).
pub fn detect_skills(lines: &[String]) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for line in lines {
        let lower = line.to_lowercase();
        for &keyword in SKILL_KEYWORDS {
            if skills.iter().any(|s| s == keyword) {
                continue;
            }
            if lower.contains(&keyword.to_lowercase()) {
                skills.push(keyword.to_string());
            }
        }
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keyword_table_has_no_duplicates() {
        for (i, a) in SKILL_KEYWORDS.iter().enumerate() {
            for b in &SKILL_KEYWORDS[i + 1..] {
                assert!(!a.eq_ignore_ascii_case(b), "duplicate keyword {a}");
            }
        }
    }

    #[test]
    fn test_case_insensitive_and_deduplicated() {
        let found = detect_skills(&lines(&["I write javascript", "JavaScript daily"]));
        assert_eq!(found.iter().filter(|s| *s == "JavaScript").count(), 1);
    }

    #[test]
    fn test_catalogue_order_within_line() {
        let found = detect_skills(&lines(&["SQL, Docker and Python"]));
        assert_eq!(found, vec!["Python", "SQL", "Docker"]);
    }

    #[test]
    fn test_first_detection_order_across_lines() {
        let found = detect_skills(&lines(&["Docker", "Python"]));
        assert_eq!(found, vec!["Docker", "Python"]);
    }

    #[test]
    fn test_substring_containment() {
        // "JavaScript" contains "Java"; "TypeScript" does not contain "JavaScript".
        let found = detect_skills(&lines(&["JavaScript"]));
        assert_eq!(found, vec!["JavaScript", "Java"]);
    }

    #[test]
    fn test_no_keywords() {
        assert!(detect_skills(&lines(&["Fluent in Latin"])).is_empty());
    }
}

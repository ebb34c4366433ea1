//! Relevance scoring: deterministic job/skill compatibility in 45–100.
//!
//! Algorithm:
//! 1. Lowercase the description and split it on non-word characters.
//! 2. A skill matches when some token contains it, or it contains some token.
//! 3. base = round(matches / max(skills, 1) × 100), capped at 100
//! 4. score = max(base, 45)

/// No listing is ever reported below this.
pub const RELEVANCE_FLOOR: u8 = 45;

pub fn score_relevance(description: &str, skills: &[String]) -> u8 {
    let description = description.to_lowercase();
    let tokens: Vec<&str> = description
        .split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .collect();

    let matches = skills
        .iter()
        .filter(|skill| skill_matches(&skill.to_lowercase(), &tokens))
        .count();

    let base = (matches as f64 / skills.len().max(1) as f64 * 100.0)
        .round()
        .min(100.0) as u8;
    base.max(RELEVANCE_FLOOR)
}

fn skill_matches(skill: &str, tokens: &[&str]) -> bool {
    tokens
        .iter()
        .any(|token| token.contains(skill) || skill.contains(token))
}

/// ASCII word characters: letters, digits and underscore.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_skills_matched_scores_100() {
        let score = score_relevance(
            "Backend engineer writing Go services backed by SQL databases.",
            &skills(&["Go", "SQL"]),
        );
        assert_eq!(score, 100);
    }

    #[test]
    fn test_no_matches_hits_floor() {
        let score = score_relevance("Pastry chef wanted", &skills(&["Kubernetes", "Terraform"]));
        assert_eq!(score, RELEVANCE_FLOOR);
    }

    #[test]
    fn test_empty_skills_hits_floor() {
        assert_eq!(score_relevance("Anything at all", &[]), RELEVANCE_FLOOR);
    }

    #[test]
    fn test_empty_description_hits_floor() {
        assert_eq!(score_relevance("", &skills(&["Rust"])), RELEVANCE_FLOOR);
    }

    #[test]
    fn test_token_contains_skill() {
        // "postgresql" contains "sql"
        let score = score_relevance("We run PostgreSQL", &skills(&["sql"]));
        assert_eq!(score, 100);
    }

    #[test]
    fn test_skill_contains_token() {
        // skill "react native" contains the token "react"
        let score = score_relevance("React developer", &skills(&["React Native"]));
        assert_eq!(score, 100);
    }

    #[test]
    fn test_partial_match_rounds() {
        // 2 of 3 → 66.67 → 67
        let score = score_relevance(
            "Python and Docker shop",
            &skills(&["Python", "Docker", "Haskell"]),
        );
        assert_eq!(score, 67);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(score_relevance("RUST", &skills(&["rust"])), 100);
    }

    #[test]
    fn test_always_within_bounds() {
        let descriptions = [
            String::new(),
            "a b c".to_string(),
            "Rust, Go; SQL!".to_string(),
            "x".repeat(300),
        ];
        let skill_sets = [skills(&[]), skills(&["a"]), skills(&["Rust", "Go", "Zig", "Elm"])];
        for d in &descriptions {
            for s in &skill_sets {
                let score = score_relevance(d, s);
                assert!((RELEVANCE_FLOOR..=100).contains(&score));
            }
        }
    }

    #[test]
    fn test_more_matches_never_lower_score() {
        let skill_set = skills(&["Rust", "Go", "SQL", "Kafka"]);
        let one = score_relevance("Rust", &skill_set);
        let two = score_relevance("Rust Go", &skill_set);
        let four = score_relevance("Rust Go SQL Kafka", &skill_set);
        assert!(one <= two && two <= four);
        assert_eq!(four, 100);
    }
}

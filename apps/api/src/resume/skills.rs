/// Vocabulary scanned when the completion endpoint's resume output is unusable.
const KNOWN_SKILLS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "React",
    "Node.js",
    "Python",
    "Java",
    "C++",
    "HTML",
    "CSS",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "AWS",
    "Docker",
    "Kubernetes",
    "Git",
    "Agile",
    "Scrum",
    "Machine Learning",
    "Data Analysis",
    "Project Management",
    "Leadership",
    "Communication",
];

const MAX_EXTRACTED_SKILLS: usize = 10;

/// Case-insensitive substring scan of `text` against the known vocabulary.
/// Returns matches in vocabulary order, at most ten.
pub fn extract_known_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    KNOWN_SKILLS
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .take(MAX_EXTRACTED_SKILLS)
        .map(|skill| skill.to_string())
        .collect()
}

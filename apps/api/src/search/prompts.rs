// Job search agent prompts.

pub const JOB_SEARCH_SYSTEM: &str = "You are a job search agent. \
    Generate realistic job listings based on the provided skills, query, and location.";

/// Replace: {skills}, {query}, {location}, {json_only}
pub const JOB_SEARCH_PROMPT_TEMPLATE: &str = r#"Find relevant jobs for a candidate with these skills: {skills}.

Search query: "{query}"
Location: "{location}"

Generate 8-12 realistic job listings in JSON format:
[
  {
    "id": "unique_id",
    "title": "Job Title",
    "company": "Company Name",
    "location": "City, State/Country",
    "description": "Detailed job description (200+ words)",
    "salary": "$XX,XXX - $XX,XXX",
    "url": "https://example.com/job/123",
    "relevanceScore": 85,
    "postedDate": "2024-01-15",
    "requirements": ["requirement1", "requirement2"],
    "benefits": ["benefit1", "benefit2"]
  }
]

Make jobs realistic and relevant to the skills provided. Include a mix of experience levels.
{json_only}"#;

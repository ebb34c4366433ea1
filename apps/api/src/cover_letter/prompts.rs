// Cover letter prompts.

pub const COVER_LETTER_SYSTEM: &str = "You are a cover letter generation assistant. \
    Create a personalized cover letter based on the job description and candidate information.";

/// Replace: {job_description}, {skills}, {experience}, {education}, {summary},
/// {tone_instruction}, {language_instruction}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Generate a personalized cover letter based on the following information:

Job Description:
{job_description}

Candidate Information:
- Skills: {skills}
- Work Experience: {experience}
- Education: {education}
- Professional Summary: {summary}

Instructions:
- {tone_instruction}
- {language_instruction}
- Highlight relevant skills and experience
- Show enthusiasm for the role
- Keep it concise (3-4 paragraphs)
- Include a strong opening and closing
- Make it specific to this job and company

Generate only the cover letter content, no additional text or formatting."#;

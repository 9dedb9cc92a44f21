/// Characters of resume text sent to the LLM.
pub const MAX_RESUME_CHARS: usize = 4000;

pub fn ats_analysis_prompt(job_title: &str, resume_text: &str) -> String {
    let excerpt: String = resume_text.chars().take(MAX_RESUME_CHARS).collect();

    format!(
        r#"You are an expert ATS (Applicant Tracking System) resume analyzer. Analyze the following resume for the job title "{job_title}".

Provide a comprehensive analysis and return ONLY valid JSON in this exact format:
{{
  "atsScore": number (0-100),
  "missingSkills": ["skill1", "skill2", "skill3"],
  "suggestions": ["specific improvement suggestion1", "specific improvement suggestion2", "specific improvement suggestion3"]
}}

Analysis Guidelines:
- ATS score should reflect how well the resume matches the "{job_title}" position requirements
- Missing skills should be relevant technical and soft skills for "{job_title}"
- Suggestions should be specific, actionable improvements
- Consider industry standards and common requirements for "{job_title}"
- Focus on keywords, skills, experience relevance, and resume structure

Resume Content:
{excerpt}

Return only the JSON object, no other text."#
    )
}

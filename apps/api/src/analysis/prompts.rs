// Prompt builders for the analysis endpoints.
// Profile content is interpolated verbatim; nothing is escaped.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::providers::github::GithubAggregate;
use crate::providers::leetcode::LeetcodeStats;

/// Validated input for LinkedIn generation.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedinPromptInput<'a> {
    pub name: &'a str,
    pub skills: &'a str,
    pub degree: Option<&'a str>,
    pub experience: Option<&'a str>,
    pub linkedin_url: Option<&'a str>,
}

pub fn leetcode_analysis_prompt(stats: &LeetcodeStats) -> String {
    let acceptance = stats
        .acceptance_rate
        .filter(|r| *r != 0.0)
        .map(|r| r.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let ranking = stats
        .ranking
        .filter(|r| *r > 0)
        .map(|r| r.to_string())
        .unwrap_or_else(|| "Unranked".to_string());

    format!(
        "You are an expert in competitive programming. Analyze this LeetCode profile and return \
ONLY a VALID JSON object with EXACTLY these 3 fields:
- strengths: array of strings
- weaknesses: array of strings
- nextRecommendedQuestions: array of strings

{JSON_ONLY_INSTRUCTION}

LeetCode Profile Data:
Total Solved: {total}
Easy Solved: {easy}/{total_easy}
Medium Solved: {medium}/{total_medium}
Hard Solved: {hard}/{total_hard}
Acceptance Rate: {acceptance}%
Ranking: {ranking}
Contribution Points: {points}

Based on this data, provide insights about strengths, areas to improve, and specific problem \
recommendations.",
        total = stats.total_solved,
        easy = stats.easy_solved,
        total_easy = stats.total_easy,
        medium = stats.medium_solved,
        total_medium = stats.total_medium,
        hard = stats.hard_solved,
        total_hard = stats.total_hard,
        points = stats.contribution_points.unwrap_or(0),
    )
}

pub fn github_analysis_prompt(aggregate: &GithubAggregate) -> String {
    let user = &aggregate.user;
    let profile = &aggregate.profile;
    let text = |field: &Option<String>| -> String {
        field
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("N/A")
            .to_string()
    };
    let languages = if profile.languages_used.is_empty() {
        "N/A".to_string()
    } else {
        profile.languages_used.join(", ")
    };

    format!(
        r#"You are an expert in evaluating GitHub profiles. Analyze the following GitHub profile and return ONLY a valid JSON object in this exact structure:

{{
  "strengths": ["..."],
  "weaknesses": ["..."],
  "recommendations": ["..."]
}}

{JSON_ONLY_INSTRUCTION}

GitHub Profile Data:
Username: {login}
Name: {name}
Bio: {bio}
Company: {company}
Location: {location}
Blog: {blog}
Twitter: {twitter}
Public Repositories: {repos}
Followers: {followers}
Following: {following}
Total Stars: {stars}
Top Languages: {languages}
Profile Score: {score}/100"#,
        login = profile.username,
        name = text(&user.name),
        bio = text(&user.bio),
        company = text(&user.company),
        location = text(&user.location),
        blog = text(&user.blog),
        twitter = text(&user.twitter_username),
        repos = profile.public_repos,
        followers = profile.followers,
        following = profile.following,
        stars = profile.stars,
        score = profile.score,
    )
}

pub fn linkedin_generation_prompt(input: &LinkedinPromptInput<'_>) -> String {
    let LinkedinPromptInput {
        name,
        skills,
        degree,
        experience,
        linkedin_url,
    } = *input;

    let education = degree
        .map(|d| format!("Education ({d})"))
        .unwrap_or_else(|| "Relevant education".to_string());
    let notable = experience
        .map(|e| format!("Notable experience ({e})"))
        .unwrap_or_else(|| "Professional experience".to_string());

    let mut details = vec![format!("Name: {name}")];
    if let Some(degree) = degree {
        details.push(format!("Degree: {degree}"));
    }
    details.push(format!("Skills: {skills}"));
    if let Some(experience) = experience {
        details.push(format!("Experience: {experience}"));
    }
    if let Some(url) = linkedin_url {
        details.push(format!("LinkedIn URL: {url}"));
    }

    format!(
        "Generate a professional LinkedIn profile optimization with the following structure:

**Headline**: [Create a compelling 120-character headline for {name} that incorporates their key skills: {skills}]

**About Section**: [Write a detailed 3-5 paragraph summary in first person that highlights:
- Professional background
- Key skills ({skills})
- {education}
- {notable}
- Career objectives
- Personal brand/value proposition
]

**Skills**: [List the top 10 most relevant skills from: {skills}]

{details}

Return the response in this exact format:
HEADLINE: [generated headline]
ABOUT: [generated about section]
SKILLS: [comma-separated list of top skills]",
        details = details.join("\n"),
    )
}

//! LinkedIn headline / about / skills generation.
//!
//! The completion is asked for a `HEADLINE:` / `ABOUT:` / `SKILLS:` block.
//! Each section is parsed independently; any section that is missing or
//! empty is replaced by a default synthesized from the request, and the
//! draft is flagged as a fallback.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::prompts::LinkedinPromptInput;
use crate::errors::AppError;

const MAX_SKILLS: usize = 10;
const HEADLINE_SKILLS: usize = 3;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedinGenerateRequest {
    pub name: Option<String>,
    pub degree: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub linkedin_url: Option<String>,
}

impl LinkedinGenerateRequest {
    /// Requires non-blank `name` and `skills`; blank optionals are treated as absent.
    pub fn validate(&self) -> Result<LinkedinPromptInput<'_>, AppError> {
        let (Some(name), Some(skills)) = (non_blank(&self.name), non_blank(&self.skills)) else {
            return Err(AppError::Validation(
                "Name and skills are required fields".to_string(),
            ));
        };
        Ok(LinkedinPromptInput {
            name,
            skills,
            degree: non_blank(&self.degree),
            experience: non_blank(&self.experience),
            linkedin_url: non_blank(&self.linkedin_url),
        })
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedinDraft {
    pub headline: String,
    pub about: String,
    pub skills_array: Vec<String>,
    pub featured_link: Option<String>,
    /// True when at least one section came from the defaults.
    pub fallback: bool,
}

fn headline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)HEADLINE:\s*(.+)").expect("valid regex"))
}

fn about_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)ABOUT:\s*(.+?)SKILLS:").expect("valid regex"))
}

fn skills_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)SKILLS:\s*(.+)").expect("valid regex"))
}

fn newlines_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n+").expect("valid regex"))
}

fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

fn split_skills(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_SKILLS)
        .map(String::from)
        .collect()
}

pub fn default_headline(input: &LinkedinPromptInput<'_>) -> String {
    let top: Vec<&str> = input
        .skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(HEADLINE_SKILLS)
        .collect();
    format!("{} | {}", input.name, top.join(", "))
}

pub fn default_about(input: &LinkedinPromptInput<'_>) -> String {
    let mut about = format!(
        "I'm {}, a professional with expertise in {}.",
        input.name, input.skills
    );
    if let Some(experience) = input.experience {
        about.push_str(&format!(" My experience includes {experience}."));
    }
    if let Some(degree) = input.degree {
        about.push_str(&format!(" I hold a degree in {degree}."));
    }
    about
}

/// Parses the completion text into a draft, filling gaps with defaults.
pub fn parse_linkedin_output(output: &str, input: &LinkedinPromptInput<'_>) -> LinkedinDraft {
    let output = output.trim();
    let mut fallback = false;

    let headline = match capture(headline_re(), output) {
        Some(h) => h.to_string(),
        None => {
            fallback = true;
            default_headline(input)
        }
    };

    let about = match capture(about_re(), output) {
        Some(a) => newlines_re().replace_all(a, "\n").trim().to_string(),
        None => {
            fallback = true;
            default_about(input)
        }
    };

    let parsed_skills = capture(skills_re(), output)
        .map(split_skills)
        .filter(|s| !s.is_empty());
    let skills_array = match parsed_skills {
        Some(skills) => skills,
        None => {
            fallback = true;
            split_skills(input.skills)
        }
    };

    LinkedinDraft {
        headline,
        about,
        skills_array,
        featured_link: input.linkedin_url.map(String::from),
        fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> LinkedinPromptInput<'static> {
        LinkedinPromptInput {
            name: "Ada",
            skills: "Rust, Go , SQL, Kubernetes",
            degree: Some("Computer Science"),
            experience: None,
            linkedin_url: Some("https://linkedin.com/in/ada"),
        }
    }

    #[test]
    fn test_validate_requires_name_and_skills() {
        let req = LinkedinGenerateRequest {
            name: Some("Ada".into()),
            skills: Some("   ".into()),
            ..LinkedinGenerateRequest::default()
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));

        let req = LinkedinGenerateRequest {
            name: Some("Ada".into()),
            skills: Some("Rust".into()),
            degree: Some(String::new()),
            ..LinkedinGenerateRequest::default()
        };
        let input = req.validate().unwrap();
        assert_eq!(input.degree, None);
    }

    #[test]
    fn test_parses_all_sections() {
        let output = "HEADLINE: Systems engineer | Rust\nABOUT: I build things.\n\n\nI like Rust.\nSKILLS: Rust, Tokio, , Axum";
        let draft = parse_linkedin_output(output, &input());
        assert_eq!(draft.headline, "Systems engineer | Rust");
        assert_eq!(draft.about, "I build things.\nI like Rust.");
        assert_eq!(draft.skills_array, vec!["Rust", "Tokio", "Axum"]);
        assert_eq!(draft.featured_link.as_deref(), Some("https://linkedin.com/in/ada"));
        assert!(!draft.fallback);
    }

    #[test]
    fn test_unstructured_output_uses_defaults() {
        let draft = parse_linkedin_output("Here is a great profile for you!", &input());
        assert_eq!(draft.headline, "Ada | Rust, Go, SQL");
        assert_eq!(
            draft.about,
            "I'm Ada, a professional with expertise in Rust, Go , SQL, Kubernetes. I hold a degree in Computer Science."
        );
        assert_eq!(draft.skills_array, vec!["Rust", "Go", "SQL", "Kubernetes"]);
        assert!(draft.fallback);
    }

    #[test]
    fn test_skills_capped_at_ten() {
        let skills = (1..=14).map(|i| format!("s{i}")).collect::<Vec<_>>().join(",");
        let output = format!("HEADLINE: h\nABOUT: a\nSKILLS: {skills}");
        let draft = parse_linkedin_output(&output, &input());
        assert_eq!(draft.skills_array.len(), 10);
        assert_eq!(draft.skills_array[9], "s10");
    }
}

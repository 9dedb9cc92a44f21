use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::analysis::normalizer::{extract_json_object, strip_code_fence, AnalysisOutcome};

const DEFAULT_ATS_SCORE: u32 = 65;
const MAX_LIST_ITEMS: usize = 8;

/// ATS fit analysis of one resume against one job title.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsAnalysis {
    /// 0 – 100
    pub ats_score: u32,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
}

impl AtsAnalysis {
    /// Returned whole when the reply contains no JSON object.
    pub fn fallback() -> Self {
        Self {
            ats_score: DEFAULT_ATS_SCORE,
            missing_skills: strings(&[
                "Industry-specific technical skills",
                "Relevant certifications",
                "Keywords matching job description",
            ]),
            suggestions: strings(&[
                "Include more relevant keywords for the position",
                "Add quantifiable achievements and results",
                "Ensure resume format is ATS-friendly",
                "Include relevant certifications and skills section",
            ]),
        }
    }

    /// Field-level repair of a parsed reply: each malformed field gets its own default.
    fn from_object(object: &Map<String, Value>) -> Self {
        let ats_score = object
            .get("atsScore")
            .and_then(Value::as_f64)
            .filter(|s| s.is_finite())
            .map(|s| s.round().clamp(0.0, 100.0) as u32)
            .unwrap_or(DEFAULT_ATS_SCORE);

        let missing_skills = string_list(object.get("missingSkills")).unwrap_or_else(|| {
            strings(&["Industry-specific skills", "Technical certifications"])
        });
        let suggestions = string_list(object.get("suggestions")).unwrap_or_else(|| {
            strings(&[
                "Add more relevant keywords for the position",
                "Include quantifiable achievements",
                "Improve resume formatting for ATS compatibility",
            ])
        });

        Self {
            ats_score,
            missing_skills,
            suggestions,
        }
    }
}

/// Normalizes a raw ATS reply. Only a reply with no parseable JSON object
/// is reported as a fallback; individual bad fields are repaired in place.
pub fn normalize_ats(raw: &str) -> AnalysisOutcome<AtsAnalysis> {
    match extract_json_object(strip_code_fence(raw)) {
        Some(object) => AnalysisOutcome::AiDerived(AtsAnalysis::from_object(&object)),
        None => {
            warn!("ATS response contained no JSON object; using fallback analysis");
            AnalysisOutcome::HeuristicFallback(AtsAnalysis::fallback())
        }
    }
}

/// First eight string elements of an array; `None` if `value` is not an array.
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .take(MAX_LIST_ITEMS)
            .map(String::from)
            .collect(),
    )
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

//! Axum route handler for the match API.

use axum::Json;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::matching::calculator::{
    calculate_skill_match, calculate_weighted_match, MatchOutcome, WeightedSkill,
};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// One entry of `requiredSkills`: either a bare name or `{skill, weight?}`.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillEntry {
    Name(String),
    Weighted { skill: String, weight: Option<f64> },
}

impl SkillEntry {
    pub fn name(&self) -> &str {
        match self {
            SkillEntry::Name(name) => name,
            SkillEntry::Weighted { skill, .. } => skill,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(SkillEntry::Name(name.clone())),
            Value::Object(map) => {
                let skill = map.get("skill")?.as_str()?.to_string();
                let weight = map.get("weight").and_then(Value::as_f64);
                Some(SkillEntry::Weighted { skill, weight })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSkillsRequest {
    #[serde(default, alias = "jdSkills", deserialize_with = "lenient_entries")]
    pub required_skills: Vec<SkillEntry>,
    #[serde(default, alias = "resumeSkills", deserialize_with = "lenient_names")]
    pub candidate_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub weighted: bool,
}

/// Only a JSON `true` turns the flag on; null, strings and numbers read as false.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// Anything that is not an array becomes an empty list; entries of an unknown shape are skipped.
fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<SkillEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(SkillEntry::from_value).collect(),
        _ => Vec::new(),
    })
}

pub(crate) fn lenient_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_entries(deserializer)?
        .into_iter()
        .map(|entry| entry.name().to_string())
        .collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Operation selection
// ────────────────────────────────────────────────────────────────────────────

/// Runs the weighted match when requested and every entry carries the
/// `{skill, weight?}` shape; otherwise matches the plain names.
pub fn run_match(request: &MatchSkillsRequest) -> MatchOutcome {
    let all_weighted = !request.required_skills.is_empty()
        && request
            .required_skills
            .iter()
            .all(|entry| matches!(entry, SkillEntry::Weighted { .. }));

    if request.weighted && all_weighted {
        let required: Vec<WeightedSkill> = request
            .required_skills
            .iter()
            .map(|entry| match entry {
                SkillEntry::Weighted { skill, weight } => WeightedSkill::new(skill.clone(), *weight),
                SkillEntry::Name(name) => WeightedSkill::new(name.clone(), None),
            })
            .collect();
        return MatchOutcome::Weighted(calculate_weighted_match(
            &required,
            &request.candidate_skills,
        ));
    }

    let required: Vec<String> = request
        .required_skills
        .iter()
        .map(|entry| entry.name().to_string())
        .collect();
    MatchOutcome::Standard(calculate_skill_match(&required, &request.candidate_skills))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match-skills
///
/// Never rejects malformed lists: they are treated as empty and scored 0.
pub async fn handle_match_skills(Json(request): Json<MatchSkillsRequest>) -> Json<MatchOutcome> {
    let outcome = run_match(&request);
    debug!(
        required = request.required_skills.len(),
        candidate = request.candidate_skills.len(),
        score = outcome.match_score(),
        "Skill match computed"
    );
    Json(outcome)
}

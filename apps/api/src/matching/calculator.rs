//! Match calculator: skill-overlap scoring between a required list (from a job
//! description) and a candidate list (from a resume).
//!
//! Pure and deterministic: no I/O, no shared state. Safe to call from any number
//! of concurrent requests.

use serde::{Deserialize, Serialize};

use crate::matching::predicate::is_skill_match;

// ────────────────────────────────────────────────────────────────────────────
// Reports
// ────────────────────────────────────────────────────────────────────────────

/// Result of an unweighted match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub match_score: u32, // 0 – 100
    /// Required-side names found in the candidate list, first occurrence order, no duplicates.
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// Candidate skills that match no required skill.
    pub extra_skills: Vec<String>,
    pub total_required: usize,
    pub total_matched: usize,
}

/// A required skill with its relative importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedSkill {
    pub skill: String,
    pub weight: f64,
}

impl WeightedSkill {
    /// Builds a weighted requirement. Missing, zero, negative or non-finite weights become 1.
    pub fn new(skill: impl Into<String>, weight: Option<f64>) -> Self {
        let weight = match weight {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => 1.0,
        };
        Self {
            skill: skill.into(),
            weight,
        }
    }
}

/// Result of a weighted match. `match_score` mirrors `weighted_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedMatchReport {
    pub match_score: u32,
    pub weighted_score: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<WeightedSkill>,
    pub total_weight: f64,
    pub matched_weight: f64,
}

/// Either kind of report, tagged with `mode` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MatchOutcome {
    Standard(MatchReport),
    Weighted(WeightedMatchReport),
}

impl MatchOutcome {
    pub fn match_score(&self) -> u32 {
        match self {
            MatchOutcome::Standard(report) => report.match_score,
            MatchOutcome::Weighted(report) => report.match_score,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// Computes the unweighted skill match.
///
/// Degenerate inputs are scored 0 rather than rejected:
/// - empty `required` → everything in `candidate` is extra,
/// - empty `candidate` → everything in `required` is missing.
pub fn calculate_skill_match(required: &[String], candidate: &[String]) -> MatchReport {
    if required.is_empty() {
        return MatchReport {
            match_score: 0,
            matched_skills: vec![],
            missing_skills: vec![],
            extra_skills: candidate.to_vec(),
            total_required: 0,
            total_matched: 0,
        };
    }

    if candidate.is_empty() {
        return MatchReport {
            match_score: 0,
            matched_skills: vec![],
            missing_skills: required.to_vec(),
            extra_skills: vec![],
            total_required: required.len(),
            total_matched: 0,
        };
    }

    let mut matched_entries = 0_usize;
    let mut matched_skills: Vec<String> = Vec::new();
    let mut missing_skills = Vec::new();

    for required_skill in required {
        if candidate.iter().any(|c| is_skill_match(required_skill, c)) {
            matched_entries += 1;
            if !matched_skills.contains(required_skill) {
                matched_skills.push(required_skill.clone());
            }
        } else {
            missing_skills.push(required_skill.clone());
        }
    }

    let extra_skills = candidate
        .iter()
        .filter(|c| !required.iter().any(|r| is_skill_match(r, c)))
        .cloned()
        .collect();

    MatchReport {
        match_score: percentage(matched_entries as f64, required.len() as f64),
        total_matched: matched_skills.len(),
        matched_skills,
        missing_skills,
        extra_skills,
        total_required: required.len(),
    }
}

/// Computes the weighted skill match. Each requirement is evaluated on its own,
/// so a name listed twice counts twice.
pub fn calculate_weighted_match(
    required: &[WeightedSkill],
    candidate: &[String],
) -> WeightedMatchReport {
    let mut total_weight = 0.0_f64;
    let mut matched_weight = 0.0_f64;
    let mut matched_skills = Vec::new();
    let mut missing_skills = Vec::new();

    for requirement in required {
        total_weight += requirement.weight;

        if candidate.iter().any(|c| is_skill_match(&requirement.skill, c)) {
            matched_weight += requirement.weight;
            matched_skills.push(requirement.skill.clone());
        } else {
            missing_skills.push(requirement.clone());
        }
    }

    let weighted_score = percentage(matched_weight, total_weight);

    WeightedMatchReport {
        match_score: weighted_score,
        weighted_score,
        matched_skills,
        missing_skills,
        total_weight,
        matched_weight,
    }
}

/// `round(part / whole × 100)` clamped to 0–100; 0 when `whole` is not positive.
fn percentage(part: f64, whole: f64) -> u32 {
    if whole <= 0.0 {
        return 0;
    }
    ((part / whole) * 100.0).round().clamp(0.0, 100.0) as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

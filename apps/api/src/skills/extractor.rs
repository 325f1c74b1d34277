//! Pluggable skill extraction: text in, skill names out.
//!
//! Default with an API key: `LlmSkillExtractor` (Claude, keyword fallback on any failure).
//! Without one: `KeywordSkillExtractor` (pure-Rust vocabulary scan, deterministic).
//!
//! `AppState` holds an `Arc<dyn SkillExtractor>`, chosen at startup from config.
//! Neither implementation ever returns an error to the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::matching::calculator::calculate_skill_match;
use crate::skills::prompts::{SKILL_EXTRACT_PROMPT_TEMPLATE, SKILL_GAP_PROMPT_TEMPLATE};
use crate::skills::vocabulary::keyword_scan;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Which backend produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Llm,
    Fallback,
}

/// Narrative comparison of a required skill list against a candidate's.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysis {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub gap_analysis: String,
    pub source: AnalysisSource,
}

/// Shape the LLM is asked to return for a gap analysis.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmGapAnalysis {
    #[serde(default)]
    matched_skills: Vec<String>,
    #[serde(default)]
    missing_skills: Vec<String>,
    #[serde(default)]
    gap_analysis: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap extraction backends without touching handlers.
#[async_trait]
pub trait SkillExtractor: Send + Sync {
    /// Returns the skills found in `text`. Possibly empty, never an error.
    async fn extract_skills(&self, text: &str) -> Vec<String>;

    async fn analyze_skill_gap(&self, required: &[String], candidate: &[String]) -> GapAnalysis;

    /// Short label for logs and responses: "llm" | "keyword".
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordSkillExtractor
// ────────────────────────────────────────────────────────────────────────────

/// Vocabulary scan plus match-engine gap analysis. No network, no state.
pub struct KeywordSkillExtractor;

#[async_trait]
impl SkillExtractor for KeywordSkillExtractor {
    async fn extract_skills(&self, text: &str) -> Vec<String> {
        keyword_scan(text)
    }

    async fn analyze_skill_gap(&self, required: &[String], candidate: &[String]) -> GapAnalysis {
        fallback_gap_analysis(required, candidate)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmSkillExtractor
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmSkillExtractor {
    llm: LlmClient,
}

impl LlmSkillExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SkillExtractor for LlmSkillExtractor {
    async fn extract_skills(&self, text: &str) -> Vec<String> {
        let prompt = SKILL_EXTRACT_PROMPT_TEMPLATE.replace("{text}", text);

        match self.llm.call_json::<Vec<String>>(&prompt, JSON_ONLY_SYSTEM).await {
            Ok(skills) => {
                let skills = clean_skill_list(skills);
                debug!(count = skills.len(), "LLM skill extraction succeeded");
                skills
            }
            Err(e) => {
                warn!("LLM skill extraction failed, using keyword scan: {e}");
                keyword_scan(text)
            }
        }
    }

    async fn analyze_skill_gap(&self, required: &[String], candidate: &[String]) -> GapAnalysis {
        let prompt = SKILL_GAP_PROMPT_TEMPLATE
            .replace("{required}", &required.join(", "))
            .replace("{candidate}", &candidate.join(", "));

        match self.llm.call_json::<LlmGapAnalysis>(&prompt, JSON_ONLY_SYSTEM).await {
            Ok(analysis) => GapAnalysis {
                matched_skills: clean_skill_list(analysis.matched_skills),
                missing_skills: clean_skill_list(analysis.missing_skills),
                gap_analysis: analysis.gap_analysis,
                source: AnalysisSource::Llm,
            },
            Err(e) => {
                warn!("LLM gap analysis failed, using match engine: {e}");
                fallback_gap_analysis(required, candidate)
            }
        }
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Trims names and drops blanks from model output.
fn clean_skill_list(skills: Vec<String>) -> Vec<String> {
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Gap analysis computed by the match engine with a templated summary.
fn fallback_gap_analysis(required: &[String], candidate: &[String]) -> GapAnalysis {
    let report = calculate_skill_match(required, candidate);
    let gap_analysis = build_gap_summary(
        report.match_score,
        report.total_matched,
        report.total_required,
        &report.missing_skills,
    );

    GapAnalysis {
        matched_skills: report.matched_skills,
        missing_skills: report.missing_skills,
        gap_analysis,
        source: AnalysisSource::Fallback,
    }
}

fn build_gap_summary(score: u32, matched: usize, total: usize, missing: &[String]) -> String {
    if total == 0 {
        return "No required skills given, nothing to compare.".to_string();
    }
    if missing.is_empty() {
        return format!("All {total} required skills are covered ({score}%).");
    }

    let top_missing: Vec<&str> = missing.iter().take(5).map(String::as_str).collect();
    format!(
        "{matched} of {total} required skills covered ({score}%). Missing: {}.",
        top_missing.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::test_support::{spawn_stub, text_response};
    use axum::http::StatusCode;
    use serde_json::json;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    async fn llm_extractor(status: StatusCode, body: serde_json::Value) -> LlmSkillExtractor {
        let endpoint = spawn_stub(status, body).await;
        let llm = LlmClient::new("test-key".to_string())
            .unwrap()
            .with_endpoint(endpoint)
            .with_max_attempts(1);
        LlmSkillExtractor::new(llm)
    }

    #[tokio::test]
    async fn test_keyword_extractor_scans_vocabulary() {
        let found = KeywordSkillExtractor
            .extract_skills("Kubernetes and Redis in production")
            .await;
        assert_eq!(found, skills(&["Kubernetes", "Redis"]));
        assert_eq!(KeywordSkillExtractor.backend(), "keyword");
    }

    #[tokio::test]
    async fn test_llm_extractor_uses_model_output() {
        let extractor = llm_extractor(
            StatusCode::OK,
            text_response(r#"["Rust", "  Tokio ", "", "gRPC"]"#),
        )
        .await;
        let found = extractor.extract_skills("irrelevant").await;
        assert_eq!(found, skills(&["Rust", "Tokio", "gRPC"]));
    }

    #[tokio::test]
    async fn test_llm_extractor_falls_back_on_api_error() {
        let extractor = llm_extractor(
            StatusCode::BAD_REQUEST,
            json!({"error": {"message": "bad request"}}),
        )
        .await;
        let found = extractor.extract_skills("Docker and Terraform").await;
        assert_eq!(found, skills(&["Docker", "Terraform"]));
    }

    #[tokio::test]
    async fn test_llm_extractor_falls_back_on_unparsable_output() {
        let extractor = llm_extractor(StatusCode::OK, text_response("Sure! Here are the skills: Go")).await;
        let found = extractor.extract_skills("Python and Flask").await;
        assert_eq!(found, skills(&["Python", "Flask"]));
    }

    #[tokio::test]
    async fn test_llm_gap_analysis() {
        let extractor = llm_extractor(
            StatusCode::OK,
            text_response(
                r#"{"matchedSkills": ["Rust"], "missingSkills": ["Kafka"], "gapAnalysis": "Needs streaming."}"#,
            ),
        )
        .await;
        let analysis = extractor
            .analyze_skill_gap(&skills(&["Rust", "Kafka"]), &skills(&["Rust"]))
            .await;
        assert_eq!(analysis.source, AnalysisSource::Llm);
        assert_eq!(analysis.missing_skills, skills(&["Kafka"]));
        assert_eq!(analysis.gap_analysis, "Needs streaming.");
    }

    #[tokio::test]
    async fn test_gap_analysis_falls_back_to_match_engine() {
        let extractor = llm_extractor(StatusCode::OK, text_response("not json")).await;
        let analysis = extractor
            .analyze_skill_gap(&skills(&["JavaScript", "Kafka"]), &skills(&["js"]))
            .await;
        assert_eq!(analysis.source, AnalysisSource::Fallback);
        assert_eq!(analysis.matched_skills, skills(&["JavaScript"]));
        assert_eq!(analysis.missing_skills, skills(&["Kafka"]));
        assert!(analysis.gap_analysis.contains("1 of 2"));
        assert!(analysis.gap_analysis.contains("Kafka"));
    }

    #[test]
    fn test_gap_summary_variants() {
        assert!(build_gap_summary(0, 0, 0, &[]).contains("No required skills"));
        assert!(build_gap_summary(100, 3, 3, &[]).contains("All 3"));
        let summary = build_gap_summary(50, 1, 2, &skills(&["Go"]));
        assert!(summary.contains("50%"));
        assert!(summary.contains("Go"));
    }
}

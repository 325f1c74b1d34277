//! Screening pipeline: one job description against many resumes.
//!
//! Skills are extracted for the JD and every resume, each resume is scored with
//! the match calculator, and (optionally) the ranking service is asked for text
//! similarity. The two scores are reported side by side, never blended.
//! A ranking outage degrades the report instead of failing it.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::matching::calculator::calculate_skill_match;
use crate::ranking::{RankingError, RankingService};
use crate::skills::extractor::SkillExtractor;

pub mod handlers;

/// What happened to the similarity-ranking step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingStatus {
    Skipped,
    Ok,
    Unavailable,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateReport {
    pub id: String,
    pub skills: Vec<String>,
    pub match_score: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub extra_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_rank: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningReport {
    pub jd_skills: Vec<String>,
    /// Best skill match first; ties broken by id.
    pub candidates: Vec<CandidateReport>,
    pub ranking: RankingStatus,
    pub backend: &'static str,
}

pub struct ScreeningRequest<'a> {
    pub jd_text: &'a str,
    /// resume id → resume text
    pub resumes: &'a BTreeMap<String, String>,
    pub include_ranking: bool,
    pub top_k: usize,
}

pub async fn screen(
    extractor: &dyn SkillExtractor,
    ranking: &dyn RankingService,
    request: ScreeningRequest<'_>,
) -> ScreeningReport {
    let jd_skills = extractor.extract_skills(request.jd_text).await;

    let mut candidates = Vec::with_capacity(request.resumes.len());
    for (id, text) in request.resumes {
        let skills = extractor.extract_skills(text).await;
        let report = calculate_skill_match(&jd_skills, &skills);
        candidates.push(CandidateReport {
            id: id.clone(),
            skills,
            match_score: report.match_score,
            matched_skills: report.matched_skills,
            missing_skills: report.missing_skills,
            extra_skills: report.extra_skills,
            similarity_score: None,
            similarity_rank: None,
        });
    }

    let ranking_status = if request.include_ranking {
        attach_similarity(ranking, &request, &mut candidates).await
    } else {
        RankingStatus::Skipped
    };

    candidates.sort_by(|a, b| b.match_score.cmp(&a.match_score).then_with(|| a.id.cmp(&b.id)));

    info!(
        candidates = candidates.len(),
        jd_skills = jd_skills.len(),
        ranking = ?ranking_status,
        "Screening complete"
    );

    ScreeningReport {
        jd_skills,
        candidates,
        ranking: ranking_status,
        backend: extractor.backend(),
    }
}

async fn attach_similarity(
    ranking: &dyn RankingService,
    request: &ScreeningRequest<'_>,
    candidates: &mut [CandidateReport],
) -> RankingStatus {
    if !ranking.is_healthy().await {
        warn!("Ranking service unhealthy, screening without similarity scores");
        return RankingStatus::Unavailable;
    }

    let results = match ranking
        .rank_resumes(request.jd_text, request.resumes, request.top_k)
        .await
    {
        Ok(results) => results,
        Err(RankingError::Unavailable(e)) => {
            warn!("Ranking service became unavailable: {e}");
            return RankingStatus::Unavailable;
        }
        Err(e) => {
            warn!("Ranking failed during screening: {e}");
            return RankingStatus::Failed;
        }
    };

    for ranked in results.results {
        if let Some(candidate) = candidates.iter_mut().find(|c| c.id == ranked.resume_id) {
            candidate.similarity_score = Some(ranked.similarity_score);
            candidate.similarity_rank = Some(ranked.rank);
        }
    }
    RankingStatus::Ok
}

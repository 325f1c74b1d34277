use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ranking::{RankedResume, RankingError, RankingResults, RankingService};

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
const BUILD_INDEX_TIMEOUT: Duration = Duration::from_secs(30);
const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct BuildIndexRequest<'a> {
    resume_texts: Vec<&'a str>,
    resume_ids: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    jd_text: &'a str,
    top_k: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<RankedResume>,
    #[serde(default)]
    total_found: Option<usize>,
    #[serde(default)]
    algorithm: String,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: String,
}

/// HTTP client of the ranking microservice (`/health`, `/build-index`, `/search`).
#[derive(Clone)]
pub struct HttpRankingClient {
    client: Client,
    base_url: String,
}

impl HttpRankingClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create ranking HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn build_index(&self, corpus: &BTreeMap<String, String>) -> Result<(), RankingError> {
        let body = BuildIndexRequest {
            resume_texts: corpus.values().map(String::as_str).collect(),
            resume_ids: corpus.keys().map(String::as_str).collect(),
        };

        let response = self
            .client
            .post(self.url("/build-index"))
            .timeout(BUILD_INDEX_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response).await?;
        debug!(resumes = corpus.len(), "Ranking index built");
        Ok(())
    }

    async fn search(&self, query: &str, top_k: usize) -> Result<SearchResponse, RankingError> {
        let response = self
            .client
            .post(self.url("/search"))
            .timeout(SEARCH_TIMEOUT)
            .json(&SearchRequest {
                jd_text: query,
                top_k,
            })
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response)
            .await?
            .json::<SearchResponse>()
            .await
            .map_err(|e| RankingError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RankingService for HttpRankingClient {
    async fn is_healthy(&self) -> bool {
        let response = match self
            .client
            .get(self.url("/health"))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Ranking service health check failed: {e}");
                return false;
            }
        };

        match response.json::<HealthResponse>().await {
            Ok(health) => health.status == "healthy",
            Err(e) => {
                warn!("Ranking service health payload unreadable: {e}");
                false
            }
        }
    }

    async fn rank_resumes(
        &self,
        query: &str,
        corpus: &BTreeMap<String, String>,
        top_k: usize,
    ) -> Result<RankingResults, RankingError> {
        self.build_index(corpus).await?;
        let search = self.search(query, top_k).await?;

        info!(
            "Ranked {} resumes, {} returned",
            corpus.len(),
            search.results.len()
        );

        Ok(RankingResults {
            total_found: search.total_found.unwrap_or(search.results.len()),
            results: search.results,
            algorithm: search.algorithm,
            query: query.to_string(),
            total_resumes: corpus.len(),
        })
    }
}

fn transport_error(err: reqwest::Error) -> RankingError {
    if err.is_connect() || err.is_timeout() {
        RankingError::Unavailable(err.to_string())
    } else {
        RankingError::Service {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            message: err.to_string(),
        }
    }
}

/// Passes 2xx responses through; maps 503 to `Unavailable` and everything else to `Service`.
async fn check_status(response: Response) -> Result<Response, RankingError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ServiceErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    if status == StatusCode::SERVICE_UNAVAILABLE {
        return Err(RankingError::Unavailable(message));
    }
    Err(RankingError::Service {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode as AxumStatus, routing::{get, post}, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// An address nothing listens on.
    async fn closed_address() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn corpus(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn ranking_stub(captured: Arc<Mutex<Option<Value>>>) -> Router {
        Router::new()
            .route(
                "/health",
                get(|| async { Json(json!({"status": "healthy", "service": "text-ranker"})) }),
            )
            .route(
                "/build-index",
                post(move |Json(body): Json<Value>| {
                    let captured = captured.clone();
                    async move {
                        *captured.lock().unwrap() = Some(body);
                        Json(json!({"success": true}))
                    }
                }),
            )
            .route(
                "/search",
                post(|Json(body): Json<Value>| async move {
                    assert_eq!(body["top_k"], 2);
                    Json(json!({
                        "success": true,
                        "results": [
                            {"resume_id": "bob.pdf", "similarity_score": 0.82, "rank": 1, "resume_text": "Rust..."},
                            {"resume_id": "amy.pdf", "similarity_score": 0.41, "rank": 2, "resume_text": "Go..."}
                        ],
                        "total_found": 2,
                        "algorithm": "TF-IDF Cosine Similarity"
                    }))
                }),
            )
    }

    #[tokio::test]
    async fn test_healthy_service() {
        let base = serve(ranking_stub(Arc::new(Mutex::new(None)))).await;
        let client = HttpRankingClient::new(base).unwrap();
        assert!(client.is_healthy().await);
    }

    #[tokio::test]
    async fn test_degraded_status_is_unhealthy() {
        let base = serve(Router::new().route(
            "/health",
            get(|| async { Json(json!({"status": "starting"})) }),
        ))
        .await;
        let client = HttpRankingClient::new(base).unwrap();
        assert!(!client.is_healthy().await);
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let client = HttpRankingClient::new(closed_address().await).unwrap();
        assert!(!client.is_healthy().await);

        let result = client
            .rank_resumes("Rust engineer", &corpus(&[("a", "Rust")]), 5)
            .await;
        assert!(matches!(result, Err(RankingError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_rank_resumes_builds_index_then_searches() {
        let captured = Arc::new(Mutex::new(None));
        let base = serve(ranking_stub(captured.clone())).await;
        let client = HttpRankingClient::new(format!("{base}/")).unwrap();

        let results = client
            .rank_resumes(
                "Senior Rust engineer",
                &corpus(&[("amy.pdf", "Go and Python"), ("bob.pdf", "Rust and Tokio")]),
                2,
            )
            .await
            .unwrap();

        let sent = captured.lock().unwrap().clone().unwrap();
        assert_eq!(sent["resume_ids"], json!(["amy.pdf", "bob.pdf"]));
        assert_eq!(sent["resume_texts"], json!(["Go and Python", "Rust and Tokio"]));

        assert_eq!(results.results[0].resume_id, "bob.pdf");
        assert_eq!(results.results[1].rank, 2);
        assert_eq!(results.total_found, 2);
        assert_eq!(results.total_resumes, 2);
        assert_eq!(results.query, "Senior Rust engineer");
        assert_eq!(results.algorithm, "TF-IDF Cosine Similarity");
    }

    #[tokio::test]
    async fn test_service_error_is_not_unavailable() {
        let base = serve(Router::new().route(
            "/build-index",
            post(|| async {
                (
                    AxumStatus::BAD_REQUEST,
                    Json(json!({"error": "resume_texts and resume_ids required"})),
                )
            }),
        ))
        .await;
        let client = HttpRankingClient::new(base).unwrap();

        match client.rank_resumes("jd", &BTreeMap::new(), 10).await {
            Err(RankingError::Service { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "resume_texts and resume_ids required");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_503_is_unavailable() {
        let base = serve(Router::new().route(
            "/build-index",
            post(|| async { (AxumStatus::SERVICE_UNAVAILABLE, "warming up") }),
        ))
        .await;
        let client = HttpRankingClient::new(base).unwrap();

        let result = client.rank_resumes("jd", &corpus(&[("a", "b")]), 10).await;
        assert!(matches!(result, Err(RankingError::Unavailable(msg)) if msg == "warming up"));
    }

    #[tokio::test]
    async fn test_malformed_search_payload_is_decode_error() {
        let base = serve(
            Router::new()
                .route("/build-index", post(|| async { Json(json!({"success": true})) }))
                .route("/search", post(|| async { Json(json!({"unexpected": 1})) })),
        )
        .await;
        let client = HttpRankingClient::new(base).unwrap();

        let result = client.rank_resumes("jd", &corpus(&[("a", "b")]), 10).await;
        assert!(matches!(result, Err(RankingError::Decode(_))));
    }
}

//! Axum route handlers for file upload → text.

use std::collections::BTreeMap;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_many, extract_text, UploadedFile};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractTextResponse {
    pub filename: String,
    pub text: String,
    pub text_length: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractManyResponse {
    /// filename → extracted text, or null when that file could not be read.
    /// Repeated filenames get a ` (n)` suffix so every upload has an entry.
    pub results: BTreeMap<String, Option<String>>,
    pub total_files: usize,
    pub success_count: usize,
    pub failed_count: usize,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Malformed multipart body: {}", err.body_text()))
    }
}

/// Collects every part named `field` as an in-memory file.
async fn collect_files(multipart: &mut Multipart, field: &str) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();

    while let Some(part) = multipart.next_field().await.map_err(multipart_error)? {
        if part.name() != Some(field) {
            continue;
        }
        let filename = part.file_name().unwrap_or("upload").to_string();
        let data = part.bytes().await.map_err(multipart_error)?;
        files.push(UploadedFile { filename, data });
    }

    Ok(files)
}

/// POST /api/v1/extract-text
///
/// Multipart body with a single `file` part (.pdf, .txt or .docx).
pub async fn handle_extract_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, AppError> {
    let file = collect_files(&mut multipart, "file")
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let text = extract_text(&file, &state.upload_limits).await?;

    Ok(Json(ExtractTextResponse {
        filename: file.filename,
        text_length: text.chars().count(),
        text,
    }))
}

/// POST /api/v1/extract-multiple-texts
///
/// Multipart body with up to `MAX_UPLOAD_FILES` parts named `files`.
/// Files that fail to decode are reported as null; the request still succeeds.
pub async fn handle_extract_multiple_texts(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractManyResponse>, AppError> {
    let files = collect_files(&mut multipart, "files").await?;

    if files.is_empty() {
        return Err(AppError::Validation("No files uploaded".to_string()));
    }
    if files.len() > state.upload_limits.max_files {
        return Err(AppError::Validation(format!(
            "Too many files: {} (max {})",
            files.len(),
            state.upload_limits.max_files
        )));
    }

    let results = extract_many(&files, &state.upload_limits).await;
    let success_count = results.values().filter(|text| text.is_some()).count();

    info!(
        "Extraction complete: {}/{} successful",
        success_count,
        results.len()
    );

    Ok(Json(ExtractManyResponse {
        total_files: results.len(),
        failed_count: results.len() - success_count,
        success_count,
        results,
    }))
}

//! Text extraction from uploaded resume / job description files.
//!
//! Supported: `.pdf` (pdf-extract, on the blocking pool), `.txt` (UTF-8), `.docx` (see `docx`).

use std::collections::BTreeMap;
use std::path::Path;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

pub mod docx;
pub mod handlers;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File exceeds the {limit} byte upload limit")]
    TooLarge { limit: usize },

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("Text file is not valid UTF-8")]
    InvalidUtf8,

    #[error("Extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Txt,
    Docx,
}

impl FileKind {
    /// Picks the decoder from the file extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => Ok(FileKind::Pdf),
            Some("txt") => Ok(FileKind::Txt),
            Some("docx") => Ok(FileKind::Docx),
            Some(other) => Err(ExtractionError::UnsupportedFileType(format!(".{other}"))),
            None => Err(ExtractionError::UnsupportedFileType("(no extension)".to_string())),
        }
    }
}

const DOCX_EXPANSION_FACTOR: usize = 20;

/// Per-request upload limits.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_file_bytes: usize,
    pub max_files: usize,
}

impl UploadLimits {
    /// Request body ceiling for a multi-file upload, with room for multipart framing.
    pub fn max_body_bytes(&self) -> usize {
        self.max_file_bytes
            .saturating_mul(self.max_files.max(1))
            .saturating_add(1024 * 1024)
    }

    /// Ceiling on the decompressed XML read out of a single DOCX container.
    pub fn max_docx_xml_bytes(&self) -> usize {
        self.max_file_bytes.saturating_mul(DOCX_EXPANSION_FACTOR)
    }
}

/// An uploaded file held in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

/// Extracts plain text from a single file.
pub async fn extract_text(file: &UploadedFile, limits: &UploadLimits) -> Result<String, ExtractionError> {
    let kind = FileKind::from_filename(&file.filename)?;

    if file.data.len() > limits.max_file_bytes {
        return Err(ExtractionError::TooLarge {
            limit: limits.max_file_bytes,
        });
    }

    let text = match kind {
        FileKind::Txt => String::from_utf8(file.data.to_vec()).map_err(|_| ExtractionError::InvalidUtf8)?,
        FileKind::Docx => docx::docx_to_text(&file.data, limits.max_docx_xml_bytes())?,
        FileKind::Pdf => {
            let data = file.data.clone();
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
                .await?
                .map_err(|e| ExtractionError::Pdf(e.to_string()))?
        }
    };

    debug!(filename = %file.filename, chars = text.len(), "Extracted text");
    Ok(text)
}

/// Extracts every file independently. A failing file maps to `None`, never failing the batch.
/// Every upload keeps its own entry: a repeated filename is reported as `name (2).ext`, `name (3).ext`, ...
pub async fn extract_many(
    files: &[UploadedFile],
    limits: &UploadLimits,
) -> BTreeMap<String, Option<String>> {
    let mut results = BTreeMap::new();

    for file in files {
        let text = match extract_text(file, limits).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Failed to extract {}: {e}", file.filename);
                None
            }
        };
        let key = unique_name(&results, &file.filename);
        results.insert(key, text);
    }

    results
}

fn unique_name<V>(taken: &BTreeMap<String, V>, filename: &str) -> String {
    if !taken.contains_key(filename) {
        return filename.to_string();
    }

    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    (2..)
        .map(|n| format!("{stem} ({n}){ext}"))
        .find(|candidate| !taken.contains_key(candidate))
        .unwrap_or_else(|| filename.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> UploadLimits {
        UploadLimits {
            max_file_bytes: 1024,
            max_files: 3,
        }
    }

    fn upload(name: &str, data: &[u8]) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            data: Bytes::copy_from_slice(data),
        }
    }

    #[test]
    fn test_file_kind_from_extension() {
        assert_eq!(FileKind::from_filename("cv.PDF").unwrap(), FileKind::Pdf);
        assert_eq!(FileKind::from_filename("notes.txt").unwrap(), FileKind::Txt);
        assert_eq!(FileKind::from_filename("resume.final.docx").unwrap(), FileKind::Docx);
    }

    #[test]
    fn test_unsupported_extension() {
        match FileKind::from_filename("photo.png") {
            Err(ExtractionError::UnsupportedFileType(ext)) => assert_eq!(ext, ".png"),
            other => panic!("expected unsupported type, got {other:?}"),
        }
        assert!(FileKind::from_filename("README").is_err());
    }

    #[tokio::test]
    async fn test_extract_many_keeps_repeated_filenames() {
        let files = vec![
            upload("cv.txt", b"Rust"),
            upload("cv.txt", b"Go"),
            upload("cv.txt", b"Java"),
        ];
        let results = extract_many(&files, &limits()).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results["cv.txt"].as_deref(), Some("Rust"));
        assert_eq!(results["cv (2).txt"].as_deref(), Some("Go"));
        assert_eq!(results["cv (3).txt"].as_deref(), Some("Java"));
    }

    #[test]
    fn test_unique_name_without_extension() {
        let mut taken = BTreeMap::new();
        taken.insert("README".to_string(), ());
        assert_eq!(unique_name(&taken, "README"), "README (2)");
        assert_eq!(unique_name(&taken, "other"), "other");
    }

    #[test]
    fn test_max_body_bytes_saturates() {
        let limits = UploadLimits {
            max_file_bytes: usize::MAX,
            max_files: 20,
        };
        assert_eq!(limits.max_body_bytes(), usize::MAX);
    }

    #[tokio::test]
    async fn test_extract_plain_text() {
        let text = extract_text(&upload("jd.txt", "Senior Rust engineer".as_bytes()), &limits())
            .await
            .unwrap();
        assert_eq!(text, "Senior Rust engineer");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_rejected() {
        let result = extract_text(&upload("jd.txt", &[0xff, 0xfe, 0x00]), &limits()).await;
        assert!(matches!(result, Err(ExtractionError::InvalidUtf8)));
    }

    #[tokio::test]
    async fn test_file_over_limit_is_rejected() {
        let result = extract_text(&upload("big.txt", &[b'a'; 2048]), &limits()).await;
        assert!(matches!(result, Err(ExtractionError::TooLarge { limit: 1024 })));
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_an_error() {
        let result = extract_text(&upload("cv.pdf", b"definitely not a pdf"), &limits()).await;
        assert!(matches!(
            result,
            Err(ExtractionError::Pdf(_)) | Err(ExtractionError::Join(_))
        ));
    }

    #[tokio::test]
    async fn test_extract_many_isolates_failures() {
        let files = vec![
            upload("a.txt", b"Python"),
            upload("b.exe", b"MZ"),
            upload("c.txt", b"Go"),
        ];
        let results = extract_many(&files, &limits()).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results["a.txt"].as_deref(), Some("Python"));
        assert_eq!(results["b.exe"], None);
        assert_eq!(results["c.txt"].as_deref(), Some("Go"));
    }
}

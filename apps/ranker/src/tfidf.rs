//! TF-IDF cosine similarity over whitespace-separated, lowercased words.
//!
//! IDF is recomputed per query over `[query] + resumes`, so the job description
//! itself counts as a document.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::errors::RankerError;

pub const ALGORITHM: &str = "TF-IDF Cosine Similarity";

const PREVIEW_CHARS: usize = 500;

type TermVector = HashMap<String, f64>;

/// Resume corpus most recently submitted through `/build-index`.
#[derive(Debug, Clone)]
pub struct TextIndex {
    ids: Vec<String>,
    texts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub resume_id: String,
    pub similarity_score: f64,
    pub rank: u32,
    pub resume_text: String,
}

impl TextIndex {
    pub fn build(texts: Vec<String>, ids: Vec<String>) -> Result<Self, RankerError> {
        if texts.is_empty() || ids.is_empty() {
            return Err(RankerError::MissingResumes);
        }
        if texts.len() != ids.len() {
            return Err(RankerError::LengthMismatch);
        }
        Ok(Self { ids, texts })
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Ranks the indexed resumes against `query`, best first, at most `top_k` hits.
    /// Equal scores keep index order.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        let documents: Vec<Vec<String>> = std::iter::once(query)
            .chain(self.texts.iter().map(String::as_str))
            .map(words)
            .collect();
        let idf = inverse_document_frequency(&documents);

        let query_vector = weigh(&documents[0], &idf);
        let mut scored: Vec<(usize, f64)> = documents[1..]
            .iter()
            .enumerate()
            .map(|(i, doc)| (i, cosine_similarity(&query_vector, &weigh(doc, &idf))))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);

        scored
            .into_iter()
            .enumerate()
            .map(|(position, (i, score))| SearchHit {
                resume_id: self.ids[i].clone(),
                similarity_score: score,
                rank: position as u32 + 1,
                resume_text: preview(&self.texts[i]),
            })
            .collect()
    }
}

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Count of each word divided by the document's word count.
fn term_frequency(words: &[String]) -> TermVector {
    let mut tf = TermVector::new();
    for word in words {
        *tf.entry(word.clone()).or_default() += 1.0;
    }
    let total = words.len() as f64;
    for value in tf.values_mut() {
        *value /= total;
    }
    tf
}

/// ln(N / df) for every word of the collection.
fn inverse_document_frequency(documents: &[Vec<String>]) -> TermVector {
    let mut df: HashMap<&str, usize> = HashMap::new();
    for doc in documents {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for word in unique {
            *df.entry(word).or_default() += 1;
        }
    }

    let n = documents.len() as f64;
    df.into_iter()
        .map(|(word, count)| (word.to_string(), (n / count as f64).ln()))
        .collect()
}

fn weigh(words: &[String], idf: &TermVector) -> TermVector {
    term_frequency(words)
        .into_iter()
        .map(|(word, tf)| {
            let weight = tf * idf.get(&word).copied().unwrap_or(0.0);
            (word, weight)
        })
        .collect()
}

/// 0 when either vector has zero length.
fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(word, x)| b.get(word).map(|y| x * y))
        .sum();
    let norm_a = a.values().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.values().map(|x| x * x).sum::<f64>().sqrt();

    let denominator = norm_a * norm_b;
    if denominator == 0.0 {
        0.0
    } else {
        dot / denominator
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

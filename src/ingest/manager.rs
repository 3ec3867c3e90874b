//! Ingestion manager routing job-spec sources to extractors
//!
//! Extraction results are cached per source so repeated generation
//! against the same spec does not re-read or re-fetch. For the question
//! generation path every failure degrades to an empty spec: the
//! generator falls back to keyword-free templates instead of surfacing
//! an error to the user.

use crate::error::{CoachError, Result};
use crate::ingest::extractor::{
    html_to_text, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use crate::ingest::{JobSpec, JobSpecSource};
use log::{info, warn};
use reqwest::Client;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

const FETCH_TIMEOUT_SECS: u64 = 20;

pub struct JobSpecManager {
    cache: HashMap<String, String>,
    client: Client,
}

impl Default for JobSpecManager {
    fn default() -> Self {
        Self::new()
    }
}

impl JobSpecManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            client: Client::new(),
        }
    }

    /// Load a job spec, caching file and URL extractions.
    pub async fn load(&mut self, source: &JobSpecSource) -> Result<JobSpec> {
        let (key, text) = match source {
            JobSpecSource::Inline(text) => {
                return Ok(JobSpec {
                    text: text.clone(),
                    source: source.clone(),
                })
            }
            JobSpecSource::File(path) => {
                let key = format!("file:{}", path.display());
                if let Some(cached) = self.cache.get(&key) {
                    info!("Using cached text for: {}", path.display());
                    return Ok(JobSpec {
                        text: cached.clone(),
                        source: source.clone(),
                    });
                }
                (key, self.extract_file(path).await?)
            }
            JobSpecSource::Url(url) => {
                let key = format!("url:{}", url);
                if let Some(cached) = self.cache.get(&key) {
                    info!("Using cached text for: {}", url);
                    return Ok(JobSpec {
                        text: cached.clone(),
                        source: source.clone(),
                    });
                }
                (key, self.fetch_url(url).await?)
            }
        };

        self.cache.insert(key, text.clone());
        Ok(JobSpec {
            text,
            source: source.clone(),
        })
    }

    /// Load a job spec, degrading to empty text on any failure.
    pub async fn load_or_empty(&mut self, source: &JobSpecSource) -> JobSpec {
        match self.load(source).await {
            Ok(spec) => spec,
            Err(e) => {
                warn!("Could not ingest job spec, continuing without keywords: {}", e);
                JobSpec::empty(source.clone())
            }
        }
    }

    async fn extract_file(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(CoachError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" | "text" => {
                info!("Reading plain text job spec: {}", path.display());
                PlainTextExtractor.extract(path).await
            }
            "md" | "markdown" => {
                info!("Processing markdown job spec: {}", path.display());
                MarkdownExtractor.extract(path).await
            }
            "pdf" => {
                info!("Extracting job spec from PDF: {}", path.display());
                PdfExtractor.extract(path).await
            }
            other => Err(CoachError::UnsupportedFormat(format!(
                ".{} (supported: txt, md, pdf)",
                other
            ))),
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<String> {
        info!("Fetching job spec from URL: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .header("User-Agent", "interview-coach")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoachError::Network(format!(
                "Job spec fetch returned {}",
                status
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        if content_type.contains("pdf") || url.to_lowercase().ends_with(".pdf") {
            let bytes = response.bytes().await?;
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
                CoachError::PdfExtraction(format!(
                    "Failed to extract text from PDF at {}: {}",
                    url, e
                ))
            })
        } else {
            let body = response.text().await?;
            Ok(html_to_text(&body))
        }
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_inline_source_passes_through() {
        let mut manager = JobSpecManager::new();
        let source = JobSpecSource::Inline("Backend engineer, payments.".to_string());

        let spec = manager.load(&source).await.unwrap();
        assert_eq!(spec.text, "Backend engineer, payments.");
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_file_extraction_is_cached() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "Own the payments pipeline.").unwrap();

        let mut manager = JobSpecManager::new();
        let source = JobSpecSource::File(file.path().to_path_buf());

        let first = manager.load(&source).await.unwrap();
        assert_eq!(manager.cache_size(), 1);

        let second = manager.load(&source).await.unwrap();
        assert_eq!(first.text, second.text);
        assert_eq!(manager.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".xyz").tempfile().unwrap();

        let mut manager = JobSpecManager::new();
        let source = JobSpecSource::File(file.path().to_path_buf());

        let result = manager.load(&source).await;
        assert!(matches!(result, Err(CoachError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_missing_file_degrades_to_empty() {
        let mut manager = JobSpecManager::new();
        let source = JobSpecSource::File("does/not/exist.txt".into());

        assert!(manager.load(&source).await.is_err());

        let spec = manager.load_or_empty(&source).await;
        assert!(spec.text.is_empty());
    }
}

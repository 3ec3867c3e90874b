//! Serializable session records
//!
//! The core exposes the data; formatting is the formatter's job. Every
//! record round-trips through JSON field-for-field.

use crate::question::GeneratedQuestion;
use crate::scoring::Evaluation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One evaluated answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub question: GeneratedQuestion,
    pub answer: String,
    /// Elapsed answering time as reported by the caller; opaque to
    /// scoring.
    pub duration_secs: Option<u64>,
    pub evaluation: Evaluation,
    /// Supplementary feedback from the optional LLM provider, also
    /// merged into `evaluation.suggestions`.
    pub llm_feedback: Vec<String>,
}

impl AttemptRecord {
    pub fn new(
        question: GeneratedQuestion,
        answer: String,
        duration_secs: Option<u64>,
        evaluation: Evaluation,
        llm_feedback: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            question,
            answer,
            duration_secs,
            evaluation,
            llm_feedback,
        }
    }
}

/// A batch of generated questions and/or evaluated attempts, as written
/// by `--save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub created_at: DateTime<Utc>,
    pub questions: Vec<GeneratedQuestion>,
    pub attempts: Vec<AttemptRecord>,
}

impl SessionReport {
    pub fn with_questions(questions: Vec<GeneratedQuestion>) -> Self {
        Self {
            created_at: Utc::now(),
            questions,
            attempts: Vec::new(),
        }
    }

    pub fn with_attempt(attempt: AttemptRecord) -> Self {
        Self {
            created_at: Utc::now(),
            questions: Vec::new(),
            attempts: vec![attempt],
        }
    }
}

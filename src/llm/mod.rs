//! Optional LLM feedback integration
//!
//! The engine never branches on "is a key configured": it talks to a
//! `FeedbackProvider`, and the default provider returns nothing. A
//! provider only ever adds suggestions; heuristic scores are computed
//! before it runs and are never altered by it.

pub mod remote;

pub use remote::RemoteFeedback;

use std::future::Future;

/// A source of supplementary, free-text coaching feedback.
pub trait FeedbackProvider {
    /// Extra suggestions for the given question/answer pair. Failures
    /// are absorbed: implementations return an empty list rather than
    /// erroring, so evaluation never depends on an external service.
    fn supplement(
        &self,
        question: &str,
        answer: &str,
    ) -> impl Future<Output = Vec<String>> + Send;
}

/// Default provider: no feedback, no I/O.
pub struct NoopFeedback;

impl FeedbackProvider for NoopFeedback {
    async fn supplement(&self, _question: &str, _answer: &str) -> Vec<String> {
        Vec::new()
    }
}

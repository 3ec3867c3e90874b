//! The feedback aggregator: one evaluation result per answer
//!
//! `Evaluator` is the read-only context object built once from
//! configuration and passed every call; it owns the compiled lexicons so
//! scoring stays allocation-light and deterministic. `Evaluation` is the
//! disposable result: scores, STAR flags, an overall number, and ordered
//! suggestions.

use crate::config::Config;
use crate::error::Result;
use crate::question::GeneratedQuestion;
use crate::scoring::metrics::{build_filler_regex, conciseness, filler_density, relevance};
use crate::scoring::star::{StarAnalysis, StarClassifier};
use crate::scoring::{readability, Band, MetricScore};
use crate::text::{word_count, Keyword, Normalizer};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Complete evaluation of one answer. Serializes field-for-field and
/// parses back to an equal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub star: StarAnalysis,
    pub conciseness: MetricScore,
    pub relevance: MetricScore,
    pub readability: MetricScore,
    pub filler: MetricScore,
    /// Weighted overall score in 0..=100.
    pub overall: f32,
    /// Actionable suggestions, worst problems first.
    pub suggestions: Vec<String>,
}

pub struct Evaluator {
    normalizer: Normalizer,
    star: StarClassifier,
    filler_re: Regex,
    config: Config,
}

const SUGGEST_SITUATION: &str =
    "Open with one sentence of context so the listener knows the setting (Situation).";
const SUGGEST_TASK: &str =
    "State what you owned or were asked to achieve before describing the work (Task).";
const SUGGEST_ACTION: &str =
    "Walk through the specific steps you took, in first person (Action).";
const SUGGEST_RESULT: &str =
    "Add a measurable Result: numbers, impact, or what you learned.";
const SUGGEST_RELEVANCE: &str =
    "Tie the answer back to the question and the role's key terms.";
const SUGGEST_TOO_SHORT: &str =
    "Develop the story further; the answer is well short of the target length.";
const SUGGEST_TOO_LONG: &str =
    "Tighten the answer; trim detail that does not serve the question.";
const SUGGEST_READABILITY: &str = "Shorten sentences and prefer plain wording.";
const SUGGEST_FILLER: &str =
    "Cut filler words such as \"um\", \"like\", and \"you know\".";

impl Evaluator {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            normalizer: Normalizer::new(&config.keywords),
            star: StarClassifier::new(&config.scoring.star)?,
            filler_re: build_filler_regex(&config.scoring.filler.lexicon)?,
            config: config.clone(),
        })
    }

    /// Evaluate an answer against its question and the job-spec
    /// keywords. Pure: identical inputs yield an identical result.
    pub fn evaluate(
        &self,
        answer: &str,
        question: &GeneratedQuestion,
        keywords: &[Keyword],
    ) -> Evaluation {
        let scoring = &self.config.scoring;

        let star = self.star.classify(answer);
        let answer_tokens = self.normalizer.candidate_tokens(answer);

        let conciseness = conciseness(
            answer,
            scoring.conciseness.range_for(question.qtype),
            &scoring.conciseness,
        );
        let relevance = relevance(&answer_tokens, question, keywords, &scoring.relevance);
        let readability = readability::score(answer, &scoring.readability);
        let filler = filler_density(answer, &self.filler_re, &scoring.filler);

        let overall = overall_score(&star, &conciseness, &relevance, &readability, &filler);
        let suggestions = build_suggestions(
            &star,
            &conciseness,
            &relevance,
            &readability,
            &filler,
            word_count(answer),
            scoring.conciseness.range_for(question.qtype).min_words,
        );

        Evaluation {
            star,
            conciseness,
            relevance,
            readability,
            filler,
            overall,
            suggestions,
        }
    }
}

/// Weighted blend mirroring the structure/relevance emphasis of the
/// scoring model: relevance and structure 30% each, conciseness and
/// readability 20% each, minus a capped filler penalty.
fn overall_score(
    star: &StarAnalysis,
    conciseness: &MetricScore,
    relevance: &MetricScore,
    readability: &MetricScore,
    filler: &MetricScore,
) -> f32 {
    let structure = star.coverage();
    let read_norm = readability.value / 100.0;
    let penalty = (filler.value * 20.0).min(0.2);

    let base = 0.3 * relevance.value
        + 0.3 * structure
        + 0.2 * conciseness.value
        + 0.2 * read_norm;
    let blended = (base - penalty).clamp(0.0, 1.0);

    (blended * 1000.0).round() / 10.0
}

/// Fixed suggestion per failing signal, ordered by severity (fail
/// before warn) then by metric priority: STAR, relevance, conciseness,
/// readability, filler.
fn build_suggestions(
    star: &StarAnalysis,
    conciseness: &MetricScore,
    relevance: &MetricScore,
    readability: &MetricScore,
    filler: &MetricScore,
    words: usize,
    min_words: usize,
) -> Vec<String> {
    // (severity, metric priority, intra-metric order, text)
    let mut entries: Vec<(u8, u8, u8, &str)> = Vec::new();

    let star_flags = [
        (star.situation.present, SUGGEST_SITUATION),
        (star.task.present, SUGGEST_TASK),
        (star.action.present, SUGGEST_ACTION),
        (star.result.present, SUGGEST_RESULT),
    ];
    for (order, (present, text)) in star_flags.into_iter().enumerate() {
        if !present {
            entries.push((Band::Fail.severity(), 0, order as u8, text));
        }
    }

    if !relevance.band.is_pass() {
        entries.push((relevance.band.severity(), 1, 0, SUGGEST_RELEVANCE));
    }
    if !conciseness.band.is_pass() {
        let text = if words < min_words {
            SUGGEST_TOO_SHORT
        } else {
            SUGGEST_TOO_LONG
        };
        entries.push((conciseness.band.severity(), 2, 0, text));
    }
    if !readability.band.is_pass() {
        entries.push((readability.band.severity(), 3, 0, SUGGEST_READABILITY));
    }
    if !filler.band.is_pass() {
        entries.push((filler.band.severity(), 4, 0, SUGGEST_FILLER));
    }

    entries.sort_by_key(|&(severity, priority, order, _)| (severity, priority, order));
    entries.into_iter().map(|(_, _, _, text)| text.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::{Difficulty, QuestionType, Role};

    fn evaluator() -> Evaluator {
        Evaluator::new(&Config::default()).unwrap()
    }

    fn question() -> GeneratedQuestion {
        GeneratedQuestion {
            text: "Tell me about a time you worked with payments.".to_string(),
            role: Role::General,
            qtype: QuestionType::Behavioral,
            difficulty: Difficulty::Medium,
            keyword: Some("payments".to_string()),
        }
    }

    fn keywords() -> Vec<Keyword> {
        vec![
            Keyword {
                text: "payments".to_string(),
                salience: 0.2,
                rank: 0,
            },
            Keyword {
                text: "reliability".to_string(),
                salience: 0.1,
                rank: 1,
            },
        ]
    }

    #[test]
    fn test_empty_answer_is_worst_everywhere() {
        let evaluation = evaluator().evaluate("", &question(), &keywords());

        assert!(!evaluation.star.situation.present);
        assert!(!evaluation.star.task.present);
        assert!(!evaluation.star.action.present);
        assert!(!evaluation.star.result.present);
        assert_eq!(evaluation.conciseness.band, Band::Fail);
        assert_eq!(evaluation.relevance.band, Band::Fail);
        assert_eq!(evaluation.readability.band, Band::Fail);
        assert_eq!(evaluation.filler.band, Band::Fail);
        assert_eq!(evaluation.overall, 0.0);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let e = evaluator();
        let answer = "At my previous role our payments pipeline failed nightly. \
                      I was responsible for stabilizing it. I implemented retries \
                      and alerting. As a result, reliability improved sharply.";

        let first = e.evaluate(answer, &question(), &keywords());
        let second = e.evaluate(answer, &question(), &keywords());
        assert_eq!(first, second);
    }

    #[test]
    fn test_suggestions_ordered_fail_first_then_priority() {
        // Short answer with no cues and fillers: STAR fails, conciseness
        // fails, filler fails; STAR suggestions must lead.
        let evaluation = evaluator().evaluate(
            "Um basically like you know stuff",
            &question(),
            &keywords(),
        );

        assert!(!evaluation.suggestions.is_empty());
        assert_eq!(evaluation.suggestions[0], SUGGEST_SITUATION);
        assert_eq!(evaluation.suggestions[1], SUGGEST_TASK);
        assert_eq!(evaluation.suggestions[2], SUGGEST_ACTION);
        assert_eq!(evaluation.suggestions[3], SUGGEST_RESULT);

        let filler_pos = evaluation
            .suggestions
            .iter()
            .position(|s| s == SUGGEST_FILLER)
            .unwrap();
        let relevance_pos = evaluation
            .suggestions
            .iter()
            .position(|s| s == SUGGEST_RELEVANCE)
            .unwrap();
        assert!(relevance_pos < filler_pos);
    }

    #[test]
    fn test_passing_metric_emits_no_suggestion() {
        // Clean five-word answer: filler passes, so no filler suggestion.
        let evaluation =
            evaluator().evaluate("We shipped payments on time", &question(), &keywords());

        assert_eq!(evaluation.filler.band, Band::Pass);
        assert!(!evaluation.suggestions.iter().any(|s| s == SUGGEST_FILLER));
        assert_eq!(evaluation.conciseness.band, Band::Fail);
        assert!(evaluation.suggestions.iter().any(|s| s == SUGGEST_TOO_SHORT));
    }

    #[test]
    fn test_warn_sorts_after_fail() {
        let entries = build_suggestions(
            &StarAnalysis::empty(),
            &MetricScore::new(0.6, Band::Warn),
            &MetricScore::new(0.1, Band::Fail),
            &MetricScore::new(80.0, Band::Pass),
            &MetricScore::new(0.0, Band::Pass),
            40,
            150,
        );

        let conciseness_pos = entries.iter().position(|s| s == SUGGEST_TOO_SHORT).unwrap();
        let relevance_pos = entries.iter().position(|s| s == SUGGEST_RELEVANCE).unwrap();
        assert!(relevance_pos < conciseness_pos);
    }

    #[test]
    fn test_overall_rewards_full_star_relevant_answer() {
        let strong = "At my previous role our payments pipeline failed nightly \
                      during peak traffic. I was responsible for stabilizing \
                      payments before the holiday season. I implemented \
                      idempotent retries, circuit breakers, and paging alerts. \
                      As a result, reliability improved and failed charges \
                      dropped by half.";
        let weak = "Stuff happened at work.";

        let e = evaluator();
        let strong_eval = e.evaluate(strong, &question(), &keywords());
        let weak_eval = e.evaluate(weak, &question(), &keywords());
        assert!(strong_eval.overall > weak_eval.overall);
    }
}

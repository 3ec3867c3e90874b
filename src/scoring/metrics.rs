//! Lexical metric scorers: conciseness, relevance, filler-word density
//!
//! Every scorer is a pure function of its inputs plus read-only
//! configuration. An empty answer always produces the worst band rather
//! than an error, so the aggregator can build a complete result for any
//! input.

use crate::config::{ConcisenessConfig, FillerConfig, RelevanceConfig, WordRange};
use crate::error::{CoachError, Result};
use crate::question::GeneratedQuestion;
use crate::scoring::{Band, MetricScore};
use crate::text::{word_count, Keyword};
use regex::Regex;
use std::collections::HashSet;

/// Word count against the per-question-type target range: 1.0 inside
/// the range, decaying linearly outside, floored at zero.
pub fn conciseness(
    answer: &str,
    range: &WordRange,
    config: &ConcisenessConfig,
) -> MetricScore {
    let words = word_count(answer);
    if words == 0 {
        return MetricScore::worst(0.0);
    }

    let value = if words < range.min_words {
        words as f32 / range.min_words as f32
    } else if words <= range.max_words {
        1.0
    } else {
        let overshoot = (words - range.max_words) as f32;
        (1.0 - overshoot / range.decay_words as f32).max(0.0)
    };

    let band = if value >= config.pass_min {
        Band::Pass
    } else if value >= config.warn_min {
        Band::Warn
    } else {
        Band::Fail
    };

    MetricScore::new(value, band)
}

/// Token overlap between the answer's candidate tokens and the
/// reference set (the question's bound keyword plus the top job-spec
/// keywords): overlap / min(|answer|, |reference|), clamped to 0..=1.
pub fn relevance(
    answer_tokens: &[String],
    question: &GeneratedQuestion,
    keywords: &[Keyword],
    config: &RelevanceConfig,
) -> MetricScore {
    let answer_set: HashSet<&str> = answer_tokens.iter().map(|t| t.as_str()).collect();

    let mut reference: HashSet<&str> = HashSet::new();
    if let Some(keyword) = &question.keyword {
        reference.extend(keyword.split(' '));
    }
    for keyword in keywords.iter().take(config.top_keywords) {
        reference.extend(keyword.words());
    }

    if answer_set.is_empty() || reference.is_empty() {
        return MetricScore::worst(0.0);
    }

    let overlap = reference.intersection(&answer_set).count();
    let denominator = answer_set.len().min(reference.len());
    let value = (overlap as f32 / denominator as f32).clamp(0.0, 1.0);

    let band = if value >= config.pass_min {
        Band::Pass
    } else if value >= config.warn_min {
        Band::Warn
    } else {
        Band::Fail
    };

    MetricScore::new(value, band)
}

/// Filler matches per word. The value is the raw density, so lower is
/// better; an empty answer reports density 1.0 with the worst band.
pub fn filler_density(
    answer: &str,
    filler_re: &Regex,
    config: &FillerConfig,
) -> MetricScore {
    let words = word_count(answer);
    if words == 0 {
        return MetricScore::worst(1.0);
    }

    let hits = filler_re.find_iter(&answer.to_lowercase()).count();
    let value = hits as f32 / words as f32;

    let band = if value <= config.pass_max {
        Band::Pass
    } else if value <= config.warn_max {
        Band::Warn
    } else {
        Band::Fail
    };

    MetricScore::new(value, band)
}

/// Compile the filler lexicon into one word-bounded alternation.
/// Longer phrases are listed first so "you know" wins over any
/// single-word member it contains.
pub fn build_filler_regex(lexicon: &[String]) -> Result<Regex> {
    let mut phrases: Vec<&String> = lexicon.iter().collect();
    phrases.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"(?i)\b(?:{})\b", alternation);

    Regex::new(&pattern)
        .map_err(|e| CoachError::Configuration(format!("Invalid filler lexicon: {}", e)))
}

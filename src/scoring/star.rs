//! STAR structure classification from cue-phrase lexicons
//!
//! Each sentence of an answer is tested against four cue lexicons.
//! Matching is case-insensitive substring matching, the categories are
//! independent, and the first matching sentence per category is kept for
//! diagnostics. Absence of a segment feeds the aggregator as one signal
//! among several, never a hard failure.

use crate::config::StarConfig;
use crate::error::{CoachError, Result};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Presence of one STAR segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CueHit {
    pub present: bool,
    /// Index of the first sentence that matched, for diagnostics.
    pub sentence: Option<usize>,
}

impl CueHit {
    fn absent() -> Self {
        Self {
            present: false,
            sentence: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarAnalysis {
    pub situation: CueHit,
    pub task: CueHit,
    pub action: CueHit,
    pub result: CueHit,
}

impl StarAnalysis {
    pub fn empty() -> Self {
        Self {
            situation: CueHit::absent(),
            task: CueHit::absent(),
            action: CueHit::absent(),
            result: CueHit::absent(),
        }
    }

    /// Weighted coverage in 0..=1. Action carries the most weight:
    /// an answer that never says what the speaker did is the weakest.
    pub fn coverage(&self) -> f32 {
        let mut score = 0.0;
        if self.situation.present {
            score += 0.20;
        }
        if self.task.present {
            score += 0.25;
        }
        if self.action.present {
            score += 0.30;
        }
        if self.result.present {
            score += 0.25;
        }
        score
    }

    pub fn all_present(&self) -> bool {
        self.situation.present
            && self.task.present
            && self.action.present
            && self.result.present
    }
}

pub struct StarClassifier {
    situation: AhoCorasick,
    task: AhoCorasick,
    action: AhoCorasick,
    result: AhoCorasick,
}

impl StarClassifier {
    pub fn new(config: &StarConfig) -> Result<Self> {
        Ok(Self {
            situation: build_matcher(&config.situation)?,
            task: build_matcher(&config.task)?,
            action: build_matcher(&config.action)?,
            result: build_matcher(&config.result)?,
        })
    }

    pub fn classify(&self, answer: &str) -> StarAnalysis {
        let mut analysis = StarAnalysis::empty();

        for (index, sentence) in answer.unicode_sentences().enumerate() {
            record_hit(&self.situation, sentence, index, &mut analysis.situation);
            record_hit(&self.task, sentence, index, &mut analysis.task);
            record_hit(&self.action, sentence, index, &mut analysis.action);
            record_hit(&self.result, sentence, index, &mut analysis.result);
        }

        analysis
    }
}

fn record_hit(matcher: &AhoCorasick, sentence: &str, index: usize, hit: &mut CueHit) {
    if !hit.present && matcher.is_match(sentence) {
        hit.present = true;
        hit.sentence = Some(index);
    }
}

fn build_matcher(lexicon: &[String]) -> Result<AhoCorasick> {
    let patterns: Vec<String> = lexicon.iter().map(|p| p.to_lowercase()).collect();
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(&patterns)
        .map_err(|e| CoachError::Configuration(format!("Invalid STAR lexicon: {}", e)))
}

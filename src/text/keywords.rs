//! Frequency-based keyword extraction from job-spec token streams
//!
//! Salience is plain frequency normalized by the candidate-token count of
//! the document. No embeddings, no IDF tables: the goal is a stable,
//! reproducible ranking that a test can pin down exactly.

use crate::config::KeywordConfig;
use crate::text::normalizer::{Token, TokenTag};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strsim::jaro_winkler;

/// A ranked term or phrase extracted from a job spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub text: String,
    /// Frequency normalized by total candidate-token count. Non-negative.
    pub salience: f32,
    /// Zero-based rank, descending salience.
    pub rank: usize,
}

impl Keyword {
    /// Constituent words of the keyword, for overlap scoring.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split(' ')
    }
}

pub struct KeywordExtractor {
    max_keywords: usize,
    ngram_max: usize,
    fold_similarity: f32,
}

impl KeywordExtractor {
    pub fn new(config: &KeywordConfig) -> Self {
        Self {
            max_keywords: config.max_keywords,
            ngram_max: config.ngram_max.max(1),
            fold_similarity: config.fold_similarity,
        }
    }

    /// Rank candidate tokens and n-grams by salience.
    ///
    /// Tokens arrive already lowercased, so case-insensitive duplicates
    /// are merged by construction. N-grams never cross sentence
    /// boundaries, never contain a named entity, and must start and end
    /// on a candidate token, which drops stopword-only grams. Ordering:
    /// salience descending, ties by first occurrence, then lexicographic
    /// as a final stabilizer.
    pub fn extract(&self, tokens: &[Token]) -> Vec<Keyword> {
        let total_candidates = tokens
            .iter()
            .filter(|t| t.tag == TokenTag::Candidate)
            .count();
        if total_candidates == 0 {
            return Vec::new();
        }

        // term -> (count, first stream position)
        let mut stats: HashMap<String, (usize, usize)> = HashMap::new();

        for token in tokens {
            if token.tag == TokenTag::Candidate {
                let entry = stats
                    .entry(token.text.clone())
                    .or_insert((0, token.position));
                entry.0 += 1;
            }
        }

        for n in 2..=self.ngram_max {
            for window in tokens.windows(n) {
                if window[0].sentence != window[n - 1].sentence {
                    continue;
                }
                if window.iter().any(|t| t.tag == TokenTag::NamedEntity) {
                    continue;
                }
                // endpoints must be candidates; this keeps "point of
                // sale" while shedding stopword-only and stopword-edged
                // grams ("we need", "engineer to") that would crowd the
                // cap with noise
                if window[0].tag != TokenTag::Candidate
                    || window[n - 1].tag != TokenTag::Candidate
                {
                    continue;
                }
                let text = window
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let entry = stats.entry(text).or_insert((0, window[0].position));
                entry.0 += 1;
            }
        }

        let mut entries: Vec<(String, usize, usize)> = stats
            .into_iter()
            .map(|(text, (count, first))| (text, count, first))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)).then(a.0.cmp(&b.0)));

        let total = total_candidates as f32;
        let mut keywords: Vec<Keyword> = Vec::new();
        for (text, count, _first) in entries {
            if keywords.len() == self.max_keywords {
                break;
            }
            if self.is_near_duplicate(&text, &keywords) {
                continue;
            }
            let rank = keywords.len();
            keywords.push(Keyword {
                text,
                salience: count as f32 / total,
                rank,
            });
        }

        keywords
    }

    /// Fold single-word near-duplicates ("payment" / "payments") into the
    /// higher-salience form already kept.
    fn is_near_duplicate(&self, text: &str, kept: &[Keyword]) -> bool {
        if self.fold_similarity > 1.0 || text.contains(' ') {
            return false;
        }
        kept.iter().any(|k| {
            !k.text.contains(' ')
                && jaro_winkler(&k.text, text) as f32 >= self.fold_similarity
        })
    }
}

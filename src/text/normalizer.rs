//! Tokenization and normalization of raw text
//!
//! Turns a raw string (job spec, question, or answer) into a canonical
//! token stream. Each token carries a tag deciding its fate downstream:
//! stopwords and named entities never become keywords. The named-entity
//! heuristic is deliberately shallow: a word capitalized mid-sentence in
//! the original casing, unless it is a known acronym or an allowlisted
//! skill. False positives on unusual casing are expected and tolerated.

use crate::config::KeywordConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenTag {
    Stopword,
    Candidate,
    NamedEntity,
}

/// A normalized word with its provenance in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Lowercased form, outer punctuation stripped, intra-word hyphens
    /// and apostrophes kept.
    pub text: String,
    pub tag: TokenTag,
    /// Index in the token stream.
    pub position: usize,
    /// Index of the sentence the token came from.
    pub sentence: usize,
}

pub struct Normalizer {
    stop_words: HashSet<String>,
    acronyms: HashSet<String>,
    skill_allowlist: HashSet<String>,
}

impl Normalizer {
    pub fn new(config: &KeywordConfig) -> Self {
        Self {
            stop_words: create_stop_words(),
            acronyms: config.acronyms.iter().map(|s| s.to_lowercase()).collect(),
            skill_allowlist: config
                .skill_allowlist
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    /// Normalize raw text into an ordered token stream. Empty input yields
    /// an empty stream, never an error.
    pub fn normalize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();

        for (sentence_idx, sentence) in text.unicode_sentences().enumerate() {
            let mut words_seen = 0usize;
            for raw in sentence.split_whitespace() {
                let cleaned = clean_word(raw);
                if cleaned.is_empty() {
                    continue;
                }
                let word_idx = words_seen;
                words_seen += 1;

                if !cleaned.chars().any(|c| c.is_alphabetic()) {
                    continue;
                }

                let lower = cleaned.to_lowercase();
                if lower.chars().count() < 2 && !self.acronyms.contains(&lower) {
                    continue;
                }

                // Entity check runs first: "Will" the colleague outranks
                // "will" the modal verb when the casing says so.
                let tag = if self.is_named_entity(&cleaned, &lower, word_idx) {
                    TokenTag::NamedEntity
                } else if self.stop_words.contains(&lower) {
                    TokenTag::Stopword
                } else {
                    TokenTag::Candidate
                };

                tokens.push(Token {
                    text: lower,
                    tag,
                    position: tokens.len(),
                    sentence: sentence_idx,
                });
            }
        }

        tokens
    }

    /// Candidate tokens only, for overlap scoring.
    pub fn candidate_tokens(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .into_iter()
            .filter(|t| t.tag == TokenTag::Candidate)
            .map(|t| t.text)
            .collect()
    }

    /// Mid-sentence capitalization proxy for person/company names. Judged
    /// on the original casing, before lowercasing.
    fn is_named_entity(&self, cleaned: &str, lower: &str, word_idx: usize) -> bool {
        if word_idx == 0 {
            return false;
        }
        if self.acronyms.contains(lower) || self.skill_allowlist.contains(lower) {
            return false;
        }
        let first_upper = cleaned
            .chars()
            .next()
            .map(|c| c.is_uppercase())
            .unwrap_or(false);
        if !first_upper {
            return false;
        }
        // All-caps tokens read as acronyms, not names.
        cleaned.chars().any(|c| c.is_lowercase())
    }
}

/// Strip outer punctuation, keep intra-word hyphens and apostrophes.
fn clean_word(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric())
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '\'')
        .collect()
}

/// Fixed English stopword set. Contractions are included so that answer
/// text ("I'm", "we've") does not leak into keyword candidates.
fn create_stop_words() -> HashSet<String> {
    let stop_words = [
        "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "can",
        "could", "did", "do", "does", "for", "from", "had", "has", "have",
        "he", "her", "here", "hers", "him", "his", "how", "if", "in", "into",
        "is", "it", "its", "just", "me", "more", "most", "my", "no", "not",
        "of", "off", "on", "once", "only", "or", "our", "ours", "out", "over",
        "own", "she", "so", "some", "such", "than", "that", "the", "their",
        "theirs", "them", "then", "there", "these", "they", "this", "those",
        "through", "to", "too", "under", "until", "up", "very", "was", "we",
        "were", "what", "when", "where", "which", "while", "who", "whom",
        "why", "will", "with", "would", "you", "your", "yours", "also",
        "about", "after", "again", "all", "am", "any", "because", "before",
        "below", "between", "both", "during", "each", "etc", "few", "further",
        "get", "like", "make", "many", "may", "might", "must", "new", "now",
        "other", "per", "same", "shall", "should", "since", "still", "us",
        "use", "using", "well", "work", "year", "years", "i'm", "i've",
        "i'd", "i'll", "we're", "we've", "don't", "doesn't", "didn't",
        "can't", "won't", "it's", "that's", "you're", "you've",
    ];

    stop_words.iter().map(|&s| s.to_string()).collect()
}

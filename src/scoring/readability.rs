//! Flesch Reading Ease scoring
//!
//! The classic formula over words, sentences, and a syllable heuristic:
//! 206.835 − 1.015·(words/sentences) − 84.6·(syllables/words), clamped
//! to 0..=100. The syllable counter is the usual vowel-group
//! approximation with a silent-e rule; it is close enough for banding
//! and fully deterministic.

use crate::config::ReadabilityConfig;
use crate::scoring::{Band, MetricScore};
use unicode_segmentation::UnicodeSegmentation;

/// Score an answer's readability. Empty answers get the worst band.
pub fn score(answer: &str, config: &ReadabilityConfig) -> MetricScore {
    let value = match flesch_reading_ease(answer) {
        Some(v) => v,
        None => return MetricScore::worst(0.0),
    };

    let band = if value > config.pass_above {
        Band::Pass
    } else if value >= config.fail_below {
        Band::Warn
    } else {
        Band::Fail
    };

    MetricScore::new(value, band)
}

/// Flesch Reading Ease in 0..=100, or `None` for text with no words.
pub fn flesch_reading_ease(text: &str) -> Option<f32> {
    let words: Vec<&str> = text.unicode_words().collect();
    if words.is_empty() {
        return None;
    }

    let sentence_count = text.unicode_sentences().count().max(1);
    let syllable_total: usize = words.iter().map(|w| syllable_count(w)).sum();

    let words_per_sentence = words.len() as f32 / sentence_count as f32;
    let syllables_per_word = syllable_total as f32 / words.len() as f32;

    let raw = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    Some(raw.clamp(0.0, 100.0))
}

/// Vowel-group syllable approximation. Trailing silent "e" is dropped
/// unless the word ends in a consonant + "le"; every word counts at
/// least one syllable.
pub fn syllable_count(word: &str) -> usize {
    let lower: Vec<char> = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();
    if lower.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut count = 0;
    let mut prev_was_vowel = false;
    for &c in &lower {
        let vowel = is_vowel(c);
        if vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = vowel;
    }

    // silent trailing e: "pipeline" ends -ne, "table" keeps its -le
    if count > 1 && lower.len() >= 2 && lower[lower.len() - 1] == 'e' {
        let before = lower[lower.len() - 2];
        let keeps_le = before == 'l'
            && lower.len() >= 3
            && !is_vowel(lower[lower.len() - 3]);
        if !is_vowel(before) && !keeps_le {
            count -= 1;
        }
    }

    count.max(1)
}

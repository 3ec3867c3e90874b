//! Text normalization and keyword extraction

pub mod keywords;
pub mod normalizer;

pub use keywords::{Keyword, KeywordExtractor};
pub use normalizer::{Normalizer, Token, TokenTag};

use unicode_segmentation::UnicodeSegmentation;

/// Count words the same way every scorer does.
pub fn word_count(text: &str) -> usize {
    text.unicode_words().count()
}

//! Question generation from templates and extracted keywords

use crate::question::bank::{TemplateBank, DEFAULT_QUESTION, KEYWORD_SLOT};
use crate::question::{Difficulty, QuestionType, Role};
use crate::text::Keyword;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// A rendered question ready to be asked. Never contains a dangling
/// `{keyword}` slot or a named-entity term; keywords arrive pre-filtered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub text: String,
    pub role: Role,
    pub qtype: QuestionType,
    pub difficulty: Difficulty,
    /// Keyword bound into the slot, when the template had one.
    pub keyword: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub role: Role,
    pub qtype: QuestionType,
    pub difficulty: Difficulty,
    pub count: usize,
    /// Reorders the template pool reproducibly. Keyword binding order is
    /// unaffected, so output stays deterministic per seed.
    pub shuffle_seed: Option<u64>,
}

pub struct QuestionGenerator<'a> {
    bank: &'a TemplateBank,
}

impl<'a> QuestionGenerator<'a> {
    pub fn new(bank: &'a TemplateBank) -> Self {
        Self { bank }
    }

    /// Produce `request.count` questions for the requested bucket.
    ///
    /// Slotted templates bind keywords round-robin in salience order: no
    /// keyword is reused before every keyword has been used once. An
    /// empty bucket falls back to the generic pool; empty keywords fall
    /// back to slotless templates. Neither case is an error.
    pub fn generate(
        &self,
        request: &GenerationRequest,
        keywords: &[Keyword],
    ) -> Vec<GeneratedQuestion> {
        let mut pool: Vec<String> = self
            .bank
            .select(request.role, request.qtype, request.difficulty)
            .into_iter()
            .map(|t| t.text.clone())
            .collect();

        if pool.is_empty() {
            pool = self.bank.fallback_pool().to_vec();
        }

        if keywords.is_empty() {
            pool.retain(|text| !text.contains(KEYWORD_SLOT));
            if pool.is_empty() {
                pool = self
                    .bank
                    .fallback_pool()
                    .iter()
                    .filter(|text| !text.contains(KEYWORD_SLOT))
                    .cloned()
                    .collect();
            }
            if pool.is_empty() {
                pool.push(DEFAULT_QUESTION.to_string());
            }
        }

        if let Some(seed) = request.shuffle_seed {
            let mut rng = StdRng::seed_from_u64(seed);
            pool.shuffle(&mut rng);
        }

        let mut next_keyword = 0usize;
        let mut questions = Vec::with_capacity(request.count);

        for i in 0..request.count {
            let template = &pool[i % pool.len()];

            if template.contains(KEYWORD_SLOT) && !keywords.is_empty() {
                let keyword = &keywords[next_keyword % keywords.len()];
                next_keyword += 1;
                questions.push(GeneratedQuestion {
                    text: template.replace(KEYWORD_SLOT, &keyword.text),
                    role: request.role,
                    qtype: request.qtype,
                    difficulty: request.difficulty,
                    keyword: Some(keyword.text.clone()),
                });
            } else {
                questions.push(GeneratedQuestion {
                    text: template.clone(),
                    role: request.role,
                    qtype: request.qtype,
                    difficulty: request.difficulty,
                    keyword: None,
                });
            }
        }

        questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::text::{KeywordExtractor, Normalizer};

    fn keywords_from(text: &str) -> Vec<Keyword> {
        let config = Config::default();
        let normalizer = Normalizer::new(&config.keywords);
        let extractor = KeywordExtractor::new(&config.keywords);
        extractor.extract(&normalizer.normalize(text))
    }

    fn request(count: usize) -> GenerationRequest {
        GenerationRequest {
            role: Role::General,
            qtype: QuestionType::Behavioral,
            difficulty: Difficulty::Medium,
            count,
            shuffle_seed: None,
        }
    }

    #[test]
    fn test_no_dangling_placeholders() {
        let bank = TemplateBank::builtin();
        let generator = QuestionGenerator::new(&bank);
        let keywords = keywords_from("payments reliability observability");

        for question in generator.generate(&request(12), &keywords) {
            assert!(!question.text.contains(KEYWORD_SLOT));
            assert!(!question.text.contains('{'));
        }
    }

    #[test]
    fn test_keywords_bound_in_salience_order_without_reuse() {
        let bank = TemplateBank::builtin();
        let generator = QuestionGenerator::new(&bank);
        let keywords = keywords_from(
            "payments payments payments reliability reliability latency",
        );

        let questions = generator.generate(&request(8), &keywords);
        let bound: Vec<&str> = questions
            .iter()
            .filter_map(|q| q.keyword.as_deref())
            .collect();

        // first binding is the top keyword, and nothing repeats before
        // the full keyword list has been cycled through
        assert_eq!(bound.first(), Some(&"payments"));
        let cycle = keywords.len().min(bound.len());
        let first_cycle: Vec<&str> = bound.iter().take(cycle).copied().collect();
        let mut deduped = first_cycle.clone();
        deduped.dedup();
        assert_eq!(first_cycle, deduped);
    }

    #[test]
    fn test_empty_keywords_falls_back_to_slotless_templates() {
        let bank = TemplateBank::builtin();
        let generator = QuestionGenerator::new(&bank);

        let questions = generator.generate(&request(6), &[]);
        assert_eq!(questions.len(), 6);
        for question in questions {
            assert!(!question.text.contains(KEYWORD_SLOT));
            assert!(question.keyword.is_none());
        }
    }

    #[test]
    fn test_deterministic_output() {
        let bank = TemplateBank::builtin();
        let generator = QuestionGenerator::new(&bank);
        let keywords = keywords_from("kafka streaming consumers");

        let first = generator.generate(&request(5), &keywords);
        let second = generator.generate(&request(5), &keywords);
        assert_eq!(first, second);
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let bank = TemplateBank::builtin();
        let generator = QuestionGenerator::new(&bank);
        let keywords = keywords_from("kafka streaming consumers");

        let mut seeded = request(5);
        seeded.shuffle_seed = Some(42);

        let first = generator.generate(&seeded, &keywords);
        let second = generator.generate(&seeded, &keywords);
        assert_eq!(first, second);
    }

    #[test]
    fn test_generated_questions_never_contain_named_entities() {
        let bank = TemplateBank::builtin();
        let generator = QuestionGenerator::new(&bank);
        let keywords = keywords_from(
            "We need a backend engineer to own our payments pipeline and \
             collaborate with Will on reliability.",
        );

        for question in generator.generate(&request(20), &keywords) {
            if let Some(keyword) = &question.keyword {
                assert!(!keyword.contains("will"));
            }
        }
    }
}

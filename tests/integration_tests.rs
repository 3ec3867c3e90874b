//! Integration tests for the interview coach pipeline

use interview_coach::config::Config;
use interview_coach::ingest::{JobSpecManager, JobSpecSource};
use interview_coach::question::{
    Difficulty, GenerationRequest, QuestionGenerator, QuestionType, Role, TemplateBank,
};
use interview_coach::scoring::{Band, Evaluator};
use interview_coach::text::{Keyword, KeywordExtractor, Normalizer, TokenTag};
use std::io::Write;

const JOB_SPEC: &str =
    "We need a backend engineer to own our payments pipeline and collaborate \
     with Will on reliability.";

fn extract_keywords(config: &Config, text: &str) -> Vec<Keyword> {
    let normalizer = Normalizer::new(&config.keywords);
    let extractor = KeywordExtractor::new(&config.keywords);
    extractor.extract(&normalizer.normalize(text))
}

#[test]
fn test_job_spec_keywords_skip_colleague_names() {
    let config = Config::default();
    let keywords = extract_keywords(&config, JOB_SPEC);
    let texts: Vec<&str> = keywords.iter().map(|k| k.text.as_str()).collect();

    assert!(!texts.iter().any(|t| t.split(' ').any(|w| w == "will")));
    for expected in ["backend", "payments", "pipeline", "reliability"] {
        assert!(texts.contains(&expected), "missing keyword {expected}");
    }
}

#[test]
fn test_generated_questions_never_leak_named_entities() {
    let config = Config::default();
    let normalizer = Normalizer::new(&config.keywords);

    // every token the normalizer flags as an entity in the source spec
    let entities: Vec<String> = normalizer
        .normalize(JOB_SPEC)
        .into_iter()
        .filter(|t| t.tag == TokenTag::NamedEntity)
        .map(|t| t.text)
        .collect();
    assert!(entities.contains(&"will".to_string()));

    let keywords = extract_keywords(&config, JOB_SPEC);
    let bank = TemplateBank::builtin();
    let generator = QuestionGenerator::new(&bank);

    for role in Role::ALL {
        for qtype in QuestionType::ALL {
            let request = GenerationRequest {
                role,
                qtype,
                difficulty: Difficulty::Medium,
                count: 10,
                shuffle_seed: None,
            };
            for question in generator.generate(&request, &keywords) {
                if let Some(keyword) = &question.keyword {
                    for entity in &entities {
                        assert!(
                            !keyword.split(' ').any(|w| w == entity),
                            "entity '{entity}' leaked into question '{}'",
                            question.text
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_generation_is_deterministic_across_runs() {
    let config = Config::default();
    let keywords = extract_keywords(&config, JOB_SPEC);
    let bank = TemplateBank::builtin();
    let generator = QuestionGenerator::new(&bank);
    let request = GenerationRequest {
        role: Role::SoftwareEngineer,
        qtype: QuestionType::Technical,
        difficulty: Difficulty::Hard,
        count: 6,
        shuffle_seed: Some(7),
    };

    let first = generator.generate(&request, &keywords);
    let second = generator.generate(&request, &keywords);
    assert_eq!(first, second);
}

#[test]
fn test_empty_job_spec_falls_back_to_generic_questions() {
    let config = Config::default();
    let keywords = extract_keywords(&config, "");
    assert!(keywords.is_empty());

    let bank = TemplateBank::builtin();
    let generator = QuestionGenerator::new(&bank);
    let request = GenerationRequest {
        role: Role::Sales,
        qtype: QuestionType::Situational,
        difficulty: Difficulty::Easy,
        count: 4,
        shuffle_seed: None,
    };

    let questions = generator.generate(&request, &keywords);
    assert_eq!(questions.len(), 4);
    for question in questions {
        assert!(!question.text.contains("{keyword}"));
    }
}

#[test]
fn test_empty_answer_reports_worst_bands_everywhere() {
    let config = Config::default();
    let keywords = extract_keywords(&config, JOB_SPEC);
    let bank = TemplateBank::builtin();
    let generator = QuestionGenerator::new(&bank);
    let request = GenerationRequest {
        role: Role::General,
        qtype: QuestionType::Behavioral,
        difficulty: Difficulty::Medium,
        count: 1,
        shuffle_seed: None,
    };
    let question = generator.generate(&request, &keywords).remove(0);

    let evaluator = Evaluator::new(&config).unwrap();
    for answer in ["", "   ", "\n\t"] {
        let evaluation = evaluator.evaluate(answer, &question, &keywords);

        assert!(!evaluation.star.situation.present);
        assert!(!evaluation.star.task.present);
        assert!(!evaluation.star.action.present);
        assert!(!evaluation.star.result.present);
        assert_eq!(evaluation.conciseness.band, Band::Fail);
        assert_eq!(evaluation.relevance.band, Band::Fail);
        assert_eq!(evaluation.readability.band, Band::Fail);
        assert_eq!(evaluation.filler.band, Band::Fail);
    }
}

#[test]
fn test_short_clean_answer_scenario() {
    // Five words, no fillers, no STAR cues: conciseness fails short,
    // filler passes, every STAR flag is false.
    let config = Config::default();
    let keywords = extract_keywords(&config, JOB_SPEC);
    let bank = TemplateBank::builtin();
    let generator = QuestionGenerator::new(&bank);
    let request = GenerationRequest {
        role: Role::General,
        qtype: QuestionType::Behavioral,
        difficulty: Difficulty::Medium,
        count: 1,
        shuffle_seed: None,
    };
    let question = generator.generate(&request, &keywords).remove(0);

    let evaluator = Evaluator::new(&config).unwrap();
    let evaluation = evaluator.evaluate("We shipped payments on schedule", &question, &keywords);

    assert_eq!(evaluation.conciseness.band, Band::Fail);
    assert_eq!(evaluation.filler.band, Band::Pass);
    assert!(!evaluation.star.situation.present);
    assert!(!evaluation.star.task.present);
    assert!(!evaluation.star.action.present);
    assert!(!evaluation.star.result.present);
}

#[test]
fn test_full_evaluation_round_trips_through_json() {
    use interview_coach::output::AttemptRecord;

    let config = Config::default();
    let keywords = extract_keywords(&config, JOB_SPEC);
    let bank = TemplateBank::builtin();
    let generator = QuestionGenerator::new(&bank);
    let request = GenerationRequest {
        role: Role::SoftwareEngineer,
        qtype: QuestionType::Behavioral,
        difficulty: Difficulty::Medium,
        count: 1,
        shuffle_seed: None,
    };
    let question = generator.generate(&request, &keywords).remove(0);

    let evaluator = Evaluator::new(&config).unwrap();
    let evaluation = evaluator.evaluate(
        "At my previous role the payments pipeline failed nightly. \
         I was responsible for reliability. I implemented retries and \
         monitoring. As a result, failures dropped sharply.",
        &question,
        &keywords,
    );

    let record = AttemptRecord::new(
        question,
        "answer".to_string(),
        Some(120),
        evaluation,
        Vec::new(),
    );

    let json = serde_json::to_string(&record).unwrap();
    let parsed: AttemptRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(record, parsed);
}

#[tokio::test]
async fn test_job_spec_file_ingestion_feeds_keywords() {
    let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
    write!(
        file,
        "# Backend Engineer\n\nOwn the **payments** pipeline. Improve payments reliability."
    )
    .unwrap();

    let mut manager = JobSpecManager::new();
    let spec = manager
        .load(&JobSpecSource::File(file.path().to_path_buf()))
        .await
        .unwrap();

    let config = Config::default();
    let keywords = extract_keywords(&config, &spec.text);
    let texts: Vec<&str> = keywords.iter().map(|k| k.text.as_str()).collect();
    assert!(texts.contains(&"payments"));
}

#[tokio::test]
async fn test_unreachable_job_spec_degrades_to_generic_pipeline() {
    let mut manager = JobSpecManager::new();
    let spec = manager
        .load_or_empty(&JobSpecSource::File("missing/job.txt".into()))
        .await;
    assert!(spec.text.is_empty());

    let config = Config::default();
    let keywords = extract_keywords(&config, &spec.text);
    let bank = TemplateBank::builtin();
    let generator = QuestionGenerator::new(&bank);
    let request = GenerationRequest {
        role: Role::ProductManager,
        qtype: QuestionType::Technical,
        difficulty: Difficulty::Medium,
        count: 3,
        shuffle_seed: None,
    };

    let questions = generator.generate(&request, &keywords);
    assert_eq!(questions.len(), 3);
    for question in questions {
        assert!(question.keyword.is_none());
        assert!(!question.text.contains('{'));
    }
}

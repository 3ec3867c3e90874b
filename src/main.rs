//! Interview coach: job-spec driven question generation and answer scoring

use clap::Parser;
use interview_coach::cli::{self, Cli, Commands, ConfigAction};
use interview_coach::config::Config;
use interview_coach::error::{CoachError, Result};
use interview_coach::ingest::{JobSpec, JobSpecManager, JobSpecSource};
use interview_coach::llm::{FeedbackProvider, NoopFeedback, RemoteFeedback};
use interview_coach::output::{formatter_for, AttemptRecord, SessionReport};
use interview_coach::question::bank::DEFAULT_QUESTION;
use interview_coach::question::{
    Difficulty, GeneratedQuestion, GenerationRequest, QuestionGenerator, QuestionType,
    Role, TemplateBank,
};
use interview_coach::scoring::Evaluator;
use interview_coach::text::{Keyword, KeywordExtractor, Normalizer};
use log::{error, info};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level),
    )
    .init();

    let config = match Config::load_from(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Generate {
            role,
            qtype,
            difficulty,
            count,
            spec,
            spec_url,
            spec_text,
            seed,
            output,
            save,
        } => {
            let keywords =
                load_keywords(&config, spec, spec_url, spec_text).await;

            let bank = TemplateBank::load(&config.generation)?;
            let generator = QuestionGenerator::new(&bank);
            let request = GenerationRequest {
                role,
                qtype,
                difficulty,
                count: count.unwrap_or(config.generation.default_count),
                shuffle_seed: seed,
            };
            let questions = generator.generate(&request, &keywords);
            info!(
                "Generated {} questions ({} keywords available)",
                questions.len(),
                keywords.len()
            );

            let format = cli::parse_output_format(&output)
                .map_err(CoachError::InvalidInput)?;
            let formatter = formatter_for(&format, config.output.color_output);
            println!("{}", formatter.format_questions(&questions)?);

            if let Some(path) = save {
                let report = SessionReport::with_questions(questions);
                tokio::fs::write(&path, serde_json::to_string_pretty(&report)?).await?;
                info!("Saved questions to {}", path.display());
            }
        }

        Commands::Evaluate {
            question,
            role,
            qtype,
            difficulty,
            answer,
            answer_text,
            duration,
            spec,
            spec_url,
            spec_text,
            llm,
            output,
            save,
        } => {
            let answer_content = read_answer(answer, answer_text).await?;
            let question = manual_question(question, role, qtype, difficulty);
            let keywords =
                load_keywords(&config, spec, spec_url, spec_text).await;

            let evaluator = Evaluator::new(&config)?;
            let mut evaluation =
                evaluator.evaluate(&answer_content, &question, &keywords);

            let llm_feedback = if llm {
                match RemoteFeedback::from_config(&config.llm) {
                    Some(provider) => {
                        provider.supplement(&question.text, &answer_content).await
                    }
                    None => {
                        info!("No LLM endpoint configured, skipping feedback");
                        NoopFeedback.supplement(&question.text, &answer_content).await
                    }
                }
            } else {
                Vec::new()
            };
            evaluation.suggestions.extend(llm_feedback.iter().cloned());

            let record = AttemptRecord::new(
                question,
                answer_content,
                duration,
                evaluation,
                llm_feedback,
            );

            let format = cli::parse_output_format(&output)
                .map_err(CoachError::InvalidInput)?;
            let formatter = formatter_for(&format, config.output.color_output);
            println!("{}", formatter.format_attempt(&record)?);

            if let Some(path) = save {
                let report = SessionReport::with_attempt(record);
                tokio::fs::write(&path, serde_json::to_string_pretty(&report)?).await?;
                info!("Saved attempt to {}", path.display());
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    CoachError::Configuration(format!(
                        "Failed to render config: {}",
                        e
                    ))
                })?;
                println!("{}", content);
            }
            Some(ConfigAction::Reset) => {
                Config::default().save()?;
                println!("Configuration reset to defaults.");
            }
            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

/// Resolve a job-spec source from the CLI flags and extract keywords
/// from it. Every failure path degrades to an empty keyword list so
/// generation can fall back to keyword-free templates.
async fn load_keywords(
    config: &Config,
    spec: Option<PathBuf>,
    spec_url: Option<String>,
    spec_text: Option<String>,
) -> Vec<Keyword> {
    let source = if let Some(text) = spec_text {
        Some(JobSpecSource::Inline(text))
    } else if let Some(path) = spec {
        Some(JobSpecSource::File(path))
    } else {
        spec_url.map(JobSpecSource::Url)
    };

    let Some(source) = source else {
        return Vec::new();
    };

    let mut manager = JobSpecManager::new();
    let job_spec: JobSpec = manager.load_or_empty(&source).await;

    let normalizer = Normalizer::new(&config.keywords);
    let extractor = KeywordExtractor::new(&config.keywords);
    let keywords = extractor.extract(&normalizer.normalize(&job_spec.text));
    info!("Extracted {} keywords from job spec", keywords.len());
    keywords
}

async fn read_answer(
    answer: Option<PathBuf>,
    answer_text: Option<String>,
) -> Result<String> {
    match (answer, answer_text) {
        (Some(path), _) => Ok(tokio::fs::read_to_string(&path).await?),
        (None, Some(text)) => Ok(text),
        (None, None) => Err(CoachError::InvalidInput(
            "Provide an answer with --answer <file> or --answer-text <text>".to_string(),
        )),
    }
}

/// Wrap a user-supplied (or default) question string in the question
/// structure the evaluator expects. Manually supplied questions carry
/// no bound keyword.
fn manual_question(
    question: Option<String>,
    role: Role,
    qtype: QuestionType,
    difficulty: Difficulty,
) -> GeneratedQuestion {
    GeneratedQuestion {
        text: question.unwrap_or_else(|| DEFAULT_QUESTION.to_string()),
        role,
        qtype,
        difficulty,
        keyword: None,
    }
}

//! Configuration management for the interview coach

use crate::error::{CoachError, Result};
use crate::question::QuestionType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub keywords: KeywordConfig,
    pub generation: GenerationConfig,
    pub scoring: ScoringConfig,
    pub llm: LlmConfig,
    pub output: OutputConfig,
}

/// Tunables for the keyword extraction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Maximum number of keywords kept per job spec.
    pub max_keywords: usize,
    /// Largest n-gram window considered (1 = unigrams only).
    pub ngram_max: usize,
    /// Jaro-Winkler threshold above which two single-word keywords are
    /// folded into one ("payment" / "payments"). Set above 1.0 to disable.
    pub fold_similarity: f32,
    /// Short tokens kept despite the minimum-length rule and never
    /// tagged as named entities.
    pub acronyms: Vec<String>,
    /// Terms that stay keyword candidates even when capitalized
    /// mid-sentence (product and technology names).
    pub skill_allowlist: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Questions produced per generate request when not given on the CLI.
    pub default_count: usize,
    /// Optional TOML file replacing the built-in template bank.
    pub bank_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub conciseness: ConcisenessConfig,
    pub relevance: RelevanceConfig,
    pub readability: ReadabilityConfig,
    pub filler: FillerConfig,
    pub star: StarConfig,
}

/// Target answer length per question type, in words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRange {
    pub min_words: usize,
    pub max_words: usize,
    /// Words past `max_words` at which the score reaches zero.
    pub decay_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcisenessConfig {
    pub behavioral: WordRange,
    pub situational: WordRange,
    pub technical: WordRange,
    pub pass_min: f32,
    pub warn_min: f32,
}

impl ConcisenessConfig {
    pub fn range_for(&self, qtype: QuestionType) -> &WordRange {
        match qtype {
            QuestionType::Behavioral => &self.behavioral,
            QuestionType::Situational => &self.situational,
            QuestionType::Technical => &self.technical,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceConfig {
    /// How many top job-spec keywords join the reference set.
    pub top_keywords: usize,
    pub pass_min: f32,
    pub warn_min: f32,
}

/// Flesch Reading Ease bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadabilityConfig {
    pub fail_below: f32,
    pub pass_above: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillerConfig {
    pub lexicon: Vec<String>,
    /// Densities at or below this are a pass.
    pub pass_max: f32,
    /// Densities at or below this (and above pass_max) are a warn.
    pub warn_max: f32,
}

/// Cue-phrase lexicons for the STAR classifier. Matching is
/// case-insensitive substring matching per sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarConfig {
    pub situation: Vec<String>,
    pub task: Vec<String>,
    pub action: Vec<String>,
    pub result: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-style chat-completions endpoint. Feedback is
    /// skipped entirely when unset.
    pub api_base: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keywords: KeywordConfig {
                max_keywords: 20,
                ngram_max: 3,
                fold_similarity: 0.93,
                acronyms: vec![
                    "ai", "ml", "qa", "ci", "cd", "ux", "ui", "db", "k8s", "sre",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
                skill_allowlist: vec![
                    "rust",
                    "python",
                    "java",
                    "javascript",
                    "typescript",
                    "react",
                    "kubernetes",
                    "docker",
                    "aws",
                    "azure",
                    "gcp",
                    "sql",
                    "postgres",
                    "kafka",
                    "linux",
                    "git",
                    "excel",
                    "salesforce",
                    "jira",
                    "agile",
                    "scrum",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
            },
            generation: GenerationConfig {
                default_count: 5,
                bank_path: None,
            },
            scoring: ScoringConfig {
                conciseness: ConcisenessConfig {
                    behavioral: WordRange {
                        min_words: 150,
                        max_words: 300,
                        decay_words: 400,
                    },
                    situational: WordRange {
                        min_words: 120,
                        max_words: 300,
                        decay_words: 400,
                    },
                    technical: WordRange {
                        min_words: 100,
                        max_words: 250,
                        decay_words: 400,
                    },
                    pass_min: 0.8,
                    warn_min: 0.5,
                },
                relevance: RelevanceConfig {
                    top_keywords: 10,
                    pass_min: 0.5,
                    warn_min: 0.2,
                },
                readability: ReadabilityConfig {
                    fail_below: 30.0,
                    pass_above: 60.0,
                },
                filler: FillerConfig {
                    lexicon: vec![
                        "um",
                        "uh",
                        "like",
                        "you know",
                        "sort of",
                        "kind of",
                        "basically",
                        "actually",
                        "literally",
                        "i guess",
                    ]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                    pass_max: 0.03,
                    warn_max: 0.08,
                },
                star: StarConfig {
                    situation: vec![
                        "situation",
                        "background",
                        "the context was",
                        "at my previous role",
                        "at my last job",
                        "when i worked at",
                    ]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                    task: vec![
                        "task",
                        "goal",
                        "objective",
                        "responsibility",
                        "i was responsible for",
                        "i was asked to",
                        "i needed to",
                    ]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                    action: vec![
                        "action",
                        "approach",
                        "what i did",
                        "i decided to",
                        "i implemented",
                        "i built",
                        "i organized",
                        "so i",
                    ]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                    result: vec![
                        "result",
                        "outcome",
                        "impact",
                        "metric",
                        "learned",
                        "as a result",
                        "this led to",
                        "in the end",
                    ]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                },
            },
            llm: LlmConfig {
                api_base: None,
                api_key_env: "INTERVIEW_COACH_API_KEY".to_string(),
                model: "gpt-4o-mini".to_string(),
                timeout_secs: 20,
                max_retries: 2,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it with defaults
    /// on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit path, or the default path when
    /// none is given.
    pub fn load_from(path: Option<PathBuf>) -> Result<Self> {
        let config_path = path.unwrap_or_else(Self::config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                CoachError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CoachError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("interview-coach")
            .join("config.toml")
    }
}

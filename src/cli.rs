//! CLI interface for the interview coach

use crate::config::OutputFormat;
use crate::question::{Difficulty, QuestionType, Role};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "interview-coach")]
#[command(about = "Rehearse interview answers against a real job spec")]
#[command(
    long_about = "Generate interview questions from a role or job description and \
                  score typed answers on STAR structure, conciseness, relevance, \
                  readability, and filler words"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate interview questions
    Generate {
        /// Target role
        #[arg(short, long, value_enum, default_value_t = Role::General)]
        role: Role,

        /// Question type
        #[arg(short = 't', long = "type", value_enum, default_value_t = QuestionType::Behavioral)]
        qtype: QuestionType,

        /// Question difficulty
        #[arg(short, long, value_enum, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,

        /// Number of questions to generate
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Job spec file (TXT, MD, PDF) to derive keywords from
        #[arg(long)]
        spec: Option<PathBuf>,

        /// Job spec URL to derive keywords from
        #[arg(long)]
        spec_url: Option<String>,

        /// Pasted job spec text to derive keywords from
        #[arg(long)]
        spec_text: Option<String>,

        /// Shuffle the template pool reproducibly
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output as JSON to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Evaluate an answer
    Evaluate {
        /// The question being answered; defaults to a generic prompt
        #[arg(short, long)]
        question: Option<String>,

        /// Role context for scoring targets
        #[arg(short, long, value_enum, default_value_t = Role::General)]
        role: Role,

        /// Question type, selects the conciseness target range
        #[arg(short = 't', long = "type", value_enum, default_value_t = QuestionType::Behavioral)]
        qtype: QuestionType,

        /// Question difficulty
        #[arg(short, long, value_enum, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,

        /// Answer file to evaluate
        #[arg(short, long)]
        answer: Option<PathBuf>,

        /// Answer text to evaluate
        #[arg(long)]
        answer_text: Option<String>,

        /// Elapsed answering time in seconds, recorded in the report
        #[arg(long)]
        duration: Option<u64>,

        /// Job spec file for relevance keywords
        #[arg(long)]
        spec: Option<PathBuf>,

        /// Job spec URL for relevance keywords
        #[arg(long)]
        spec_url: Option<String>,

        /// Pasted job spec text for relevance keywords
        #[arg(long)]
        spec_text: Option<String>,

        /// Request supplementary LLM feedback (requires configured endpoint)
        #[arg(long)]
        llm: bool,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save the attempt as JSON to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert!(matches!(
            parse_output_format("console"),
            Ok(OutputFormat::Console)
        ));
        assert!(matches!(parse_output_format("JSON"), Ok(OutputFormat::Json)));
        assert!(matches!(
            parse_output_format("md"),
            Ok(OutputFormat::Markdown)
        ));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_cli_parses_generate_command() {
        let cli = Cli::try_parse_from([
            "interview-coach",
            "generate",
            "--role",
            "software_engineer",
            "--type",
            "technical",
            "--difficulty",
            "hard",
            "-n",
            "3",
            "--spec-text",
            "payments pipeline",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                role,
                qtype,
                difficulty,
                count,
                spec_text,
                ..
            } => {
                assert_eq!(role, Role::SoftwareEngineer);
                assert_eq!(qtype, QuestionType::Technical);
                assert_eq!(difficulty, Difficulty::Hard);
                assert_eq!(count, Some(3));
                assert_eq!(spec_text.as_deref(), Some("payments pipeline"));
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_role() {
        let result = Cli::try_parse_from([
            "interview-coach",
            "generate",
            "--role",
            "astronaut",
        ]);
        assert!(result.is_err());
    }
}

//! Output formatters: console, JSON, and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{AttemptRecord, SessionReport};
use crate::question::GeneratedQuestion;
use crate::scoring::{Band, MetricScore};
use colored::Colorize;

pub trait OutputFormatter {
    fn format_questions(&self, questions: &[GeneratedQuestion]) -> Result<String>;
    fn format_attempt(&self, record: &AttemptRecord) -> Result<String>;
}

pub fn formatter_for(format: &OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter { use_colors }),
        OutputFormat::Json => Box::new(JsonFormatter { pretty: true }),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

pub struct ConsoleFormatter {
    pub use_colors: bool,
}

pub struct JsonFormatter {
    pub pretty: bool,
}

pub struct MarkdownFormatter;

fn band_label(band: Band) -> &'static str {
    match band {
        Band::Pass => "pass",
        Band::Warn => "warn",
        Band::Fail => "fail",
    }
}

impl ConsoleFormatter {
    fn band_colored(&self, band: Band) -> String {
        let label = band_label(band);
        if !self.use_colors {
            return label.to_string();
        }
        match band {
            Band::Pass => label.green().to_string(),
            Band::Warn => label.yellow().to_string(),
            Band::Fail => label.red().to_string(),
        }
    }

    fn metric_line(&self, name: &str, score: &MetricScore) -> String {
        format!(
            "  {:<13} {:>6.2}  [{}]",
            name,
            score.value,
            self.band_colored(score.band)
        )
    }

    fn star_line(&self, name: &str, present: bool) -> String {
        let mark = if present { "✓" } else { "✗" };
        let mark = if !self.use_colors {
            mark.to_string()
        } else if present {
            mark.green().to_string()
        } else {
            mark.red().to_string()
        };
        format!("  {} {}", mark, name)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_questions(&self, questions: &[GeneratedQuestion]) -> Result<String> {
        let mut out = String::new();
        if let Some(first) = questions.first() {
            out.push_str(&format!(
                "Questions ({} / {} / {})\n\n",
                first.role.label(),
                first.qtype,
                first.difficulty
            ));
        }
        for (i, question) in questions.iter().enumerate() {
            out.push_str(&format!("{:>3}. {}\n", i + 1, question.text));
        }
        Ok(out)
    }

    fn format_attempt(&self, record: &AttemptRecord) -> Result<String> {
        let evaluation = &record.evaluation;
        let mut out = String::new();

        out.push_str(&format!("Question: {}\n\n", record.question.text));

        let overall = format!("{:.1}", evaluation.overall);
        let overall = if self.use_colors {
            overall.as_str().bold().to_string()
        } else {
            overall
        };
        out.push_str(&format!("Overall score: {} / 100\n\n", overall));

        out.push_str("Metrics:\n");
        out.push_str(&self.metric_line("conciseness", &evaluation.conciseness));
        out.push('\n');
        out.push_str(&self.metric_line("relevance", &evaluation.relevance));
        out.push('\n');
        out.push_str(&self.metric_line("readability", &evaluation.readability));
        out.push('\n');
        out.push_str(&self.metric_line("filler", &evaluation.filler));
        out.push('\n');

        out.push_str("\nSTAR coverage:\n");
        out.push_str(&self.star_line("Situation", evaluation.star.situation.present));
        out.push('\n');
        out.push_str(&self.star_line("Task", evaluation.star.task.present));
        out.push('\n');
        out.push_str(&self.star_line("Action", evaluation.star.action.present));
        out.push('\n');
        out.push_str(&self.star_line("Result", evaluation.star.result.present));
        out.push('\n');

        if !evaluation.suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for suggestion in &evaluation.suggestions {
                out.push_str(&format!("  • {}\n", suggestion));
            }
        }

        if let Some(duration) = record.duration_secs {
            out.push_str(&format!("\nAnswer time: {}s\n", duration));
        }

        Ok(out)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_questions(&self, questions: &[GeneratedQuestion]) -> Result<String> {
        let report = SessionReport::with_questions(questions.to_vec());
        let json = if self.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        Ok(json)
    }

    fn format_attempt(&self, record: &AttemptRecord) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(record)?
        } else {
            serde_json::to_string(record)?
        };
        Ok(json)
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_questions(&self, questions: &[GeneratedQuestion]) -> Result<String> {
        let mut out = String::from("# Interview questions\n\n");
        if let Some(first) = questions.first() {
            out.push_str(&format!(
                "_{} · {} · {}_\n\n",
                first.role.label(),
                first.qtype,
                first.difficulty
            ));
        }
        for (i, question) in questions.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, question.text));
        }
        Ok(out)
    }

    fn format_attempt(&self, record: &AttemptRecord) -> Result<String> {
        let evaluation = &record.evaluation;
        let mut out = String::from("# Answer evaluation\n\n");

        out.push_str(&format!("**Question:** {}\n\n", record.question.text));
        out.push_str(&format!(
            "**Overall score:** {:.1} / 100\n\n",
            evaluation.overall
        ));

        out.push_str("| Metric | Score | Band |\n|---|---|---|\n");
        out.push_str(&format!(
            "| Conciseness | {:.2} | {} |\n",
            evaluation.conciseness.value,
            band_label(evaluation.conciseness.band)
        ));
        out.push_str(&format!(
            "| Relevance | {:.2} | {} |\n",
            evaluation.relevance.value,
            band_label(evaluation.relevance.band)
        ));
        out.push_str(&format!(
            "| Readability | {:.2} | {} |\n",
            evaluation.readability.value,
            band_label(evaluation.readability.band)
        ));
        out.push_str(&format!(
            "| Filler | {:.2} | {} |\n",
            evaluation.filler.value,
            band_label(evaluation.filler.band)
        ));

        out.push_str("\n## STAR coverage\n\n");
        for (name, present) in [
            ("Situation", evaluation.star.situation.present),
            ("Task", evaluation.star.task.present),
            ("Action", evaluation.star.action.present),
            ("Result", evaluation.star.result.present),
        ] {
            out.push_str(&format!(
                "- [{}] {}\n",
                if present { "x" } else { " " },
                name
            ));
        }

        if !evaluation.suggestions.is_empty() {
            out.push_str("\n## Suggestions\n\n");
            for suggestion in &evaluation.suggestions {
                out.push_str(&format!("- {}\n", suggestion));
            }
        }

        Ok(out)
    }
}

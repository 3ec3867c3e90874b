//! The question template bank
//!
//! Templates live in {role, type, difficulty} buckets. A template may
//! carry at most one `{keyword}` slot, bound at generation time to a
//! job-spec keyword. The built-in bank can be replaced wholesale by a
//! TOML file referenced from the configuration.

use crate::config::GenerationConfig;
use crate::error::{CoachError, Result};
use crate::question::{Difficulty, QuestionType, Role};
use serde::{Deserialize, Serialize};

pub const KEYWORD_SLOT: &str = "{keyword}";

/// Fallback question when every pool is empty (custom bank with no
/// generic section and no bucket match).
pub const DEFAULT_QUESTION: &str =
    "Tell me about a time you handled a difficult challenge.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTemplate {
    pub role: Role,
    pub qtype: QuestionType,
    pub difficulty: Difficulty,
    pub text: String,
}

impl QuestionTemplate {
    pub fn has_slot(&self) -> bool {
        self.text.contains(KEYWORD_SLOT)
    }
}

#[derive(Debug)]
pub struct TemplateBank {
    templates: Vec<QuestionTemplate>,
    fallback: Vec<String>,
}

/// On-disk shape of a custom bank. Role/type/difficulty are loose
/// strings so a typo produces a did-you-mean error instead of a bare
/// serde failure.
#[derive(Debug, Deserialize)]
struct BankFile {
    #[serde(default)]
    templates: Vec<BankFileEntry>,
    #[serde(default)]
    fallback: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BankFileEntry {
    role: String,
    #[serde(rename = "type")]
    qtype: String,
    difficulty: String,
    text: String,
}

impl TemplateBank {
    /// Built-in bank, or the TOML override when configured.
    pub fn load(config: &GenerationConfig) -> Result<Self> {
        match &config.bank_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: BankFile = toml::from_str(&content).map_err(|e| {
            CoachError::Configuration(format!(
                "Failed to parse template bank '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut templates = Vec::with_capacity(file.templates.len());
        for entry in file.templates {
            templates.push(QuestionTemplate {
                role: Role::parse(&entry.role)?,
                qtype: QuestionType::parse(&entry.qtype)?,
                difficulty: Difficulty::parse(&entry.difficulty)?,
                text: entry.text,
            });
        }

        let fallback = if file.fallback.is_empty() {
            builtin_fallback()
        } else {
            file.fallback
        };

        Ok(Self {
            templates,
            fallback,
        })
    }

    pub fn builtin() -> Self {
        Self {
            templates: builtin_templates(),
            fallback: builtin_fallback(),
        }
    }

    /// Templates matching the requested bucket, in bank order.
    pub fn select(
        &self,
        role: Role,
        qtype: QuestionType,
        difficulty: Difficulty,
    ) -> Vec<&QuestionTemplate> {
        self.templates
            .iter()
            .filter(|t| t.role == role && t.qtype == qtype && t.difficulty == difficulty)
            .collect()
    }

    /// Generic cross-role pool used when a bucket is empty.
    pub fn fallback_pool(&self) -> &[String] {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn t(
    role: Role,
    qtype: QuestionType,
    difficulty: Difficulty,
    text: &str,
) -> QuestionTemplate {
    QuestionTemplate {
        role,
        qtype,
        difficulty,
        text: text.to_string(),
    }
}

fn builtin_fallback() -> Vec<String> {
    vec![
        DEFAULT_QUESTION.to_string(),
        "Walk me through a project you are proud of and your part in it.".to_string(),
        "Describe a time you had to learn something new under time pressure.".to_string(),
        "Tell me about a time you worked with {keyword}.".to_string(),
        "What would you do in your first ninety days in this role?".to_string(),
    ]
}

fn builtin_templates() -> Vec<QuestionTemplate> {
    use Difficulty::{Easy, Hard, Medium};
    use QuestionType::{Behavioral, Situational, Technical};
    use Role::{General, ProductManager, Sales, SoftwareEngineer};

    vec![
        // General
        t(General, Behavioral, Easy, "Tell me about a recent accomplishment you are proud of."),
        t(General, Behavioral, Easy, "Describe a time you worked with {keyword}."),
        t(General, Behavioral, Medium, "Tell me about a time you worked with {keyword} under a tight deadline."),
        t(General, Behavioral, Medium, "Describe a disagreement with a teammate and how you resolved it."),
        t(General, Behavioral, Hard, "Tell me about your biggest professional failure and what changed because of it."),
        t(General, Behavioral, Hard, "Describe a time you had to deliver results on {keyword} with incomplete information."),
        t(General, Situational, Easy, "How would you get up to speed on {keyword} in a new team?"),
        t(General, Situational, Medium, "How would you handle challenges involving {keyword}?"),
        t(General, Situational, Medium, "Your top priority changes the day before a deadline. What do you do?"),
        t(General, Situational, Hard, "Two stakeholders give you conflicting goals around {keyword}. How do you proceed?"),
        t(General, Technical, Easy, "Explain {keyword} to someone outside your field."),
        t(General, Technical, Medium, "Explain your approach to {keyword}."),
        t(General, Technical, Hard, "What are the trade-offs you weigh when working on {keyword} at scale?"),
        // Software engineer
        t(SoftwareEngineer, Behavioral, Easy, "Tell me about a bug that taught you something."),
        t(SoftwareEngineer, Behavioral, Medium, "Describe a time you improved {keyword} in a system you owned."),
        t(SoftwareEngineer, Behavioral, Medium, "Tell me about a code review disagreement and how it ended."),
        t(SoftwareEngineer, Behavioral, Hard, "Describe the hardest production incident you have handled end to end."),
        t(SoftwareEngineer, Situational, Easy, "A teammate's change breaks your feature the day of release. What do you do?"),
        t(SoftwareEngineer, Situational, Medium, "How would you approach migrating a live system that depends on {keyword}?"),
        t(SoftwareEngineer, Situational, Hard, "You inherit a service with no tests and weekly outages around {keyword}. Where do you start?"),
        t(SoftwareEngineer, Technical, Easy, "How do you decide what to test in new code?"),
        t(SoftwareEngineer, Technical, Medium, "Explain how you would design for reliability when {keyword} is the bottleneck."),
        t(SoftwareEngineer, Technical, Hard, "Design a system for {keyword}; talk through scaling, failure modes, and monitoring."),
        // Product manager
        t(ProductManager, Behavioral, Easy, "Tell me about a product decision you influenced with data."),
        t(ProductManager, Behavioral, Medium, "Describe a time you said no to a loud customer request about {keyword}."),
        t(ProductManager, Behavioral, Hard, "Tell me about a launch that missed its goals and what you did next."),
        t(ProductManager, Situational, Easy, "A sprint is overcommitted. How do you cut scope?"),
        t(ProductManager, Situational, Medium, "Engineering says the {keyword} work will take three times your estimate. What now?"),
        t(ProductManager, Situational, Hard, "How would you enter a market where {keyword} is dominated by one competitor?"),
        t(ProductManager, Technical, Easy, "Which metrics would you track for a product built around {keyword}?"),
        t(ProductManager, Technical, Medium, "How do you prioritize a roadmap when {keyword} competes with platform debt?"),
        t(ProductManager, Technical, Hard, "Walk through pricing a new offering around {keyword} from first principles."),
        // Sales
        t(Sales, Behavioral, Easy, "Tell me about a deal you are proud of winning."),
        t(Sales, Behavioral, Medium, "Describe a time you rebuilt trust with an unhappy customer over {keyword}."),
        t(Sales, Behavioral, Hard, "Tell me about the biggest deal you lost and what you changed afterwards."),
        t(Sales, Situational, Easy, "A prospect goes quiet after a strong demo. What do you do?"),
        t(Sales, Situational, Medium, "How would you handle a prospect objecting to the price of {keyword}?"),
        t(Sales, Situational, Hard, "Your quota doubles and your territory shrinks. How do you plan the quarter?"),
        t(Sales, Technical, Easy, "How do you qualify a lead in the first call?"),
        t(Sales, Technical, Medium, "Explain how you would position {keyword} against an entrenched competitor."),
        t(Sales, Technical, Hard, "Build a forecast for a new product around {keyword}; what drives your confidence?"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_bank_covers_every_bucket_or_falls_back() {
        let bank = TemplateBank::builtin();
        assert!(!bank.is_empty());
        // every bucket either has templates or the fallback pool covers it
        for role in Role::ALL {
            for qtype in QuestionType::ALL {
                for difficulty in Difficulty::ALL {
                    let pool = bank.select(role, qtype, difficulty);
                    assert!(
                        !pool.is_empty() || !bank.fallback_pool().is_empty(),
                        "no templates and no fallback for {role}/{qtype}/{difficulty}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_slot_detection() {
        let bank = TemplateBank::builtin();
        let slotted = bank
            .select(Role::General, QuestionType::Technical, Difficulty::Medium)
            .into_iter()
            .find(|t| t.has_slot());
        assert!(slotted.is_some());
    }

    #[test]
    fn test_custom_bank_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
fallback = ["Tell me about your background."]

[[templates]]
role = "software engineer"
type = "technical"
difficulty = "hard"
text = "How would you shard {{keyword}} storage?"
"#
        )
        .unwrap();

        let bank = TemplateBank::from_file(file.path()).unwrap();
        assert_eq!(bank.len(), 1);
        let pool = bank.select(
            Role::SoftwareEngineer,
            QuestionType::Technical,
            Difficulty::Hard,
        );
        assert_eq!(pool.len(), 1);
        assert!(pool[0].has_slot());
        assert_eq!(bank.fallback_pool().len(), 1);
    }

    #[test]
    fn test_custom_bank_rejects_unknown_role_with_hint() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[templates]]
role = "salse"
type = "technical"
difficulty = "easy"
text = "Qualify a lead."
"#
        )
        .unwrap();

        let err = TemplateBank::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("did you mean 'sales'"));
    }
}
